//! tsterm CLI
//!
//! Encode time-series requests to hex, or decode captured responses.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};
use tsterm::{Cell, Codec, CodecConfig, CodecError, QueryResult, Row};

/// tsterm CLI
#[derive(Parser, Debug)]
#[command(name = "tsterm-cli")]
#[command(about = "Encode and decode time-series term messages")]
#[command(version)]
struct Args {
    /// Deepest term nesting accepted when decoding
    #[arg(long, default_value = "64")]
    max_depth: usize,

    /// Largest response accepted when decoding, in MB
    #[arg(long, default_value = "16")]
    max_message_mb: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a get request
    Get {
        /// Table name
        table: String,

        /// Key cells, in key order (inferred like put cells)
        keys: Vec<String>,

        /// Request timeout in milliseconds
        #[arg(short, long)]
        timeout: Option<u32>,
    },

    /// Encode a query request
    Query {
        /// Query text
        sql: String,
    },

    /// Encode a put request
    Put {
        /// Table name
        table: String,

        /// Rows as comma-separated cells, e.g. "device-1,@1000,21.5".
        /// Empty or null is NULL, @N a timestamp, then true/false, integer,
        /// finite double, else text. Wrap a cell in double quotes to force
        /// text (e.g. "\"NaN\"").
        rows: Vec<String>,
    },

    /// Decode a response
    Decode {
        /// File holding the response
        file: PathBuf,

        /// The file holds hex text rather than raw bytes
        #[arg(long)]
        hex: bool,

        /// Which response to expect
        #[arg(short, long, value_enum, default_value = "query")]
        kind: ResponseKind,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ResponseKind {
    Get,
    Query,
    Put,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tsterm=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = CodecConfig::builder()
        .max_depth(args.max_depth)
        .max_message_mb(args.max_message_mb)
        .build();
    let codec = Codec::new(config);

    match args.command {
        Commands::Get {
            table,
            keys,
            timeout,
        } => {
            let keys: Vec<Cell> = keys.iter().map(|k| Cell::infer(k)).collect();
            println!("{}", hex::encode(&codec.encode_get(&table, &keys, timeout)));
        }
        Commands::Query { sql } => {
            println!("{}", hex::encode(&codec.encode_query(&sql)));
        }
        Commands::Put { table, rows } => {
            let rows: Vec<Row> = rows
                .iter()
                .map(|r| r.split(',').map(Cell::infer).collect())
                .collect();
            println!("{}", hex::encode(&codec.encode_put(&table, &rows)));
        }
        Commands::Decode { file, hex, kind } => {
            if let Err(e) = decode(&codec, &file, hex, kind) {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

fn decode(codec: &Codec, file: &Path, hex: bool, kind: ResponseKind) -> Result<(), String> {
    let raw = std::fs::read(file).map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    let bytes = if hex {
        from_hex(&String::from_utf8_lossy(&raw))?
    } else {
        raw
    };

    let outcome = match kind {
        ResponseKind::Get => codec.decode_get_response(&bytes).map(Some),
        ResponseKind::Query => codec.decode_query_response(&bytes).map(Some),
        ResponseKind::Put => codec.decode_put_response(&bytes).map(|()| None),
    };

    match outcome {
        Ok(Some(result)) => print_result(&result),
        Ok(None) => println!("OK"),
        Err(CodecError::Backend { message, code }) => println!("(error {}) {}", code, message),
        Err(e) => return Err(format!("{:?} failure: {}", e.kind(), e)),
    }
    Ok(())
}

fn print_result(result: &QueryResult) {
    let header: Vec<String> = result
        .columns()
        .iter()
        .map(|c| format!("{}:{}", c.name(), c.column_type()))
        .collect();
    println!("{}", header.join("\t"));

    for row in result.rows() {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        println!("{}", cells.join("\t"));
    }
    println!("({} rows)", result.row_count());
}

/// Decode hex text, ignoring whitespace and line breaks
fn from_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(digits).map_err(|e| format!("Invalid hex input: {}", e))
}
