//! Response decoding
//!
//! Single pass over the response bytes: the header and tag first, then
//! column metadata, then rows. Cells are typed as they are read, so the
//! full column list is always known before the first row.

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::term::{Atom, Term, TermReader};
use crate::timeseries::{map_cell, ColumnDescriptor, ColumnType, QueryResult, Row};

/// Decode a `tsgetresp` or `tsqueryresp` message
///
/// ```text
/// {tsgetresp | tsqueryresp, {[Name...], [Type...], [{Cell...}...]}}
/// {rpberrorresp, Message, Code}
/// ```
pub(crate) fn decode_ts_response(bytes: &[u8], config: &CodecConfig) -> Result<QueryResult> {
    let mut reader = open(bytes, config)?;

    let arity = reader.read_tuple_head()?;
    if arity == 0 {
        return Err(CodecError::UnexpectedTerm {
            expected: "tagged tuple",
            found: "empty tuple".to_string(),
        });
    }
    let tag = reader.read_atom()?;

    if tag == Atom::RPB_ERROR_RESP {
        expect_arity(arity, 3, "{rpberrorresp, Message, Code}")?;
        let message = reader.read_binary()?;
        let code = reader.read_integer()?;
        reader.finish()?;
        return Err(backend_error(&message, code));
    }
    if tag != Atom::TS_GET_RESP && tag != Atom::TS_QUERY_RESP {
        return Err(CodecError::UnrecognizedResponse(tag.to_string()));
    }

    expect_arity(arity, 2, "{Tag, Data}")?;
    expect_arity(reader.read_tuple_head()?, 3, "{Names, Types, Rows}")?;

    let columns = read_columns(&mut reader)?;
    let rows = read_rows(&mut reader, &columns)?;
    reader.finish()?;

    tracing::debug!(
        "Decoded {}: {} columns, {} rows",
        tag,
        columns.len(),
        rows.len()
    );
    QueryResult::new(columns, rows)
}

/// Decode a `tsputresp` message
///
/// The acknowledgement is accepted either bare or as a tagged tuple.
pub(crate) fn decode_put_ack(bytes: &[u8], config: &CodecConfig) -> Result<()> {
    let mut reader = open(bytes, config)?;
    let term = reader.read_term()?;
    reader.finish()?;

    match term {
        Term::Atom(tag) if tag == Atom::TS_PUT_RESP => Ok(()),
        Term::Atom(tag) => Err(CodecError::UnrecognizedResponse(tag.to_string())),
        Term::Tuple(items) => {
            let mut items = items.into_iter();
            match items.next() {
                Some(Term::Atom(tag)) if tag == Atom::TS_PUT_RESP => Ok(()),
                Some(Term::Atom(tag)) if tag == Atom::RPB_ERROR_RESP => {
                    match (items.next(), items.next(), items.next()) {
                        (Some(Term::Binary(message)), Some(Term::Integer(code)), None) => {
                            Err(backend_error(&message, code))
                        }
                        _ => Err(CodecError::UnexpectedTerm {
                            expected: "{rpberrorresp, Message, Code}",
                            found: "malformed error tuple".to_string(),
                        }),
                    }
                }
                Some(Term::Atom(tag)) => Err(CodecError::UnrecognizedResponse(tag.to_string())),
                Some(other) => Err(CodecError::UnexpectedTerm {
                    expected: "atom",
                    found: other.type_name().to_string(),
                }),
                None => Err(CodecError::UnexpectedTerm {
                    expected: "tagged tuple",
                    found: "empty tuple".to_string(),
                }),
            }
        }
        other => Err(CodecError::UnexpectedTerm {
            expected: "atom or tuple",
            found: other.type_name().to_string(),
        }),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn open<'a>(bytes: &'a [u8], config: &CodecConfig) -> Result<TermReader<'a>> {
    if bytes.len() > config.max_message_size {
        return Err(CodecError::malformed(
            0,
            format!(
                "response of {} bytes exceeds limit of {}",
                bytes.len(),
                config.max_message_size
            ),
        ));
    }
    tracing::trace!("Decoding response ({} bytes)", bytes.len());

    let mut reader = TermReader::new(bytes).with_max_depth(config.max_depth);
    reader.read_version()?;
    Ok(reader)
}

fn expect_arity(actual: usize, expected: usize, shape: &'static str) -> Result<()> {
    if actual != expected {
        return Err(CodecError::UnexpectedTerm {
            expected: shape,
            found: format!("{}-tuple", actual),
        });
    }
    Ok(())
}

fn backend_error(message: &[u8], code: i64) -> CodecError {
    let message = String::from_utf8_lossy(message).into_owned();
    tracing::warn!("Backend returned error {}: {}", code, message);
    CodecError::Backend { message, code }
}

/// Column names and column types arrive as two consecutive lists, each
/// with its own terminator.
fn read_columns(reader: &mut TermReader<'_>) -> Result<Vec<ColumnDescriptor>> {
    let name_count = reader.read_list_head()?;
    let mut names = Vec::with_capacity(name_count);
    for _ in 0..name_count {
        let raw = reader.read_binary()?;
        let name = String::from_utf8(raw.to_vec())
            .map_err(|_| CodecError::InvalidUtf8 { context: "column name" })?;
        names.push(name);
    }
    if name_count > 0 {
        reader.read_nil()?;
    }

    let type_count = reader.read_list_head()?;
    if type_count != name_count {
        return Err(CodecError::ColumnCountMismatch {
            names: name_count,
            types: type_count,
        });
    }
    let mut columns = Vec::with_capacity(type_count);
    for name in names {
        let column_type = ColumnType::from_wire_name(reader.read_atom()?.as_str())?;
        columns.push(ColumnDescriptor::new(name, column_type));
    }
    if type_count > 0 {
        reader.read_nil()?;
    }

    Ok(columns)
}

fn read_rows(reader: &mut TermReader<'_>, columns: &[ColumnDescriptor]) -> Result<Vec<Row>> {
    let row_count = reader.read_list_head()?;
    let mut rows = Vec::with_capacity(row_count);

    for row in 0..row_count {
        let arity = reader.read_tuple_head()?;
        if arity != columns.len() {
            return Err(CodecError::RowArity {
                row,
                expected: columns.len(),
                actual: arity,
            });
        }

        let cells = columns
            .iter()
            .map(|column| map_cell(reader.read_term()?, column.column_type()))
            .collect::<Result<Vec<_>>>()?;
        rows.push(Row::new(cells));
    }
    if row_count > 0 {
        reader.read_nil()?;
    }

    Ok(rows)
}
