//! Protocol codec
//!
//! Entry points for encoding requests and decoding responses. The free
//! functions use the default configuration; [`Codec`] carries its own.

use bytes::Bytes;

use super::{request, response};
use crate::config::CodecConfig;
use crate::error::Result;
use crate::timeseries::{Cell, QueryResult, Row};

/// Stateless encoder/decoder bound to a configuration
///
/// Holds no per-call state, so one value can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a get request; `None` uses the configured default timeout
    pub fn encode_get(&self, table: &str, key_values: &[Cell], timeout_ms: Option<u32>) -> Bytes {
        let timeout = timeout_ms.unwrap_or(self.config.default_timeout_ms);
        request::encode_get(table, key_values, timeout)
    }

    pub fn encode_query(&self, query_text: &str) -> Bytes {
        request::encode_query(query_text)
    }

    pub fn encode_put(&self, table: &str, rows: &[Row]) -> Bytes {
        request::encode_put(table, rows)
    }

    pub fn decode_get_response(&self, bytes: &[u8]) -> Result<QueryResult> {
        response::decode_ts_response(bytes, &self.config)
    }

    pub fn decode_query_response(&self, bytes: &[u8]) -> Result<QueryResult> {
        response::decode_ts_response(bytes, &self.config)
    }

    pub fn decode_put_response(&self, bytes: &[u8]) -> Result<()> {
        response::decode_put_ack(bytes, &self.config)
    }
}

// =============================================================================
// Default-configuration shortcuts
// =============================================================================

/// Encode `{tsgetreq, Table, [Key...], Timeout}`
pub fn encode_get(table: &str, key_values: &[Cell], timeout_ms: u32) -> Bytes {
    request::encode_get(table, key_values, timeout_ms)
}

/// Encode `{tsqueryreq, {tsinterpolation, Query, []}, false, undefined}`
pub fn encode_query(query_text: &str) -> Bytes {
    request::encode_query(query_text)
}

/// Encode `{tsputreq, Table, [], [Row...]}`
pub fn encode_put(table: &str, rows: &[Row]) -> Bytes {
    request::encode_put(table, rows)
}

/// Decode a get response into columns and rows
///
/// A backend `rpberrorresp` comes back as [`CodecError::Backend`](crate::CodecError::Backend).
pub fn decode_get_response(bytes: &[u8]) -> Result<QueryResult> {
    Codec::default().decode_get_response(bytes)
}

/// Decode a query response into columns and rows
pub fn decode_query_response(bytes: &[u8]) -> Result<QueryResult> {
    Codec::default().decode_query_response(bytes)
}

/// Decode a put acknowledgement
pub fn decode_put_response(bytes: &[u8]) -> Result<()> {
    Codec::default().decode_put_response(bytes)
}
