//! # tsterm
//!
//! Codec between time-series get/query/put messages and the external
//! term format spoken by a term-based database backend:
//! - Byte-exact request encoding for the fixed message tuples
//! - Single-pass response decoding into typed columns and rows
//! - Column-aware cell typing (timestamps vs plain integers)
//! - Structured backend errors kept apart from malformed input
//!
//! ## Data Flow
//!
//! ```text
//!  request params                               QueryResult
//!        │                                           ▲
//!        ▼                                           │
//! ┌─────────────┐                          ┌───────────────────┐
//! │  protocol   │                          │     protocol      │
//! │  (encode)   │                          │     (decode)      │
//! └──────┬──────┘                          └────────┬──────────┘
//!        │                                          │ per cell
//!        ▼                                          ▼
//! ┌─────────────┐    bytes    ┌─────────────┐  ┌───────────┐
//! │ TermWriter  │ ──────────▶ │ TermReader  │  │ map_cell  │
//! └─────────────┘ (transport) └─────────────┘  └───────────┘
//! ```
//!
//! All operations are pure: no I/O, no shared state.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod term;
pub mod timeseries;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CodecError, ErrorKind, Result};
pub use config::CodecConfig;
pub use protocol::{
    decode_get_response, decode_put_response, decode_query_response, encode_get, encode_put,
    encode_query, Codec,
};
pub use term::{Atom, Term};
pub use timeseries::{Cell, ColumnDescriptor, ColumnType, QueryResult, Row};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tsterm
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
