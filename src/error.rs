//! Error types for tsterm
//!
//! Every failure the codec can report falls into one of three kinds:
//! malformed bytes, a well-formed message that breaks the message schema,
//! or a structured error returned by the backend itself.

use thiserror::Error;

use crate::timeseries::ColumnType;

/// Result type alias using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

/// Broad classification of a [`CodecError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bytes violate the binary layout
    MalformedEncoding,

    /// Valid bytes that do not match the expected message shape
    ProtocolViolation,

    /// The backend answered with `rpberrorresp`
    BackendError,
}

/// Unified error type for encode/decode operations
#[derive(Debug, Error)]
pub enum CodecError {
    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Malformed encoding at byte {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Unexpected term: expected {expected}, found {found}")]
    UnexpectedTerm { expected: &'static str, found: String },

    #[error("Unrecognized response tag: {0}")]
    UnrecognizedResponse(String),

    #[error("Unknown column type: {0}")]
    UnknownColumnType(String),

    #[error("Column count mismatch: {names} names but {types} types")]
    ColumnCountMismatch { names: usize, types: usize },

    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowArity {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown cell type for {column_type} column: {term}")]
    UnknownCellType {
        column_type: ColumnType,
        term: String,
    },

    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 { context: &'static str },

    // -------------------------------------------------------------------------
    // Backend Errors
    // -------------------------------------------------------------------------
    #[error("Backend error {code}: {message}")]
    Backend { message: String, code: i64 },
}

impl CodecError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Malformed { .. } => ErrorKind::MalformedEncoding,
            CodecError::Backend { .. } => ErrorKind::BackendError,
            CodecError::UnexpectedTerm { .. }
            | CodecError::UnrecognizedResponse(_)
            | CodecError::UnknownColumnType(_)
            | CodecError::ColumnCountMismatch { .. }
            | CodecError::RowArity { .. }
            | CodecError::UnknownCellType { .. }
            | CodecError::InvalidUtf8 { .. } => ErrorKind::ProtocolViolation,
        }
    }

    /// True if this is a structured error returned by the backend
    pub fn is_backend(&self) -> bool {
        self.kind() == ErrorKind::BackendError
    }

    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        CodecError::Malformed {
            offset,
            reason: reason.into(),
        }
    }
}
