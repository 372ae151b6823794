//! Query result

use super::{ColumnDescriptor, Row};
use crate::error::{CodecError, Result};

/// Columns and rows decoded from one get or query response
///
/// Every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Row>,
}

impl QueryResult {
    /// Build a result, rejecting any row whose width differs from the
    /// column count
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Row>) -> Result<Self> {
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
            return Err(CodecError::RowArity {
                row,
                expected: columns.len(),
                actual: bad.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column called `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    pub fn into_parts(self) -> (Vec<ColumnDescriptor>, Vec<Row>) {
        (self.columns, self.rows)
    }
}
