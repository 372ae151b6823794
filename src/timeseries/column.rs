//! Column metadata

use std::fmt;

use crate::error::{CodecError, Result};

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Varchar,
    Sint64,
    Double,
    Timestamp,
    Boolean,
    Blob,
}

impl ColumnType {
    /// Parse a backend type name, ignoring ASCII case
    pub fn from_wire_name(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "VARCHAR" => Ok(ColumnType::Varchar),
            "SINT64" => Ok(ColumnType::Sint64),
            "DOUBLE" => Ok(ColumnType::Double),
            "TIMESTAMP" => Ok(ColumnType::Timestamp),
            "BOOLEAN" => Ok(ColumnType::Boolean),
            "BLOB" => Ok(ColumnType::Blob),
            _ => Err(CodecError::UnknownColumnType(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Sint64 => "SINT64",
            ColumnType::Double => "DOUBLE",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Blob => "BLOB",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and declared type of one result column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    name: String,
    column_type: ColumnType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }
}
