//! Cell type mapper
//!
//! Turns one decoded term into one typed cell.

use super::{Cell, ColumnType};
use crate::error::{CodecError, Result};
use crate::term::Term;

/// Map a decoded term to a cell
///
/// `declared` only separates `Integer` from `Timestamp`; every other
/// shape maps the same way whatever the column says. Terms outside the
/// cell vocabulary (tuples, non-empty lists, non-boolean atoms) are
/// rejected rather than coerced.
pub fn map_cell(term: Term, declared: ColumnType) -> Result<Cell> {
    match term {
        Term::Binary(bytes) => String::from_utf8(bytes.to_vec())
            .map(Cell::String)
            .map_err(|_| CodecError::InvalidUtf8 { context: "cell" }),
        Term::Integer(v) if declared == ColumnType::Timestamp => Ok(Cell::Timestamp(v)),
        Term::Integer(v) => Ok(Cell::Integer(v)),
        Term::Float(v) => Ok(Cell::Double(v)),
        Term::List(items) if items.is_empty() => Ok(Cell::Null),
        Term::Atom(atom) => match atom.as_bool() {
            Some(b) => Ok(Cell::Boolean(b)),
            None => Err(unknown(declared, Term::Atom(atom))),
        },
        term @ (Term::List(_) | Term::Tuple(_)) => Err(unknown(declared, term)),
    }
}

fn unknown(declared: ColumnType, term: Term) -> CodecError {
    CodecError::UnknownCellType {
        column_type: declared,
        term: term.to_string(),
    }
}
