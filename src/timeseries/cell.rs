//! Cell and row definitions

use std::fmt;

use crate::term::{Atom, Term};

/// One typed value within a row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    String(String),
    Integer(i64),
    /// Milliseconds since the epoch
    Timestamp(i64),
    Double(f64),
    Boolean(bool),
    Null,
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Infer a cell from command-line text
    ///
    /// Empty or `null` is `Null`, `@N` a timestamp, then boolean, integer,
    /// finite double, and finally string. Text wrapped in double quotes is
    /// always a string, so `"42"` or `"NaN"` can still be entered as text.
    pub fn infer(text: &str) -> Cell {
        let text = text.trim();
        if let Some(quoted) = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
        {
            return Cell::String(quoted.to_string());
        }
        if text.is_empty() || text.eq_ignore_ascii_case("null") {
            return Cell::Null;
        }
        if let Some(ts) = text.strip_prefix('@').and_then(|t| t.parse::<i64>().ok()) {
            return Cell::Timestamp(ts);
        }
        if let Ok(b) = text.parse::<bool>() {
            return Cell::Boolean(b);
        }
        if let Ok(v) = text.parse::<i64>() {
            return Cell::Integer(v);
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Double(v),
            _ => Cell::String(text.to_string()),
        }
    }

    /// The term this cell is written as
    ///
    /// `Null` becomes the empty list; it is never written as an atom.
    pub fn to_term(&self) -> Term {
        match self {
            Cell::String(s) => Term::text(s),
            Cell::Integer(v) | Cell::Timestamp(v) => Term::Integer(*v),
            Cell::Double(v) => Term::Float(*v),
            Cell::Boolean(b) => Term::Atom(Atom::from(*b)),
            Cell::Null => Term::nil(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::String(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Double(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Boolean(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{}", s),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Timestamp(v) => write!(f, "@{}", v),
            Cell::Double(v) => write!(f, "{}", v),
            Cell::Boolean(b) => write!(f, "{}", b),
            Cell::Null => f.write_str("NULL"),
        }
    }
}

/// A fixed-arity sequence of cells
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// The tuple this row is written as
    pub fn to_term(&self) -> Term {
        Term::Tuple(self.cells.iter().map(Cell::to_term).collect())
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self::new(cells)
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl IntoIterator for Row {
    type Item = Cell;
    type IntoIter = std::vec::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}
