//! Time-series Module
//!
//! Typed values carried by get, query and put messages: cells, rows,
//! column descriptors and the query result that ties them together.
//!
//! ## Cell ⇄ Term mapping
//! ```text
//! ┌───────────┬──────────────────────┐
//! │ Cell      │ Term                 │
//! ├───────────┼──────────────────────┤
//! │ String    │ Binary (UTF-8)       │
//! │ Integer   │ Integer              │
//! │ Timestamp │ Integer              │
//! │ Double    │ Float                │
//! │ Boolean   │ Atom true / false    │
//! │ Null      │ [] (empty list)      │
//! └───────────┴──────────────────────┘
//! ```
//!
//! Integer and Timestamp share one wire shape; decoding tells them apart
//! by the column's declared type.

mod cell;
mod column;
mod mapper;
mod result;

pub use cell::{Cell, Row};
pub use column::{ColumnDescriptor, ColumnType};
pub use mapper::map_cell;
pub use result::QueryResult;
