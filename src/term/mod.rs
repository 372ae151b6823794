//! Term Module
//!
//! The term value model and its binary encoding (Erlang external term
//! format, restricted to the subset the time-series messages use).
//!
//! ## Layout
//! ```text
//! ┌──────────┬──────────┬──────────────────────────────┐
//! │ 131 (1)  │ Tag (1)  │    Tag-specific body ...     │
//! └──────────┴──────────┴──────────────────────────────┘
//! ```
//!
//! ### Tags
//! - 97:  SMALL_INTEGER   - u8
//! - 98:  INTEGER         - i32 BE
//! - 110: SMALL_BIG       - n (1) + sign (1) + n bytes little-endian
//! - 111: LARGE_BIG       - n (4) + sign (1) + n bytes little-endian
//! - 70:  NEW_FLOAT       - f64 BE
//! - 99:  FLOAT           - 31 bytes of NUL-padded text (read only)
//! - 104: SMALL_TUPLE     - arity (1) + elements
//! - 105: LARGE_TUPLE     - arity (4) + elements
//! - 106: NIL             - empty list / list terminator
//! - 108: LIST            - count (4) + elements + tail
//! - 109: BINARY          - len (4) + bytes
//! - 100/115: ATOM / SMALL_ATOM           - Latin-1 name (read only)
//! - 118/119: ATOM_UTF8 / SMALL_ATOM_UTF8 - UTF-8 name

mod value;
mod writer;
mod reader;

pub use value::{Atom, Term};
pub use writer::{encode_term, TermWriter};
pub use reader::{read_term, TermReader};

/// Leading byte of every encoded message
pub const VERSION_MAGIC: u8 = 131;

pub(crate) mod tag {
    pub const NEW_FLOAT: u8 = 70;
    pub const SMALL_INTEGER: u8 = 97;
    pub const INTEGER: u8 = 98;
    pub const FLOAT: u8 = 99;
    pub const ATOM: u8 = 100;
    pub const SMALL_TUPLE: u8 = 104;
    pub const LARGE_TUPLE: u8 = 105;
    pub const NIL: u8 = 106;
    pub const LIST: u8 = 108;
    pub const BINARY: u8 = 109;
    pub const SMALL_BIG: u8 = 110;
    pub const LARGE_BIG: u8 = 111;
    pub const SMALL_ATOM: u8 = 115;
    pub const ATOM_UTF8: u8 = 118;
    pub const SMALL_ATOM_UTF8: u8 = 119;
}
