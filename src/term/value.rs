//! Term value definitions
//!
//! The closed set of terms exchanged with the backend.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

/// An atom name
///
/// Message tags and fixed protocol atoms are compile-time constants;
/// atoms read off the wire own their name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom(Cow<'static, str>);

impl Atom {
    pub const TS_GET_REQ: Atom = Atom::from_static("tsgetreq");
    pub const TS_GET_RESP: Atom = Atom::from_static("tsgetresp");
    pub const TS_QUERY_REQ: Atom = Atom::from_static("tsqueryreq");
    pub const TS_QUERY_RESP: Atom = Atom::from_static("tsqueryresp");
    pub const TS_INTERPOLATION: Atom = Atom::from_static("tsinterpolation");
    pub const TS_PUT_REQ: Atom = Atom::from_static("tsputreq");
    pub const TS_PUT_RESP: Atom = Atom::from_static("tsputresp");
    pub const TS_DEL_REQ: Atom = Atom::from_static("tsdelreq");
    pub const TS_DEL_RESP: Atom = Atom::from_static("tsdelresp");
    pub const RPB_ERROR_RESP: Atom = Atom::from_static("rpberrorresp");
    pub const UNDEFINED: Atom = Atom::from_static("undefined");
    pub const TRUE: Atom = Atom::from_static("true");
    pub const FALSE: Atom = Atom::from_static("false");

    /// Atom backed by a static name
    pub const fn from_static(name: &'static str) -> Self {
        Atom(Cow::Borrowed(name))
    }

    /// Atom with an owned name
    pub fn new(name: impl Into<String>) -> Self {
        Atom(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The boolean this atom spells, if any
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl From<bool> for Atom {
    fn from(value: bool) -> Self {
        if value {
            Atom::TRUE
        } else {
            Atom::FALSE
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded or to-be-encoded term
///
/// Tree-shaped and immutable once built. The empty list doubles as the
/// nil terminator and as the protocol's null cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Atom(Atom),
    Binary(Bytes),
    Integer(i64),
    Float(f64),
    /// Proper list; always nil-terminated on the wire
    List(Vec<Term>),
    Tuple(Vec<Term>),
}

impl Term {
    /// The empty list
    pub const fn nil() -> Self {
        Term::List(Vec::new())
    }

    /// Binary term holding UTF-8 text
    pub fn text(s: &str) -> Self {
        Term::Binary(Bytes::copy_from_slice(s.as_bytes()))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Term::List(items) if items.is_empty())
    }

    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Term::Atom(_) => "atom",
            Term::Binary(_) => "binary",
            Term::Integer(_) => "integer",
            Term::Float(_) => "float",
            Term::List(items) if items.is_empty() => "nil",
            Term::List(_) => "list",
            Term::Tuple(_) => "tuple",
        }
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Term::Atom(atom)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Integer(value)
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Float(value)
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Atom(Atom::from(value))
    }
}

/// Erlang-style rendering, e.g. `{tsgetreq,<<"t">>,[1],5000}`
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(atom) => write!(f, "{}", atom),
            Term::Binary(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => write!(f, "<<{:?}>>", s),
                Err(_) => write!(f, "<<{} bytes>>", bytes.len()),
            },
            Term::Integer(v) => write!(f, "{}", v),
            Term::Float(v) => write!(f, "{:?}", v),
            Term::List(items) => write_seq(f, '[', items, ']'),
            Term::Tuple(items) => write_seq(f, '{', items, '}'),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: char, items: &[Term], close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}
