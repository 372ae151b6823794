//! Request encoding
//!
//! Builds the fixed tuple shapes the backend expects and serializes them.

use bytes::Bytes;

use crate::term::{encode_term, Atom, Term};
use crate::timeseries::{Cell, Row};

/// `{tsgetreq, Table, [Key...], Timeout}`
pub fn encode_get(table: &str, key_values: &[Cell], timeout_ms: u32) -> Bytes {
    let request = Term::Tuple(vec![
        Term::Atom(Atom::TS_GET_REQ),
        Term::text(table),
        Term::List(key_values.iter().map(Cell::to_term).collect()),
        Term::Integer(i64::from(timeout_ms)),
    ]);
    finish("tsgetreq", &request)
}

/// `{tsqueryreq, {tsinterpolation, Query, []}, false, undefined}`
///
/// No interpolations, no streaming and no cover context.
pub fn encode_query(query_text: &str) -> Bytes {
    let interpolation = Term::Tuple(vec![
        Term::Atom(Atom::TS_INTERPOLATION),
        Term::text(query_text),
        Term::nil(),
    ]);
    let request = Term::Tuple(vec![
        Term::Atom(Atom::TS_QUERY_REQ),
        interpolation,
        Term::from(false),
        Term::Atom(Atom::UNDEFINED),
    ]);
    finish("tsqueryreq", &request)
}

/// `{tsputreq, Table, [], [{Cell...}...]}`
///
/// The column list is always empty; rows are positional.
pub fn encode_put(table: &str, rows: &[Row]) -> Bytes {
    let request = Term::Tuple(vec![
        Term::Atom(Atom::TS_PUT_REQ),
        Term::text(table),
        Term::nil(),
        Term::List(rows.iter().map(Row::to_term).collect()),
    ]);
    finish("tsputreq", &request)
}

fn finish(kind: &str, request: &Term) -> Bytes {
    let bytes = encode_term(request);
    tracing::trace!("Encoded {} ({} bytes)", kind, bytes.len());
    bytes
}
