//! Term writer
//!
//! Serializes terms into an output buffer.

use bytes::{BufMut, Bytes, BytesMut};

use super::{tag, Atom, Term, VERSION_MAGIC};

/// Encode a complete message: version marker followed by `term`
pub fn encode_term(term: &Term) -> Bytes {
    let mut writer = TermWriter::new();
    writer.write_version();
    writer.write_term(term);
    writer.finish()
}

/// Appends encoded terms to a growable buffer
///
/// Writing never fails; every [`Term`] variant has an encoding.
#[derive(Debug, Default)]
pub struct TermWriter {
    buf: BytesMut,
}

impl TermWriter {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_version(&mut self) {
        self.buf.put_u8(VERSION_MAGIC);
    }

    pub fn write_term(&mut self, term: &Term) {
        match term {
            Term::Atom(atom) => self.write_atom(atom),
            Term::Binary(bytes) => self.write_binary(bytes),
            Term::Integer(v) => self.write_integer(*v),
            Term::Float(v) => self.write_float(*v),
            Term::List(items) => {
                self.write_list_head(items.len());
                if !items.is_empty() {
                    for item in items {
                        self.write_term(item);
                    }
                    self.write_nil();
                }
            }
            Term::Tuple(items) => {
                self.write_tuple_head(items.len());
                for item in items {
                    self.write_term(item);
                }
            }
        }
    }

    /// Write a tuple header; the caller writes `arity` terms next
    ///
    /// # Panics
    ///
    /// Panics if `arity` exceeds `u32::MAX`.
    pub fn write_tuple_head(&mut self, arity: usize) {
        if arity <= u8::MAX as usize {
            self.buf.put_u8(tag::SMALL_TUPLE);
            self.buf.put_u8(arity as u8);
        } else {
            self.buf.put_u8(tag::LARGE_TUPLE);
            self.buf.put_u32(wire_len(arity, "tuple arity"));
        }
    }

    /// Write a list header
    ///
    /// A zero count writes the nil marker and completes the list. Otherwise
    /// the caller writes `count` terms followed by [`write_nil`](Self::write_nil).
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds `u32::MAX`.
    pub fn write_list_head(&mut self, count: usize) {
        if count == 0 {
            self.write_nil();
        } else {
            self.buf.put_u8(tag::LIST);
            self.buf.put_u32(wire_len(count, "list count"));
        }
    }

    pub fn write_nil(&mut self) {
        self.buf.put_u8(tag::NIL);
    }

    /// # Panics
    ///
    /// Panics if the UTF-8 name exceeds 65535 bytes. Protocol atoms are
    /// far shorter.
    pub fn write_atom(&mut self, atom: &Atom) {
        let name = atom.as_str().as_bytes();
        if name.len() <= u8::MAX as usize {
            self.buf.put_u8(tag::SMALL_ATOM_UTF8);
            self.buf.put_u8(name.len() as u8);
        } else {
            assert!(name.len() <= u16::MAX as usize, "atom name too long");
            self.buf.put_u8(tag::ATOM_UTF8);
            self.buf.put_u16(name.len() as u16);
        }
        self.buf.put_slice(name);
    }

    /// # Panics
    ///
    /// Panics if `bytes` is longer than `u32::MAX`.
    pub fn write_binary(&mut self, bytes: &[u8]) {
        self.buf.put_u8(tag::BINARY);
        self.buf.put_u32(wire_len(bytes.len(), "binary length"));
        self.buf.put_slice(bytes);
    }

    /// Write an integer in the narrowest encoding that holds it
    pub fn write_integer(&mut self, value: i64) {
        if (0..=u8::MAX as i64).contains(&value) {
            self.buf.put_u8(tag::SMALL_INTEGER);
            self.buf.put_u8(value as u8);
        } else if (i32::MIN as i64..=i32::MAX as i64).contains(&value) {
            self.buf.put_u8(tag::INTEGER);
            self.buf.put_i32(value as i32);
        } else {
            let magnitude = value.unsigned_abs().to_le_bytes();
            let len = magnitude.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            self.buf.put_u8(tag::SMALL_BIG);
            self.buf.put_u8(len as u8);
            self.buf.put_u8(u8::from(value < 0));
            self.buf.put_slice(&magnitude[..len]);
        }
    }

    pub fn write_float(&mut self, value: f64) {
        self.buf.put_u8(tag::NEW_FLOAT);
        self.buf.put_f64(value);
    }

    /// Consume the writer and return the encoded bytes
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Length fields are 32 bits wide; a longer value cannot be framed.
fn wire_len(len: usize, what: &str) -> u32 {
    match u32::try_from(len) {
        Ok(len) => len,
        Err(_) => panic!("{} {} does not fit a 32-bit length field", what, len),
    }
}
