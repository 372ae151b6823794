//! Term reader
//!
//! Single-pass cursor over an encoded message. Offers both whole-term
//! reads and the streaming primitives (tuple/list heads, nil) used to
//! walk a message without materializing it.

use bytes::Bytes;

use super::{tag, Atom, Term, VERSION_MAGIC};
use crate::error::{CodecError, Result};

/// Default nesting limit for [`TermReader::read_term`]
const DEFAULT_MAX_DEPTH: usize = 64;

/// Read one term starting at `cursor`
///
/// Returns the term and the position just past it.
pub fn read_term(bytes: &[u8], cursor: usize) -> Result<(Term, usize)> {
    if cursor > bytes.len() {
        return Err(CodecError::malformed(
            cursor,
            format!("cursor beyond end of {} byte buffer", bytes.len()),
        ));
    }
    let mut reader = TermReader::new(bytes);
    reader.pos = cursor;
    let term = reader.read_term()?;
    Ok((term, reader.position()))
}

/// Cursor over an encoded byte buffer
#[derive(Debug, Clone)]
pub struct TermReader<'a> {
    buf: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> TermReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply `read_term` may nest tuples and lists
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    // =========================================================================
    // Streaming primitives
    // =========================================================================

    pub fn read_version(&mut self) -> Result<()> {
        let start = self.pos;
        let version = self.read_u8()?;
        if version != VERSION_MAGIC {
            return Err(CodecError::malformed(
                start,
                format!("bad version marker {}, expected {}", version, VERSION_MAGIC),
            ));
        }
        Ok(())
    }

    /// Read a tuple header and return its arity
    pub fn read_tuple_head(&mut self) -> Result<usize> {
        let start = self.pos;
        let arity = match self.read_u8()? {
            tag::SMALL_TUPLE => self.read_u8()? as usize,
            tag::LARGE_TUPLE => self.read_u32()? as usize,
            other => return Err(self.unexpected(start, "tuple", other)),
        };
        self.check_count(start, arity, "tuple arity")?;
        Ok(arity)
    }

    /// Read a list header and return its element count
    ///
    /// An empty list is just the nil marker, which this consumes. For a
    /// non-empty list the caller reads `count` elements and then calls
    /// [`read_nil`](Self::read_nil).
    pub fn read_list_head(&mut self) -> Result<usize> {
        let start = self.pos;
        match self.read_u8()? {
            tag::NIL => Ok(0),
            tag::LIST => {
                let count = self.read_u32()? as usize;
                self.check_count(start, count, "list count")?;
                Ok(count)
            }
            other => Err(self.unexpected(start, "list", other)),
        }
    }

    /// Consume the nil marker ending a list
    pub fn read_nil(&mut self) -> Result<()> {
        let start = self.pos;
        let found = self.read_u8()?;
        if found != tag::NIL {
            return Err(CodecError::malformed(
                start,
                format!("improper list tail (tag {})", found),
            ));
        }
        Ok(())
    }

    pub fn read_atom(&mut self) -> Result<Atom> {
        let start = self.pos;
        match self.read_u8()? {
            tag::SMALL_ATOM_UTF8 => {
                let len = self.read_u8()? as usize;
                self.read_utf8_atom(len)
            }
            tag::ATOM_UTF8 => {
                let len = self.read_u16()? as usize;
                self.read_utf8_atom(len)
            }
            tag::SMALL_ATOM => {
                let len = self.read_u8()? as usize;
                self.read_latin1_atom(len)
            }
            tag::ATOM => {
                let len = self.read_u16()? as usize;
                self.read_latin1_atom(len)
            }
            other => Err(self.unexpected(start, "atom", other)),
        }
    }

    pub fn read_binary(&mut self) -> Result<Bytes> {
        let start = self.pos;
        match self.read_u8()? {
            tag::BINARY => {
                let len = self.read_u32()? as usize;
                Ok(Bytes::copy_from_slice(self.take(len)?))
            }
            other => Err(self.unexpected(start, "binary", other)),
        }
    }

    pub fn read_integer(&mut self) -> Result<i64> {
        let start = self.pos;
        match self.read_u8()? {
            tag::SMALL_INTEGER => Ok(self.read_u8()? as i64),
            tag::INTEGER => Ok(self.read_u32()? as i32 as i64),
            tag::SMALL_BIG => {
                let len = self.read_u8()? as usize;
                self.read_big(start, len)
            }
            tag::LARGE_BIG => {
                let len = self.read_u32()? as usize;
                self.read_big(start, len)
            }
            other => Err(self.unexpected(start, "integer", other)),
        }
    }

    /// Read any supported term
    pub fn read_term(&mut self) -> Result<Term> {
        self.read_term_at(0)
    }

    /// Fail unless every byte has been consumed
    pub fn finish(self) -> Result<()> {
        if self.remaining() != 0 {
            return Err(CodecError::malformed(
                self.pos,
                format!("{} trailing bytes", self.remaining()),
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn read_term_at(&mut self, depth: usize) -> Result<Term> {
        if depth > self.max_depth {
            return Err(CodecError::malformed(
                self.pos,
                format!("nesting deeper than {}", self.max_depth),
            ));
        }

        let start = self.pos;
        match self.peek_u8()? {
            tag::SMALL_INTEGER | tag::INTEGER | tag::SMALL_BIG | tag::LARGE_BIG => {
                Ok(Term::Integer(self.read_integer()?))
            }
            tag::NEW_FLOAT => {
                self.pos += 1;
                Ok(Term::Float(f64::from_bits(self.read_u64()?)))
            }
            tag::FLOAT => {
                self.pos += 1;
                self.read_float_text()
            }
            tag::ATOM | tag::SMALL_ATOM | tag::ATOM_UTF8 | tag::SMALL_ATOM_UTF8 => {
                Ok(Term::Atom(self.read_atom()?))
            }
            tag::BINARY => Ok(Term::Binary(self.read_binary()?)),
            tag::SMALL_TUPLE | tag::LARGE_TUPLE => {
                let arity = self.read_tuple_head()?;
                let mut items = Vec::with_capacity(arity);
                for _ in 0..arity {
                    items.push(self.read_term_at(depth + 1)?);
                }
                Ok(Term::Tuple(items))
            }
            tag::NIL | tag::LIST => {
                let count = self.read_list_head()?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.read_term_at(depth + 1)?);
                }
                if count > 0 {
                    self.read_nil()?;
                }
                Ok(Term::List(items))
            }
            other => Err(CodecError::malformed(start, format!("unknown term tag {}", other))),
        }
    }

    /// Error for a known tag where a different term was required; an
    /// unknown tag is always a layout failure.
    fn unexpected(&self, offset: usize, expected: &'static str, found: u8) -> CodecError {
        match tag_name(found) {
            Some(name) => CodecError::UnexpectedTerm {
                expected,
                found: name.to_string(),
            },
            None => CodecError::malformed(offset, format!("unknown term tag {}", found)),
        }
    }

    /// Every element takes at least one byte, so a count larger than the
    /// remaining input cannot be honest.
    fn check_count(&self, offset: usize, count: usize, what: &str) -> Result<()> {
        if count > self.remaining() {
            return Err(CodecError::malformed(
                offset,
                format!("{} {} exceeds {} remaining bytes", what, count, self.remaining()),
            ));
        }
        Ok(())
    }

    fn read_big(&mut self, start: usize, len: usize) -> Result<i64> {
        let negative = match self.read_u8()? {
            0 => false,
            1 => true,
            sign => {
                return Err(CodecError::malformed(start, format!("bad bignum sign {}", sign)))
            }
        };
        let digits = self.take(len)?;

        let mut magnitude: u64 = 0;
        for (i, &digit) in digits.iter().enumerate() {
            if i >= 8 {
                if digit != 0 {
                    return Err(CodecError::malformed(start, "integer does not fit in 64 bits"));
                }
                continue;
            }
            magnitude |= (digit as u64) << (8 * i);
        }

        if negative {
            if magnitude > i64::MIN.unsigned_abs() {
                return Err(CodecError::malformed(start, "integer does not fit in 64 bits"));
            }
            Ok((magnitude as i64).wrapping_neg())
        } else {
            i64::try_from(magnitude)
                .map_err(|_| CodecError::malformed(start, "integer does not fit in 64 bits"))
        }
    }

    fn read_float_text(&mut self) -> Result<Term> {
        let start = self.pos;
        let raw = self.take(31)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        std::str::from_utf8(&raw[..end])
            .ok()
            .and_then(|text| text.trim().parse::<f64>().ok())
            .map(Term::Float)
            .ok_or_else(|| CodecError::malformed(start, "unparseable float text"))
    }

    fn read_utf8_atom(&mut self, len: usize) -> Result<Atom> {
        let start = self.pos;
        let raw = self.take(len)?;
        let name = std::str::from_utf8(raw)
            .map_err(|_| CodecError::malformed(start, "atom name is not valid UTF-8"))?;
        Ok(Atom::new(name))
    }

    fn read_latin1_atom(&mut self, len: usize) -> Result<Atom> {
        let raw = self.take(len)?;
        Ok(Atom::new(raw.iter().map(|&b| b as char).collect::<String>()))
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::malformed(
                self.pos,
                format!("need {} bytes, {} remaining", len, self.remaining()),
            ));
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn peek_u8(&self) -> Result<u8> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or_else(|| CodecError::malformed(self.pos, "unexpected end of input"))
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = self.peek_u8()?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_u16(&mut self) -> Result<u16> {
        let raw = self.take(2)?;
        Ok(u16::from_be_bytes([raw[0], raw[1]]))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let raw = self.take(4)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let raw = self.take(8)?;
        let mut word = [0u8; 8];
        word.copy_from_slice(raw);
        Ok(u64::from_be_bytes(word))
    }
}

fn tag_name(tag: u8) -> Option<&'static str> {
    Some(match tag {
        tag::SMALL_INTEGER | tag::INTEGER | tag::SMALL_BIG | tag::LARGE_BIG => "integer",
        tag::NEW_FLOAT | tag::FLOAT => "float",
        tag::ATOM | tag::SMALL_ATOM | tag::ATOM_UTF8 | tag::SMALL_ATOM_UTF8 => "atom",
        tag::BINARY => "binary",
        tag::SMALL_TUPLE | tag::LARGE_TUPLE => "tuple",
        tag::NIL => "nil",
        tag::LIST => "list",
        _ => return None,
    })
}
