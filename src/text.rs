// src/text.rs
//
// Delimited text fields shared by every shape's text form.
//
// A record is a run of decimal fields, each followed by a one-byte delimiter:
//   <f0>,<f1>,...,<fn>\0
// The last field of a shape ends in NUL instead of a comma.

use crate::error::{ShapeError, ShapeResult};

pub const FIELD_SEP: u8 = b',';
pub const RECORD_END: u8 = b'\0';

/// Append `value` followed by `delim`.
///
/// Uses the shortest decimal form that parses back to the same double.
pub fn append_f64(text: &mut Vec<u8>, value: f64, delim: u8) {
    text.extend_from_slice(format!("{:?}", value).as_bytes());
    text.push(delim);
}

/// Read position over a shared text buffer.
///
/// Each `consume_*` call stops at the requested delimiter and leaves the
/// cursor one byte past it, so consecutive calls compose.
#[derive(Clone, Debug)]
pub struct TextCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> TextCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn rewind_to(&mut self, pos: usize) {
        self.pos = pos.min(self.buf.len());
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Return the bytes up to `delim` and step over the delimiter.
    ///
    /// A NUL delimiter also accepts end of buffer, since the record end
    /// marker is often stripped by line-oriented readers.
    pub fn consume_field(&mut self, delim: u8) -> ShapeResult<&'a [u8]> {
        let rest = self.remaining();
        // a field never runs past the end of its record
        match rest.iter().position(|&b| b == delim || b == RECORD_END) {
            Some(end) if rest[end] == delim => {
                self.pos += end + 1;
                Ok(&rest[..end])
            }
            Some(end) => Err(ShapeError::malformed(format!(
                "record ended at byte {} before delimiter {:?}",
                self.pos + end,
                delim as char
            ))),
            None if delim == RECORD_END => {
                self.pos = self.buf.len();
                Ok(rest)
            }
            None => Err(ShapeError::malformed(format!(
                "missing delimiter {:?} after byte {}",
                delim as char, self.pos
            ))),
        }
    }

    pub fn consume_f64(&mut self, delim: u8) -> ShapeResult<f64> {
        let start = self.pos;
        let field = self.consume_field(delim)?;
        let parsed = std::str::from_utf8(field)
            .ok()
            .map(str::trim)
            .and_then(|s| s.parse::<f64>().ok());
        match parsed {
            Some(v) => Ok(v),
            None => {
                self.pos = start;
                Err(ShapeError::malformed(format!(
                    "field at byte {} is not a number: {:?}",
                    start,
                    String::from_utf8_lossy(field)
                )))
            }
        }
    }

    /// Consume `N` numeric fields: commas between, NUL after the last.
    ///
    /// The cursor is left untouched if any field fails.
    pub fn consume_record<const N: usize>(&mut self) -> ShapeResult<[f64; N]> {
        let start = self.pos;
        let mut out = [0.0; N];
        for (i, slot) in out.iter_mut().enumerate() {
            let delim = if i + 1 == N { RECORD_END } else { FIELD_SEP };
            match self.consume_f64(delim) {
                Ok(v) => *slot = v,
                Err(err) => {
                    self.rewind_to(start);
                    return Err(err);
                }
            }
        }
        Ok(out)
    }
}
