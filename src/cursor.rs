//! Forward-only byte reader over an immutable buffer.
//!
//! All reads are bounds-checked and report [`Error::TruncatedInput`] instead
//! of panicking. A failed [`read_bytes`](ByteCursor::read_bytes) or
//! [`skip`](ByteCursor::skip) leaves the position unchanged; a failed
//! [`read_varint`](ByteCursor::read_varint) has already consumed the bytes it
//! looked at.

use crate::{Error, Result, varint};

/// Reads bytes and varints from a borrowed slice, front to back.
///
/// Slices returned by [`read_bytes`](Self::read_bytes) borrow from the
/// underlying buffer (zero-copy), so their lifetime is tied to the input and
/// not to the cursor.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at the first byte of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Liest ein einzelnes Byte.
    #[inline(always)]
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.pos).ok_or(Error::TruncatedInput)?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads a base-128 little-endian varint.
    #[inline]
    pub fn read_varint(&mut self) -> Result<u64> {
        varint::decode(self)
    }

    /// Returns the next `n` bytes and advances past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::TruncatedInput)?;
        let bytes = self.data.get(self.pos..end).ok_or(Error::TruncatedInput)?;
        self.pos = end;
        Ok(bytes)
    }

    /// Advances past `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// `true` while the cursor has not reached the end of the buffer.
    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.pos < self.data.len()
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current byte offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The bytes between `start` and the current position.
    ///
    /// Used to recover the raw span of an entry after skipping it.
    pub(crate) fn span_from(&self, start: usize) -> &'a [u8] {
        &self.data[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cursor_starts_at_zero() {
        let c = ByteCursor::new(&[1, 2, 3]);
        assert_eq!(c.position(), 0);
        assert_eq!(c.remaining_len(), 3);
        assert!(c.has_remaining());
    }

    #[test]
    fn empty_buffer_has_nothing_remaining() {
        let c = ByteCursor::new(&[]);
        assert!(!c.has_remaining());
        assert_eq!(c.remaining_len(), 0);
    }

    #[test]
    fn read_byte_advances() {
        let mut c = ByteCursor::new(&[0xAB, 0xCD]);
        assert_eq!(c.read_byte().unwrap(), 0xAB);
        assert_eq!(c.read_byte().unwrap(), 0xCD);
        assert_eq!(c.read_byte().unwrap_err(), Error::TruncatedInput);
        assert!(!c.has_remaining());
    }

    #[test]
    fn read_bytes_returns_span() {
        let data = [1, 2, 3, 4, 5];
        let mut c = ByteCursor::new(&data);
        assert_eq!(c.read_bytes(2).unwrap(), &[1, 2]);
        assert_eq!(c.read_bytes(3).unwrap(), &[3, 4, 5]);
        assert!(!c.has_remaining());
    }

    #[test]
    fn read_zero_bytes_is_empty_span() {
        let mut c = ByteCursor::new(&[]);
        assert_eq!(c.read_bytes(0).unwrap(), &[] as &[u8]);
    }

    /// Ein fehlgeschlagener Read darf die Position nicht veraendern.
    #[test]
    fn read_bytes_truncated_keeps_position() {
        let mut c = ByteCursor::new(&[1, 2, 3]);
        c.read_byte().unwrap();
        assert_eq!(c.read_bytes(5).unwrap_err(), Error::TruncatedInput);
        assert_eq!(c.position(), 1);
        assert_eq!(c.read_bytes(2).unwrap(), &[2, 3]);
    }

    #[test]
    fn truncated_varint_consumes_its_bytes() {
        let mut c = ByteCursor::new(&[0x80, 0x80]);
        assert_eq!(c.read_varint().unwrap_err(), Error::TruncatedInput);
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn read_bytes_huge_length_does_not_overflow() {
        let mut c = ByteCursor::new(&[1]);
        c.read_byte().unwrap();
        assert_eq!(c.read_bytes(usize::MAX).unwrap_err(), Error::TruncatedInput);
    }

    #[test]
    fn skip_advances() {
        let mut c = ByteCursor::new(&[1, 2, 3]);
        c.skip(2).unwrap();
        assert_eq!(c.position(), 2);
        assert_eq!(c.skip(2).unwrap_err(), Error::TruncatedInput);
    }

    #[test]
    fn read_varint_delegates() {
        let mut c = ByteCursor::new(&[0xAC, 0x02, 0x01]);
        assert_eq!(c.read_varint().unwrap(), 300);
        assert_eq!(c.read_varint().unwrap(), 1);
        assert!(!c.has_remaining());
    }

    #[test]
    fn span_from_covers_consumed_bytes() {
        let data = [9, 8, 7, 6];
        let mut c = ByteCursor::new(&data);
        c.skip(1).unwrap();
        let start = c.position();
        c.skip(2).unwrap();
        assert_eq!(c.span_from(start), &[8, 7]);
    }
}
