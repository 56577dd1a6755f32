//! Base-128 little-endian varints.
//!
//! Each byte carries 7 data bits; the high bit is the continuation flag. The
//! least significant group comes first, the last byte has the flag cleared.
//! A `u64` needs at most [`MAX_VARINT_LEN`] bytes.

use crate::cursor::ByteCursor;
use crate::{Error, Result};

/// Longest valid varint encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Appends `value` as a varint to `buf`.
#[inline]
pub fn encode(buf: &mut Vec<u8>, value: u64) {
    if value < 0x80 {
        // Fast-Path: Single-Byte (Tags und kurze Laengen)
        buf.push(value as u8);
        return;
    }
    let mut v = value;
    loop {
        let low7 = (v & 0x7F) as u8;
        v >>= 7;
        if v == 0 {
            buf.push(low7);
            break;
        }
        buf.push(0x80 | low7);
    }
}

/// Number of bytes [`encode`] writes for `value`.
#[inline]
pub fn encoded_len(value: u64) -> usize {
    // 64 Bits / 7 aufgerundet; value | 1 damit 0 ein Byte ergibt
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Reads a varint from `cursor`.
///
/// Fails with [`Error::TruncatedInput`] when the buffer ends before a byte
/// with a cleared continuation bit, and with [`Error::VarintOverflow`] when
/// the tenth byte continues or holds bits past the 64th.
#[inline]
pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<u64> {
    let byte = cursor.read_byte()?;
    if byte & 0x80 == 0 {
        return Ok(u64::from(byte));
    }
    let mut result = u64::from(byte & 0x7F);
    let mut shift: u32 = 7;
    loop {
        let byte = cursor.read_byte()?;
        let data = u64::from(byte & 0x7F);
        // 10. Byte (shift 63): nur Daten-Bit 0 passt noch in u64, keine Fortsetzung
        if shift == 63 && (data > 1 || byte & 0x80 != 0) {
            return Err(Error::VarintOverflow);
        }
        result |= data << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
    }
}
