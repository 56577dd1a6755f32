//! Entry codecs for text fields.
//!
//! A text entry is `tag (wire type 2) | length varint | UTF-8 bytes`. A
//! repeated text field is nothing more than several such entries under the
//! same tag; the decoder appends them in the order it meets them.

use crate::cursor::ByteCursor;
use crate::wire::{self, Tag, WireType};
use crate::{Error, Result, varint};

/// Appends one text entry for `field_number`.
pub fn encode_text(buf: &mut Vec<u8>, field_number: u32, value: &str) {
    Tag::new(field_number, WireType::LengthDelimited).encode(buf);
    varint::encode(buf, value.len() as u64);
    buf.extend_from_slice(value.as_bytes());
}

/// Appends one entry per element of `values`, in order.
pub fn encode_repeated_text<S: AsRef<str>>(buf: &mut Vec<u8>, field_number: u32, values: &[S]) {
    for value in values {
        encode_text(buf, field_number, value.as_ref());
    }
}

/// Encoded size of a single text entry, tag included.
pub fn text_entry_len(field_number: u32, value: &str) -> usize {
    Tag::new(field_number, WireType::LengthDelimited).encoded_len()
        + varint::encoded_len(value.len() as u64)
        + value.len()
}

/// Decodes the value of a text entry whose tag has already been read.
///
/// The returned `&str` borrows the exact byte span from the input, so its
/// byte view is identical to what was on the wire.
pub fn decode_text<'a>(
    cursor: &mut ByteCursor<'a>,
    field_number: u32,
    max_len: Option<u32>,
) -> Result<&'a str> {
    let len = cursor.read_varint()?;
    if let Some(max) = max_len {
        if len > u64::from(max) {
            return Err(Error::StringLengthExceeded { length: len, max });
        }
    }
    let len = usize::try_from(len).map_err(|_| Error::TruncatedInput)?;
    let bytes = cursor.read_bytes(len)?;
    std::str::from_utf8(bytes).map_err(|e| Error::invalid_encoding(field_number, e))
}

/// Skips the value of an entry the schema does not accept.
#[inline]
pub fn skip(cursor: &mut ByteCursor<'_>, field_number: u64, wire_type: WireType) -> Result<()> {
    wire::skip_field(cursor, field_number, wire_type)
}
