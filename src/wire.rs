//! Tags, wire types and schema-less skipping.
//!
//! Every encoded entry starts with a tag varint `(field_number << 3) |
//! wire_type`. The wire type alone determines how long the value is, which
//! is what lets a decoder step over fields it does not know.

use log::trace;

use crate::cursor::ByteCursor;
use crate::{Error, Result, varint};

/// Largest field number a tag can carry (29 bits).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Encoding format of a single entry's value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// A single varint.
    Varint = 0,
    /// Eight little-endian bytes.
    Fixed64 = 1,
    /// A length varint followed by that many bytes.
    LengthDelimited = 2,
    /// Deprecated group start.
    StartGroup = 3,
    /// Deprecated group end.
    EndGroup = 4,
    /// Four little-endian bytes.
    Fixed32 = 5,
}

impl WireType {
    /// Maps the low three tag bits to a wire type.
    pub fn from_u8(v: u8) -> Result<Self> {
        match v {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            3 => Ok(Self::StartGroup),
            4 => Ok(Self::EndGroup),
            5 => Ok(Self::Fixed32),
            other => Err(Error::InvalidWireType(other)),
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Kurzname fuer Diagnoseausgaben.
    pub fn name(self) -> &'static str {
        match self {
            Self::Varint => "varint",
            Self::Fixed64 => "fixed64",
            Self::LengthDelimited => "len",
            Self::StartGroup => "sgroup",
            Self::EndGroup => "egroup",
            Self::Fixed32 => "fixed32",
        }
    }
}

/// A decoded entry prefix: field number plus wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    /// # Panics
    ///
    /// If `field_number` is 0 or above [`MAX_FIELD_NUMBER`]; such a tag could
    /// not be read back.
    pub fn new(field_number: u32, wire_type: WireType) -> Self {
        assert!(
            (1..=MAX_FIELD_NUMBER).contains(&field_number),
            "field number {field_number} outside 1..={MAX_FIELD_NUMBER}"
        );
        Self { field_number, wire_type }
    }

    /// The raw tag value `(field_number << 3) | wire_type`.
    #[inline]
    pub fn value(self) -> u64 {
        (u64::from(self.field_number) << 3) | u64::from(self.wire_type.as_u8())
    }

    /// Appends the tag varint to `buf`.
    #[inline]
    pub fn encode(self, buf: &mut Vec<u8>) {
        varint::encode(buf, self.value());
    }

    /// Encoded size of the tag varint.
    #[inline]
    pub fn encoded_len(self) -> usize {
        varint::encoded_len(self.value())
    }

    /// Reads a tag varint and splits it into field number and wire type.
    ///
    /// Stricter than [`read_key`]: numbers above [`MAX_FIELD_NUMBER`] are
    /// rejected, so every decoded `Tag` can be encoded again.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let (number, wire_type) = read_key(cursor)?;
        let field_number = u32::try_from(number)
            .ok()
            .filter(|&n| n <= MAX_FIELD_NUMBER)
            .ok_or(Error::InvalidFieldNumber(number))?;
        Ok(Self { field_number, wire_type })
    }
}

/// Reads a tag varint as `(field_number, wire_type)`.
///
/// Only field number 0 is rejected; larger numbers than a schema can declare
/// are returned as-is so the record decoder can skip them.
pub fn read_key(cursor: &mut ByteCursor<'_>) -> Result<(u64, WireType)> {
    let raw = cursor.read_varint()?;
    let wire_type = WireType::from_u8((raw & 0x7) as u8)?;
    let number = raw >> 3;
    if number == 0 {
        return Err(Error::InvalidFieldNumber(0));
    }
    Ok((number, wire_type))
}

/// Reads a length varint and checks that it fits the remaining buffer.
pub(crate) fn read_length(cursor: &mut ByteCursor<'_>) -> Result<usize> {
    let len = cursor.read_varint()?;
    // Laengen jenseits des Restpuffers koennen nie erfuellt werden
    usize::try_from(len)
        .ok()
        .filter(|&n| n <= cursor.remaining_len())
        .ok_or(Error::TruncatedInput)
}

/// Steps over the value of an entry whose tag has already been read.
///
/// A start group is skipped up to its matching end group, nested groups
/// included. An end group without a start is [`Error::InvalidWireType`].
pub fn skip_field(
    cursor: &mut ByteCursor<'_>,
    field_number: u64,
    wire_type: WireType,
) -> Result<()> {
    match wire_type {
        WireType::StartGroup => skip_group(cursor, field_number),
        WireType::EndGroup => Err(Error::InvalidWireType(wire_type.as_u8())),
        _ => skip_value(cursor, wire_type),
    }
}

fn skip_value(cursor: &mut ByteCursor<'_>, wire_type: WireType) -> Result<()> {
    match wire_type {
        WireType::Varint => cursor.read_varint().map(|_| ()),
        WireType::Fixed64 => cursor.skip(8),
        WireType::LengthDelimited => {
            let len = read_length(cursor)?;
            cursor.skip(len)
        }
        WireType::Fixed32 => cursor.skip(4),
        WireType::StartGroup | WireType::EndGroup => {
            Err(Error::InvalidWireType(wire_type.as_u8()))
        }
    }
}

// Offene Gruppen als Stack statt Rekursion: Schachteltiefe ist nur durch die
// Eingabelaenge begrenzt
fn skip_group(cursor: &mut ByteCursor<'_>, field_number: u64) -> Result<()> {
    let mut open = vec![field_number];
    while let Some(&current) = open.last() {
        let (number, wire_type) = read_key(cursor)?;
        match wire_type {
            WireType::StartGroup => open.push(number),
            WireType::EndGroup if number == current => {
                open.pop();
            }
            WireType::EndGroup => return Err(Error::InvalidWireType(wire_type.as_u8())),
            other => skip_value(cursor, other)?,
        }
    }
    Ok(())
}

/// A raw entry seen without schema knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'a> {
    pub tag: Tag,
    /// The value bytes. For length-delimited entries the length prefix is
    /// not included; for varints this is the varint's own encoding; for a
    /// group it is the body including the closing end-group tag.
    pub payload: &'a [u8],
}

/// Iterator over the raw entries of an encoded record.
///
/// Stops after the first error, which is yielded once.
pub struct RawFields<'a> {
    cursor: ByteCursor<'a>,
    failed: bool,
}

impl<'a> RawFields<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            failed: false,
        }
    }

    fn read_next(&mut self) -> Result<RawField<'a>> {
        let tag = Tag::decode(&mut self.cursor)?;
        let payload = if tag.wire_type == WireType::LengthDelimited {
            let len = read_length(&mut self.cursor)?;
            self.cursor.read_bytes(len)?
        } else {
            let start = self.cursor.position();
            skip_field(&mut self.cursor, u64::from(tag.field_number), tag.wire_type)?;
            self.cursor.span_from(start)
        };
        trace!(
            "raw entry field={} wire_type={} len={}",
            tag.field_number,
            tag.wire_type.name(),
            payload.len()
        );
        Ok(RawField { tag, payload })
    }
}

impl<'a> Iterator for RawFields<'a> {
    type Item = Result<RawField<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.cursor.has_remaining() {
            return None;
        }
        let item = self.read_next();
        self.failed = item.is_err();
        Some(item)
    }
}
