//! Record codec: a whole [`User`] to bytes and back.
//!
//! Encoding walks the field table in ascending field-number order and omits
//! empty scalars and empty repeated fields, so the encoding is canonical and
//! the default record encodes to zero bytes.
//!
//! Decoding reads tags until the input is exhausted. Known fields with the
//! expected wire type go through the text codec; unknown field numbers and
//! wire-type mismatches are skipped, never rejected, so older decoders accept
//! records carrying fields added later. Any structural error aborts the
//! whole decode.
//!
//! # Beispiel
//!
//! ```
//! use chefwire::{codec, User};
//!
//! let mut builder = User::builder();
//! builder.set_id("u1").add_favorite_recipe_id("r-1");
//! let user = builder.build();
//!
//! let bytes = codec::encode(&user);
//! assert_eq!(bytes, [0x0A, 0x02, b'u', b'1', 0x22, 0x03, b'r', b'-', b'1']);
//! assert_eq!(codec::decode(&bytes).unwrap(), user);
//! assert!(codec::encode(&User::default()).is_empty());
//! ```

use log::{debug, trace, warn};

use crate::builder::UserBuilder;
use crate::cursor::ByteCursor;
use crate::field;
use crate::options::DecodeOptions;
use crate::schema::UserField;
use crate::user::User;
use crate::wire;
use crate::{Error, Result};

/// Canonical encoding of `user`.
pub fn encode(user: &User) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_to(user, &mut buf);
    buf
}

/// Appends the canonical encoding of `user` to `buf`.
pub fn encode_to(user: &User, buf: &mut Vec<u8>) {
    buf.reserve(encoded_len(user));
    for f in UserField::ALL {
        if let Some(text) = user.text(f) {
            if !text.is_empty() {
                field::encode_text(buf, f.number(), text);
            }
        } else if let Some(values) = user.repeated(f) {
            field::encode_repeated_text(buf, f.number(), values);
        }
    }
}

/// Exact number of bytes [`encode`] produces for `user`.
pub fn encoded_len(user: &User) -> usize {
    UserField::ALL
        .into_iter()
        .map(|f| {
            if let Some(text) = user.text(f) {
                if text.is_empty() {
                    0
                } else {
                    field::text_entry_len(f.number(), text)
                }
            } else {
                user.repeated(f)
                    .unwrap_or_default()
                    .iter()
                    .map(|v| field::text_entry_len(f.number(), v))
                    .sum()
            }
        })
        .sum()
}

/// Decodes `data` with default (unlimited) options.
pub fn decode(data: &[u8]) -> Result<User> {
    decode_with_options(data, &DecodeOptions::default())
}

/// Decodes `data` into a fresh record.
///
/// Returns the first error encountered; no partially decoded record escapes.
pub fn decode_with_options(data: &[u8], options: &DecodeOptions) -> Result<User> {
    let mut builder = UserBuilder::new();
    merge_entries(&mut builder, data, options)?;
    Ok(builder.into_user())
}

/// Applies the entries in `data` to `builder`: scalars are replaced (last
/// entry wins), repeated fields are appended.
///
/// All-or-nothing: on error `builder` is left exactly as it was.
pub fn merge_from_bytes(
    builder: &mut UserBuilder,
    data: &[u8],
    options: &DecodeOptions,
) -> Result<()> {
    let mut staged = builder.clone();
    merge_entries(&mut staged, data, options)?;
    *builder = staged;
    Ok(())
}

fn merge_entries(builder: &mut UserBuilder, data: &[u8], options: &DecodeOptions) -> Result<()> {
    let mut cursor = ByteCursor::new(data);
    while cursor.has_remaining() {
        let offset = cursor.position();
        // Feldnummern jenseits des Schemas werden wie unbekannte uebersprungen
        let (number, wire_type) = wire::read_key(&mut cursor)?;
        let known = u32::try_from(number).ok().and_then(UserField::from_number);
        match known {
            Some(f) if wire_type == f.kind().wire_type() => {
                if f.kind().is_repeated() {
                    check_repeated_limit(builder, f, options)?;
                }
                let text = field::decode_text(&mut cursor, f.number(), options.max_text_length())
                    .map_err(|e| {
                        if matches!(e, Error::StringLengthExceeded { .. }) {
                            warn!("field {} ({}) rejected at offset {offset}: {e}", f.number(), f.name());
                        }
                        e
                    })?;
                trace!("field {} ({}) len={} at offset {offset}", f.number(), f.name(), text.len());
                builder.accept(f, text.to_owned());
            }
            Some(f) => {
                debug!(
                    "skipping field {} ({}) with unexpected wire type {} at offset {offset}",
                    f.number(),
                    f.name(),
                    wire_type.name()
                );
                field::skip(&mut cursor, number, wire_type)?;
            }
            None => {
                debug!(
                    "skipping unknown field {number} (wire type {}) at offset {offset}",
                    wire_type.name()
                );
                field::skip(&mut cursor, number, wire_type)?;
            }
        }
    }
    Ok(())
}

fn check_repeated_limit(builder: &UserBuilder, f: UserField, options: &DecodeOptions) -> Result<()> {
    let Some(max) = options.max_repeated_count() else {
        return Ok(());
    };
    if builder.entry_count(f) >= max as usize {
        warn!("field {} ({}) exceeds {max} entries", f.number(), f.name());
        return Err(Error::RepeatedLimitExceeded {
            field_number: f.number(),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::varint;
    use crate::wire::{MAX_FIELD_NUMBER, Tag, WireType};

    fn full_user() -> User {
        let mut b = User::builder();
        b.set_id("u1")
            .set_display_name("Ada")
            .set_email("ada@example.com")
            .add_all_favorite_recipe_ids(["r1", "r2"])
            .add_dietary_restriction("vegetarian")
            .add_all_favorite_cuisines(["Italian", "Thai"]);
        b.build()
    }

    fn entry(buf: &mut Vec<u8>, number: u32, value: &[u8]) {
        Tag::new(number, WireType::LengthDelimited).encode(buf);
        varint::encode(buf, value.len() as u64);
        buf.extend_from_slice(value);
    }

    #[test]
    fn default_record_encodes_to_nothing() {
        assert!(encode(&User::default()).is_empty());
        assert_eq!(encoded_len(&User::default()), 0);
    }

    #[test]
    fn round_trip_full_record() {
        let user = full_user();
        let bytes = encode(&user);
        assert_eq!(bytes.len(), encoded_len(&user));
        assert_eq!(decode(&bytes).unwrap(), user);
    }

    #[test]
    fn round_trip_keeps_empty_list_elements() {
        let mut b = User::builder();
        b.add_favorite_cuisine("").add_favorite_cuisine("Thai");
        let user = b.build();
        let decoded = decode(&encode(&user)).unwrap();
        assert_eq!(decoded.favorite_cuisines(), ["", "Thai"]);
    }

    #[test]
    fn fields_are_written_in_number_order() {
        let user = full_user();
        let numbers: Vec<u32> = crate::wire::RawFields::new(&encode(&user))
            .map(|r| r.unwrap().tag.field_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 4, 5, 6, 6]);
    }

    #[test]
    fn empty_scalars_are_omitted() {
        let mut b = User::builder();
        b.set_email("e");
        assert_eq!(encode(&b.build()), vec![0x1A, 0x01, b'e']);
    }

    #[test]
    fn encode_to_appends() {
        let mut buf = vec![0xFF];
        let mut b = User::builder();
        b.set_id("x");
        encode_to(&b.build(), &mut buf);
        assert_eq!(buf, vec![0xFF, 0x0A, 0x01, b'x']);
    }

    #[test]
    fn order_of_repeated_entries_is_preserved() {
        let mut buf = Vec::new();
        for v in ["a", "b", "c"] {
            entry(&mut buf, 4, v.as_bytes());
        }
        let user = decode(&buf).unwrap();
        assert_eq!(user.favorite_recipe_ids(), ["a", "b", "c"]);
    }

    /// Verstreute Eintraege desselben Feldes werden in Lesereihenfolge angehaengt.
    #[test]
    fn interleaved_repeated_entries_append() {
        let mut buf = Vec::new();
        entry(&mut buf, 6, b"Thai");
        entry(&mut buf, 1, b"u1");
        entry(&mut buf, 6, b"Greek");
        let user = decode(&buf).unwrap();
        assert_eq!(user.favorite_cuisines(), ["Thai", "Greek"]);
        assert_eq!(user.id(), "u1");
    }

    #[test]
    fn duplicate_scalar_last_wins() {
        let mut buf = Vec::new();
        entry(&mut buf, 2, b"first");
        entry(&mut buf, 2, b"second");
        assert_eq!(decode(&buf).unwrap().display_name(), "second");
    }

    #[test]
    fn unknown_length_delimited_field_is_skipped() {
        let mut with = Vec::new();
        let mut without = Vec::new();
        entry(&mut with, 1, b"u1");
        entry(&mut without, 1, b"u1");
        entry(&mut with, 99, &[0xFF, 0x00, 0xC3]);
        entry(&mut with, 5, b"vegan");
        entry(&mut without, 5, b"vegan");
        assert_eq!(decode(&with).unwrap(), decode(&without).unwrap());
    }

    #[test]
    fn field_number_above_tag_range_is_skipped() {
        let mut buf = Vec::new();
        entry(&mut buf, 1, b"u1");
        varint::encode(&mut buf, ((u64::from(MAX_FIELD_NUMBER) + 1) << 3) | 2);
        buf.extend_from_slice(&[0x01, b'x']);
        varint::encode(&mut buf, (u64::from(u32::MAX) + 7) << 3);
        varint::encode(&mut buf, 300);
        assert_eq!(decode(&buf).unwrap().id(), "u1");
    }

    #[test]
    fn field_number_zero_is_rejected() {
        assert_eq!(decode(&[0x02, 0x00]).unwrap_err(), Error::InvalidFieldNumber(0));
    }

    #[test]
    fn unknown_fixed_and_varint_fields_are_skipped() {
        let mut buf = Vec::new();
        Tag::new(7, WireType::Varint).encode(&mut buf);
        varint::encode(&mut buf, u64::MAX);
        Tag::new(8, WireType::Fixed64).encode(&mut buf);
        buf.extend_from_slice(&[0; 8]);
        Tag::new(9, WireType::Fixed32).encode(&mut buf);
        buf.extend_from_slice(&[0; 4]);
        entry(&mut buf, 3, b"e@x");
        assert_eq!(decode(&buf).unwrap().email(), "e@x");
    }

    #[test]
    fn known_field_with_wrong_wire_type_is_skipped() {
        let mut buf = Vec::new();
        Tag::new(1, WireType::Varint).encode(&mut buf);
        varint::encode(&mut buf, 42);
        entry(&mut buf, 2, b"Ada");
        let user = decode(&buf).unwrap();
        assert_eq!(user.id(), "");
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn truncated_after_length_varint() {
        let mut buf = Vec::new();
        entry(&mut buf, 1, b"u1");
        Tag::new(2, WireType::LengthDelimited).encode(&mut buf);
        varint::encode(&mut buf, 3);
        buf.push(b'A');
        assert_eq!(decode(&buf).unwrap_err(), Error::TruncatedInput);
    }

    #[test]
    fn truncated_unknown_field_is_an_error() {
        let mut buf = Vec::new();
        Tag::new(99, WireType::LengthDelimited).encode(&mut buf);
        varint::encode(&mut buf, 10);
        assert_eq!(decode(&buf).unwrap_err(), Error::TruncatedInput);
    }

    #[test]
    fn truncated_tag_is_an_error() {
        assert_eq!(decode(&[0x80]).unwrap_err(), Error::TruncatedInput);
    }

    #[test]
    fn overlong_tag_varint_overflows() {
        assert_eq!(decode(&[0xFF; 11]).unwrap_err(), Error::VarintOverflow);
    }

    #[test]
    fn invalid_utf8_reports_field() {
        let mut buf = Vec::new();
        entry(&mut buf, 5, &[b'o', b'k', 0xFF]);
        assert_eq!(
            decode(&buf).unwrap_err(),
            Error::InvalidEncoding { field_number: 5, valid_up_to: 2 }
        );
    }

    #[test]
    fn invalid_utf8_in_unknown_field_is_ignored() {
        let mut buf = Vec::new();
        entry(&mut buf, 42, &[0xFF, 0xFE]);
        assert!(decode(&buf).unwrap().is_default());
    }

    #[test]
    fn unknown_group_is_skipped() {
        let mut buf = Vec::new();
        entry(&mut buf, 1, b"u1");
        Tag::new(50, WireType::StartGroup).encode(&mut buf);
        Tag::new(1, WireType::Varint).encode(&mut buf);
        varint::encode(&mut buf, 5);
        Tag::new(50, WireType::EndGroup).encode(&mut buf);
        entry(&mut buf, 6, b"Thai");
        let user = decode(&buf).unwrap();
        assert_eq!(user.id(), "u1");
        assert_eq!(user.favorite_cuisines(), ["Thai"]);
    }

    /// Gruppe unter einer bekannten Feldnummer: Wire-Type passt nicht, also skip.
    #[test]
    fn group_under_known_number_is_skipped() {
        let mut buf = Vec::new();
        Tag::new(2, WireType::StartGroup).encode(&mut buf);
        entry(&mut buf, 2, b"inner");
        Tag::new(2, WireType::EndGroup).encode(&mut buf);
        assert!(decode(&buf).unwrap().is_default());
    }

    #[test]
    fn unterminated_group_is_truncated() {
        let mut buf = Vec::new();
        Tag::new(50, WireType::StartGroup).encode(&mut buf);
        assert_eq!(decode(&buf).unwrap_err(), Error::TruncatedInput);
    }

    #[test]
    fn stray_end_group_is_rejected() {
        let mut buf = Vec::new();
        Tag::new(50, WireType::EndGroup).encode(&mut buf);
        assert_eq!(decode(&buf).unwrap_err(), Error::InvalidWireType(4));
    }

    #[test]
    fn decoded_byte_view_matches_wire_span() {
        let mut buf = Vec::new();
        entry(&mut buf, 2, "Zoë".as_bytes());
        let user = decode(&buf).unwrap();
        assert_eq!(user.display_name_bytes(), &buf[2..]);
    }

    #[test]
    fn max_text_length_is_enforced() {
        let mut buf = Vec::new();
        entry(&mut buf, 1, b"abcdef");
        let opts = DecodeOptions::default().with_max_text_length(4);
        assert_eq!(
            decode_with_options(&buf, &opts).unwrap_err(),
            Error::StringLengthExceeded { length: 6, max: 4 }
        );
    }

    #[test]
    fn max_repeated_count_is_enforced() {
        let mut buf = Vec::new();
        for v in ["a", "b", "c"] {
            entry(&mut buf, 6, v.as_bytes());
        }
        let opts = DecodeOptions::default().with_max_repeated_count(2);
        assert_eq!(
            decode_with_options(&buf, &opts).unwrap_err(),
            Error::RepeatedLimitExceeded { field_number: 6, max: 2 }
        );
        let opts = DecodeOptions::default().with_max_repeated_count(3);
        assert_eq!(decode_with_options(&buf, &opts).unwrap().favorite_cuisines_count(), 3);
    }

    #[test]
    fn merge_from_bytes_applies_merge_semantics() {
        let mut b = User::builder();
        b.set_id("u1").set_email("old@x").add_favorite_cuisine("Thai");

        let mut buf = Vec::new();
        entry(&mut buf, 3, b"new@x");
        entry(&mut buf, 6, b"Greek");
        merge_from_bytes(&mut b, &buf, &DecodeOptions::default()).unwrap();

        let user = b.build();
        assert_eq!(user.id(), "u1");
        assert_eq!(user.email(), "new@x");
        assert_eq!(user.favorite_cuisines(), ["Thai", "Greek"]);
    }

    #[test]
    fn merge_from_bytes_is_all_or_nothing() {
        let mut b = User::builder();
        b.set_id("u1");
        let before = b.clone();

        let mut buf = Vec::new();
        entry(&mut buf, 1, b"u2");
        entry(&mut buf, 6, b"Greek");
        buf.extend_from_slice(&[0x32, 0x09]);
        assert_eq!(
            merge_from_bytes(&mut b, &buf, &DecodeOptions::default()).unwrap_err(),
            Error::TruncatedInput
        );
        assert_eq!(b, before);
    }
}
