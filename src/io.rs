//! Reading and writing a record from `std::io` streams.
//!
//! A stream holds exactly one record and its end is the record's end; no
//! length prefix is written. Callers that put several records into one
//! stream have to frame them themselves.

use std::io::{Read, Write};

use crate::options::DecodeOptions;
use crate::user::User;
use crate::{Result, codec};

/// Reads `reader` to its end and decodes the bytes.
///
/// An empty stream yields the default record.
pub fn read_user<R: Read>(mut reader: R, options: &DecodeOptions) -> Result<User> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    codec::decode_with_options(&buf, options)
}

/// Writes the canonical encoding of `user` to `writer`.
pub fn write_user<W: Write>(mut writer: W, user: &User) -> Result<()> {
    writer.write_all(&codec::encode(user))?;
    writer.flush()?;
    Ok(())
}
