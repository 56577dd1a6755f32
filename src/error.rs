//! Central error types for the user record wire codec.
//!
//! Decoding is all-or-nothing: every variant aborts the operation that
//! raised it, and no partially populated record is ever handed out.

use core::fmt;

/// All errors raised by cursor, codec, builder and accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The buffer ended in the middle of a tag, length or payload.
    TruncatedInput,
    /// A varint ran past 10 bytes or carried bits beyond the 64th.
    VarintOverflow,
    /// A text payload is not well-formed UTF-8.
    InvalidEncoding {
        /// Field the payload belongs to.
        field_number: u32,
        /// Laenge des gueltigen UTF-8-Praefix im Payload.
        valid_up_to: usize,
    },
    /// An index is outside the current sequence length.
    IndexOutOfRange { index: usize, len: usize },
    /// Wire type 6/7, or an end group without a matching start group.
    InvalidWireType(u8),
    /// Field number 0, or above the largest encodable number where a
    /// [`Tag`](crate::Tag) is required.
    InvalidFieldNumber(u64),
    /// A decoded text exceeds the configured maximum length.
    StringLengthExceeded { length: u64, max: u32 },
    /// A repeated field holds more entries than the configured maximum.
    RepeatedLimitExceeded { field_number: u32, max: u32 },
    /// Reading or writing the encoded stream failed.
    Io(String),
    /// The JSON view of a record could not be parsed or produced.
    Json(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput => write!(f, "truncated input: buffer ended mid-field"),
            Self::VarintOverflow => write!(f, "varint overflow: more than 10 bytes or 64 bits"),
            Self::InvalidEncoding { field_number, valid_up_to } => write!(
                f,
                "invalid UTF-8 in field {field_number} (valid up to byte {valid_up_to})"
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for sequence of length {len}")
            }
            Self::InvalidWireType(wt) => write!(f, "invalid or unsupported wire type {wt}"),
            Self::InvalidFieldNumber(n) => write!(f, "invalid field number {n}"),
            Self::StringLengthExceeded { length, max } => {
                write!(f, "string length {length} exceeds maximum {max}")
            }
            Self::RepeatedLimitExceeded { field_number, max } => write!(
                f,
                "repeated field {field_number} exceeds maximum of {max} entries"
            ),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl Error {
    /// Erstellt einen `IndexOutOfRange` Fehler.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Erstellt einen `InvalidEncoding` Fehler aus einem `Utf8Error`.
    pub fn invalid_encoding(field_number: u32, err: core::str::Utf8Error) -> Self {
        Self::InvalidEncoding {
            field_number,
            valid_up_to: err.valid_up_to(),
        }
    }
}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
