//! chefwire – wire codec and immutable builder for the ByteChef user record
//!
//! The record is encoded as a stream of `(tag, length, payload)` entries,
//! one per scalar text field and one per element of a repeated text field.
//! Records are assembled in a mutable [`UserBuilder`] and frozen into an
//! immutable [`User`].
//!
//! # Beispiel
//!
//! ```
//! use chefwire::{User, codec};
//!
//! // Build
//! let mut builder = User::builder();
//! builder
//!     .set_id("u1")
//!     .set_display_name("Ada")
//!     .add_favorite_cuisine("Italian")
//!     .add_favorite_cuisine("Thai");
//! let user = builder.build();
//!
//! // Encode
//! let bytes = codec::encode(&user);
//!
//! // Decode
//! let decoded = codec::decode(&bytes).unwrap();
//! assert_eq!(decoded, user);
//! assert_eq!(decoded.favorite_cuisine(1).unwrap(), "Thai");
//! ```

pub mod builder;
pub mod codec;
pub mod cursor;
pub mod error;
pub mod field;
pub mod io;
pub mod json;
pub mod options;
pub mod schema;
pub mod user;
pub mod varint;
pub mod wire;

pub use error::{Error, Result};

// Public API: Record + Builder
pub use builder::UserBuilder;
pub use user::User;

// Public API: Codec
pub use codec::{decode, decode_with_options, encode, encoded_len, merge_from_bytes};
pub use options::DecodeOptions;

// Public API: Schema / Wire
pub use cursor::ByteCursor;
pub use schema::{FieldKind, UserField};
pub use wire::{RawField, RawFields, Tag, WireType};

// Public API: Streams / JSON
pub use io::{read_user, write_user};
pub use json::{from_json, to_json};
