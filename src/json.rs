//! JSON view of a record for tooling and fixtures.
//!
//! Keys are the schema field names (`id`, `display_name`, ...). Missing keys
//! take their default, unknown keys are ignored, and `uid` is accepted for
//! `id` as remote user documents name it that way.

use crate::builder::UserBuilder;
use crate::user::User;
use crate::Result;

/// Serializes `user` as a JSON object.
pub fn to_json(user: &User, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(user)?
    } else {
        serde_json::to_string(user)?
    };
    Ok(json)
}

/// Parses a JSON object into a builder (not yet frozen).
pub fn builder_from_json(json: &str) -> Result<UserBuilder> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a JSON object into a frozen record.
pub fn from_json(json: &str) -> Result<User> {
    builder_from_json(json).map(UserBuilder::into_user)
}
