//! The immutable user record.
//!
//! A [`User`] is only ever produced by [`UserBuilder`] (or by decoding, which
//! goes through a builder). Its fields are private and repeated fields are
//! handed out as shared slices, so a frozen record cannot change.
//!
//! Every text field has two views: the validated `&str` and its UTF-8 bytes.
//! Text is stored as `String`, so the byte view is exactly the span the text
//! was decoded from.
//!
//! # Beispiel
//!
//! ```
//! use chefwire::User;
//!
//! let mut builder = User::builder();
//! builder
//!     .set_id("u1")
//!     .set_display_name("Ada")
//!     .add_favorite_cuisine("Italian")
//!     .add_favorite_cuisine("Thai");
//! let user = builder.build();
//!
//! assert_eq!(user.id(), "u1");
//! assert_eq!(user.email(), "");
//! assert_eq!(user.favorite_cuisines(), ["Italian", "Thai"]);
//! assert!(user.favorite_recipe_ids().is_empty());
//! ```

use serde::Serialize;

use crate::builder::UserBuilder;
use crate::schema::UserField;
use crate::{Error, Result, codec};

/// A frozen user record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct User {
    pub(crate) id: String,
    pub(crate) display_name: String,
    pub(crate) email: String,
    pub(crate) favorite_recipe_ids: Vec<String>,
    pub(crate) dietary_restrictions: Vec<String>,
    pub(crate) favorite_cuisines: Vec<String>,
}

fn element(seq: &[String], index: usize) -> Result<&str> {
    seq.get(index)
        .map(String::as_str)
        .ok_or_else(|| Error::index_out_of_range(index, seq.len()))
}

impl User {
    /// An empty builder.
    pub fn builder() -> UserBuilder {
        UserBuilder::new()
    }

    /// A builder seeded with this record's values.
    ///
    /// This is how a record is "modified": the result of `build()` is a new
    /// record, `self` stays untouched.
    pub fn to_builder(&self) -> UserBuilder {
        UserBuilder::from(self.clone())
    }

    /// `true` if every field holds its default (empty) value.
    pub fn is_default(&self) -> bool {
        self.id.is_empty()
            && self.display_name.is_empty()
            && self.email.is_empty()
            && self.favorite_recipe_ids.is_empty()
            && self.dietary_restrictions.is_empty()
            && self.favorite_cuisines.is_empty()
    }

    /// Canonical wire encoding, see [`codec::encode`].
    pub fn encode_to_vec(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Exact size of [`encode_to_vec`](Self::encode_to_vec).
    pub fn encoded_len(&self) -> usize {
        codec::encoded_len(self)
    }

    /// Decodes a record with default options, see [`codec::decode`].
    pub fn decode(data: &[u8]) -> Result<Self> {
        codec::decode(data)
    }

    // --- Skalare Felder ---

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn id_bytes(&self) -> &[u8] {
        self.id.as_bytes()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn display_name_bytes(&self) -> &[u8] {
        self.display_name.as_bytes()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn email_bytes(&self) -> &[u8] {
        self.email.as_bytes()
    }

    // --- favorite_recipe_ids (4) ---

    pub fn favorite_recipe_ids(&self) -> &[String] {
        &self.favorite_recipe_ids
    }

    pub fn favorite_recipe_ids_count(&self) -> usize {
        self.favorite_recipe_ids.len()
    }

    /// Fails with [`Error::IndexOutOfRange`] past the end.
    pub fn favorite_recipe_id(&self, index: usize) -> Result<&str> {
        element(&self.favorite_recipe_ids, index)
    }

    pub fn favorite_recipe_id_bytes(&self, index: usize) -> Result<&[u8]> {
        self.favorite_recipe_id(index).map(str::as_bytes)
    }

    // --- dietary_restrictions (5) ---

    pub fn dietary_restrictions(&self) -> &[String] {
        &self.dietary_restrictions
    }

    pub fn dietary_restrictions_count(&self) -> usize {
        self.dietary_restrictions.len()
    }

    /// Fails with [`Error::IndexOutOfRange`] past the end.
    pub fn dietary_restriction(&self, index: usize) -> Result<&str> {
        element(&self.dietary_restrictions, index)
    }

    pub fn dietary_restriction_bytes(&self, index: usize) -> Result<&[u8]> {
        self.dietary_restriction(index).map(str::as_bytes)
    }

    // --- favorite_cuisines (6) ---

    pub fn favorite_cuisines(&self) -> &[String] {
        &self.favorite_cuisines
    }

    pub fn favorite_cuisines_count(&self) -> usize {
        self.favorite_cuisines.len()
    }

    /// Fails with [`Error::IndexOutOfRange`] past the end.
    pub fn favorite_cuisine(&self, index: usize) -> Result<&str> {
        element(&self.favorite_cuisines, index)
    }

    pub fn favorite_cuisine_bytes(&self, index: usize) -> Result<&[u8]> {
        self.favorite_cuisine(index).map(str::as_bytes)
    }

    // --- Generischer Zugriff ueber die Feldtabelle ---

    /// Text view of a scalar field; `None` for repeated fields.
    pub fn text(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Id => Some(&self.id),
            UserField::DisplayName => Some(&self.display_name),
            UserField::Email => Some(&self.email),
            _ => None,
        }
    }

    /// Elements of a repeated field; `None` for scalar fields.
    pub fn repeated(&self, field: UserField) -> Option<&[String]> {
        match field {
            UserField::FavoriteRecipeIds => Some(&self.favorite_recipe_ids),
            UserField::DietaryRestrictions => Some(&self.dietary_restrictions),
            UserField::FavoriteCuisines => Some(&self.favorite_cuisines),
            _ => None,
        }
    }
}
