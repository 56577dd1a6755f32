//! Mutable staging type for [`User`].
//!
//! Setters accept any text eagerly and never fail on content; only indexed
//! replacement checks bounds. Freezing copies (`build`) or moves
//! (`into_user`) the staged values, so a built record never shares storage
//! with the builder.

use serde::Deserialize;

use crate::schema::UserField;
use crate::user::User;
use crate::{Error, Result};

/// Builder for [`User`].
///
/// Mutation takes `&mut self`, so a builder has exactly one writer at a time.
/// Concurrent construction uses one builder per worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserBuilder {
    #[serde(alias = "uid")]
    id: String,
    display_name: String,
    email: String,
    favorite_recipe_ids: Vec<String>,
    dietary_restrictions: Vec<String>,
    favorite_cuisines: Vec<String>,
}

fn replace_at(seq: &mut [String], index: usize, value: String) -> Result<()> {
    let len = seq.len();
    let slot = seq
        .get_mut(index)
        .ok_or_else(|| Error::index_out_of_range(index, len))?;
    *slot = value;
    Ok(())
}

impl UserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the staged values. The builder stays usable and later
    /// edits do not reach the returned record.
    pub fn build(&self) -> User {
        self.clone().into_user()
    }

    /// Freezes by moving the staged values into the record.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            display_name: self.display_name,
            email: self.email,
            favorite_recipe_ids: self.favorite_recipe_ids,
            dietary_restrictions: self.dietary_restrictions,
            favorite_cuisines: self.favorite_cuisines,
        }
    }

    /// Resets every field to its default.
    pub fn clear(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Merges a record into the builder: non-empty scalars replace the
    /// staged value, repeated fields are appended.
    pub fn merge_from(&mut self, other: &User) -> &mut Self {
        for field in UserField::ALL {
            if let Some(text) = other.text(field) {
                if !text.is_empty() {
                    self.accept(field, text.to_owned());
                }
            } else if let Some(values) = other.repeated(field) {
                for value in values {
                    self.accept(field, value.clone());
                }
            }
        }
        self
    }

    /// Stores one decoded value: scalars are replaced, repeated fields get
    /// the value appended.
    pub(crate) fn accept(&mut self, field: UserField, value: String) {
        match field {
            UserField::Id => self.id = value,
            UserField::DisplayName => self.display_name = value,
            UserField::Email => self.email = value,
            UserField::FavoriteRecipeIds => self.favorite_recipe_ids.push(value),
            UserField::DietaryRestrictions => self.dietary_restrictions.push(value),
            UserField::FavoriteCuisines => self.favorite_cuisines.push(value),
        }
    }

    /// Anzahl der Elemente eines Feldes (1 fuer Skalare).
    pub(crate) fn entry_count(&self, field: UserField) -> usize {
        match field {
            UserField::Id | UserField::DisplayName | UserField::Email => 1,
            UserField::FavoriteRecipeIds => self.favorite_recipe_ids.len(),
            UserField::DietaryRestrictions => self.dietary_restrictions.len(),
            UserField::FavoriteCuisines => self.favorite_cuisines.len(),
        }
    }

    // --- id (1) ---

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.id = value.into();
        self
    }

    pub fn clear_id(&mut self) -> &mut Self {
        self.id.clear();
        self
    }

    // --- display_name (2) ---

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.display_name = value.into();
        self
    }

    pub fn clear_display_name(&mut self) -> &mut Self {
        self.display_name.clear();
        self
    }

    // --- email (3) ---

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, value: impl Into<String>) -> &mut Self {
        self.email = value.into();
        self
    }

    pub fn clear_email(&mut self) -> &mut Self {
        self.email.clear();
        self
    }

    // --- favorite_recipe_ids (4) ---

    pub fn favorite_recipe_ids(&self) -> &[String] {
        &self.favorite_recipe_ids
    }

    pub fn add_favorite_recipe_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.favorite_recipe_ids.push(value.into());
        self
    }

    pub fn add_all_favorite_recipe_ids<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.favorite_recipe_ids.extend(values.into_iter().map(Into::into));
        self
    }

    /// Replaces the element at `index`; [`Error::IndexOutOfRange`] otherwise.
    pub fn set_favorite_recipe_id(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        replace_at(&mut self.favorite_recipe_ids, index, value.into())?;
        Ok(self)
    }

    pub fn clear_favorite_recipe_ids(&mut self) -> &mut Self {
        self.favorite_recipe_ids.clear();
        self
    }

    // --- dietary_restrictions (5) ---

    pub fn dietary_restrictions(&self) -> &[String] {
        &self.dietary_restrictions
    }

    pub fn add_dietary_restriction(&mut self, value: impl Into<String>) -> &mut Self {
        self.dietary_restrictions.push(value.into());
        self
    }

    pub fn add_all_dietary_restrictions<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.dietary_restrictions.extend(values.into_iter().map(Into::into));
        self
    }

    /// Replaces the element at `index`; [`Error::IndexOutOfRange`] otherwise.
    pub fn set_dietary_restriction(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        replace_at(&mut self.dietary_restrictions, index, value.into())?;
        Ok(self)
    }

    pub fn clear_dietary_restrictions(&mut self) -> &mut Self {
        self.dietary_restrictions.clear();
        self
    }

    // --- favorite_cuisines (6) ---

    pub fn favorite_cuisines(&self) -> &[String] {
        &self.favorite_cuisines
    }

    pub fn add_favorite_cuisine(&mut self, value: impl Into<String>) -> &mut Self {
        self.favorite_cuisines.push(value.into());
        self
    }

    pub fn add_all_favorite_cuisines<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.favorite_cuisines.extend(values.into_iter().map(Into::into));
        self
    }

    /// Replaces the element at `index`; [`Error::IndexOutOfRange`] otherwise.
    pub fn set_favorite_cuisine(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        replace_at(&mut self.favorite_cuisines, index, value.into())?;
        Ok(self)
    }

    pub fn clear_favorite_cuisines(&mut self) -> &mut Self {
        self.favorite_cuisines.clear();
        self
    }
}

impl From<User> for UserBuilder {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name,
            email: user.email,
            favorite_recipe_ids: user.favorite_recipe_ids,
            dietary_restrictions: user.dietary_restrictions,
            favorite_cuisines: user.favorite_cuisines,
        }
    }
}
