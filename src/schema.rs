//! Field table of the user record.
//!
//! Field numbers are the wire identity of a field and never change; the
//! declaration order of the Rust structs is irrelevant to the encoding.

use crate::wire::WireType;

/// Shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// One UTF-8 string, empty by default.
    Text,
    /// Ordered sequence of UTF-8 strings, one entry per element.
    RepeatedText,
}

impl FieldKind {
    /// Wire type every entry of this kind is encoded with.
    pub fn wire_type(self) -> WireType {
        match self {
            Self::Text | Self::RepeatedText => WireType::LengthDelimited,
        }
    }

    pub fn is_repeated(self) -> bool {
        matches!(self, Self::RepeatedText)
    }
}

/// The fields of [`User`](crate::User).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserField {
    Id,
    DisplayName,
    Email,
    FavoriteRecipeIds,
    DietaryRestrictions,
    FavoriteCuisines,
}

impl UserField {
    /// All fields in ascending field-number order (the encode order).
    pub const ALL: [UserField; 6] = [
        Self::Id,
        Self::DisplayName,
        Self::Email,
        Self::FavoriteRecipeIds,
        Self::DietaryRestrictions,
        Self::FavoriteCuisines,
    ];

    pub fn number(self) -> u32 {
        match self {
            Self::Id => 1,
            Self::DisplayName => 2,
            Self::Email => 3,
            Self::FavoriteRecipeIds => 4,
            Self::DietaryRestrictions => 5,
            Self::FavoriteCuisines => 6,
        }
    }

    /// Schema name (snake_case, also the JSON key).
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::DisplayName => "display_name",
            Self::Email => "email",
            Self::FavoriteRecipeIds => "favorite_recipe_ids",
            Self::DietaryRestrictions => "dietary_restrictions",
            Self::FavoriteCuisines => "favorite_cuisines",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Id | Self::DisplayName | Self::Email => FieldKind::Text,
            Self::FavoriteRecipeIds | Self::DietaryRestrictions | Self::FavoriteCuisines => {
                FieldKind::RepeatedText
            }
        }
    }

    /// Looks up a field by its wire number; `None` for unknown numbers.
    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.number() == number)
    }
}
