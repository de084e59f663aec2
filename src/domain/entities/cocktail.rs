//! Cocktail entity and its input types.

use chrono::{DateTime, Utc};

/// Message returned when a cocktail id does not resolve.
pub const COCKTAIL_NOT_FOUND_MESSAGE: &str = "칵테일을 찾을 수 없습니다.";

/// A cocktail recipe created by a member.
///
/// `like_count` is derived from stored likes when the entity is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Cocktail {
    pub id: i64,
    pub member_no: i64,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image: Option<String>,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cocktail {
    /// Returns true if the given member created this cocktail.
    pub fn is_owned_by(&self, member_no: i64) -> bool {
        self.member_no == member_no
    }
}

/// Input data for creating a cocktail.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCocktail {
    pub member_no: i64,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image: Option<String>,
}

/// Full replacement of a cocktail's editable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CocktailUpdate {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image: Option<String>,
}

/// Outcome of flipping a member's like on a cocktail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: i64,
}
