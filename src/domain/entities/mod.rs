//! Core domain entities.
//!
//! - [`Cocktail`] - A cocktail recipe owned by a member
//! - [`MemberToken`] - A bearer token issued to a member
//!
//! Creation and modification use separate input structs (`NewCocktail`,
//! `CocktailUpdate`) so the stored entity always carries repository-assigned
//! fields such as `id` and timestamps.

pub mod cocktail;
pub mod member_token;

pub use cocktail::{COCKTAIL_NOT_FOUND_MESSAGE, Cocktail, CocktailUpdate, LikeToggle, NewCocktail};
pub use member_token::MemberToken;
