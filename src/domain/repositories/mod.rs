//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`CocktailRepository`] - Cocktail CRUD and likes
//! - [`MemberTokenRepository`] - Bearer token lookup and management

pub mod cocktail_repository;
pub mod member_token_repository;

pub use cocktail_repository::CocktailRepository;
pub use member_token_repository::MemberTokenRepository;

#[cfg(test)]
pub use cocktail_repository::MockCocktailRepository;
#[cfg(test)]
pub use member_token_repository::MockMemberTokenRepository;
