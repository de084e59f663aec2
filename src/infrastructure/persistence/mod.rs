//! Repository implementations.
//!
//! PostgreSQL repositories use SQLx with runtime-checked queries; the
//! in-memory repositories back the service when no database is configured.
//!
//! # Repositories
//!
//! - [`PgCocktailRepository`] / [`InMemoryCocktailRepository`] - Cocktails and likes
//! - [`PgMemberTokenRepository`] / [`InMemoryMemberTokenRepository`] - Member bearer tokens

pub mod memory_cocktail_repository;
pub mod memory_member_token_repository;
pub mod pg_cocktail_repository;
pub mod pg_member_token_repository;

pub use memory_cocktail_repository::InMemoryCocktailRepository;
pub use memory_member_token_repository::InMemoryMemberTokenRepository;
pub use pg_cocktail_repository::PgCocktailRepository;
pub use pg_member_token_repository::PgMemberTokenRepository;
