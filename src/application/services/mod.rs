//! Business logic services for the application layer.

pub mod auth_service;
pub mod cocktail_service;

pub use auth_service::AuthService;
pub use cocktail_service::{CocktailService, RepositoryCocktailService};

#[cfg(test)]
pub use cocktail_service::MockCocktailService;
