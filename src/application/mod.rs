//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::cocktail_service::CocktailService`] - Cocktail CRUD, ownership and likes
//! - [`services::auth_service::AuthService`] - Bearer token authentication

pub mod services;
