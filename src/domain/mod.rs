//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`caller`] - Request identity (`Authenticated` or `Anonymous`)
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in
//! [`crate::infrastructure::persistence`].

pub mod caller;
pub mod entities;
pub mod repositories;

pub use caller::Caller;
