//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::api::middleware::identity::IdentityResolver;
use crate::application::services::CocktailService;

/// Dependencies shared across requests.
///
/// Both members are trait objects so the router can be assembled over
/// PostgreSQL or in-memory storage and either identity mode.
#[derive(Clone)]
pub struct AppState {
    pub cocktail_service: Arc<dyn CocktailService>,
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    pub fn new(
        cocktail_service: Arc<dyn CocktailService>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            cocktail_service,
            identity,
        }
    }
}
