//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: storage connectivity (public)
//! - `/api/cocktails/*`  - Cocktail REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Body limit** - Request bodies above [`MAX_BODY_BYTES`] are rejected
//!
//! Rate limiting and path normalization are added by [`crate::server`] because
//! both need the listening socket.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;

/// Largest accepted request body. Leaves room for a 5 MiB image encoded as
/// base64 inside the JSON payload.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::cocktail_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(tracing::layer())
}
