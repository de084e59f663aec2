//! API route configuration.
//!
//! Read endpoints accept anonymous callers. Mutating endpoints resolve the
//! caller through [`crate::api::middleware::identity`] and answer
//! `401 Unauthorized` when nobody is logged in.

use crate::api::handlers::{
    create_cocktail_handler, delete_cocktail_handler, get_cocktail_handler,
    list_cocktails_handler, member_cocktails_handler, toggle_like_handler,
    update_cocktail_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Cocktail routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /cocktails`                     - List all cocktails
/// - `POST   /cocktails`                     - Create a cocktail
/// - `GET    /cocktails/{id}`                - Fetch one cocktail
/// - `PUT    /cocktails/{id}`                - Replace a cocktail
/// - `DELETE /cocktails/{id}`                - Delete a cocktail
/// - `POST   /cocktails/{id}/likes`          - Toggle the caller's like
/// - `GET    /cocktails/members/{member_no}` - Cocktails created by a member
pub fn cocktail_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cocktails",
            get(list_cocktails_handler).post(create_cocktail_handler),
        )
        .route(
            "/cocktails/{id}",
            get(get_cocktail_handler)
                .put(update_cocktail_handler)
                .delete(delete_cocktail_handler),
        )
        .route("/cocktails/{id}/likes", post(toggle_like_handler))
        .route(
            "/cocktails/members/{member_no}",
            get(member_cocktails_handler),
        )
}
