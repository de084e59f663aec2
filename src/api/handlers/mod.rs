//! HTTP request handlers for API endpoints.

pub mod cocktails;
pub mod health;

pub use cocktails::{
    create_cocktail_handler, delete_cocktail_handler, get_cocktail_handler,
    list_cocktails_handler, member_cocktails_handler, toggle_like_handler,
    update_cocktail_handler,
};
pub use health::health_handler;
