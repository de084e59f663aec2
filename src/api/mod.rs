//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and wraps results
//! in the [`dto::envelope::ApiResponse`] envelope.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`extract`] - Envelope-aware body and path extractors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Caller identity, rate limiting and tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
