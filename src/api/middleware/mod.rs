//! HTTP middleware and request identity.
//!
//! Provides caller identity resolution, rate limiting, and observability.

pub mod identity;
pub mod rate_limit;
pub mod tracing;
