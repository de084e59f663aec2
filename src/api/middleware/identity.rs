//! Caller identity resolution.
//!
//! Every request is mapped to a [`Caller`] before the handler body runs. A
//! request without usable credentials becomes [`Caller::Anonymous`]; only the
//! handlers decide whether anonymity is acceptable.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_auth::AuthBearer;
use std::sync::Arc;

use crate::application::services::AuthService;
use crate::domain::Caller;
use crate::domain::repositories::MemberTokenRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the member number in [`HeaderIdentity`] mode.
pub const MEMBER_HEADER: &str = "x-member-no";

/// Strategy turning request credentials into a [`Caller`].
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves the caller of a request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only when a credential store cannot be
    /// consulted. Missing or invalid credentials resolve to
    /// [`Caller::Anonymous`].
    async fn resolve(&self, parts: &mut Parts) -> Result<Caller, AppError>;
}

/// Trusts the `X-Member-No` header as the member number.
///
/// A missing, non-UTF-8 or non-integer header resolves to anonymous. Suitable
/// only behind a gateway that sets the header itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderIdentity;

#[async_trait]
impl IdentityResolver for HeaderIdentity {
    async fn resolve(&self, parts: &mut Parts) -> Result<Caller, AppError> {
        let member_no = parts
            .headers
            .get(MEMBER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok());

        Ok(Caller::from(member_no))
    }
}

/// Resolves `Authorization: Bearer <token>` through [`AuthService`].
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// A missing or malformed header, or an unknown or revoked token, resolves to
/// anonymous.
pub struct TokenIdentity<R: MemberTokenRepository> {
    auth_service: Arc<AuthService<R>>,
}

impl<R: MemberTokenRepository> TokenIdentity<R> {
    pub fn new(auth_service: Arc<AuthService<R>>) -> Self {
        Self { auth_service }
    }
}

#[async_trait]
impl<R: MemberTokenRepository> IdentityResolver for TokenIdentity<R> {
    async fn resolve(&self, parts: &mut Parts) -> Result<Caller, AppError> {
        let token = match AuthBearer::from_request_parts(parts, &()).await {
            Ok(AuthBearer(token)) => token,
            Err(_) => return Ok(Caller::Anonymous),
        };

        let member_no = self.auth_service.authenticate(&token).await?;
        if member_no.is_none() {
            tracing::debug!("Bearer token did not resolve to a member");
        }

        Ok(Caller::from(member_no))
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state.identity.resolve(parts).await
    }
}
