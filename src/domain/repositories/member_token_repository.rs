//! Repository trait for member bearer tokens.

use crate::domain::entities::MemberToken;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for member token management.
///
/// Tokens are stored as HMAC-SHA256 hashes; raw tokens never reach storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMemberTokenRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMemberTokenRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberTokenRepository: Send + Sync {
    /// Resolves a token hash to the owning member.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(member_no))` if the token exists and is not revoked
    /// - `Ok(None)` otherwise
    async fn find_member_by_token_hash(&self, token_hash: &str) -> Result<Option<i64>, AppError>;

    /// Updates the `last_used_at` timestamp of an active token.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Stores a new token for a member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a token with the same hash already exists.
    async fn create_token(
        &self,
        member_no: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<MemberToken, AppError>;

    /// Lists all tokens, newest first.
    async fn list_tokens(&self) -> Result<Vec<MemberToken>, AppError>;

    /// Finds a token by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<MemberToken>, AppError>;

    /// Revokes a token, preventing further authentication.
    async fn revoke_token(&self, id: i64) -> Result<(), AppError>;
}
