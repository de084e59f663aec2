//! Authentication service resolving bearer tokens to members.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::MemberTokenRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Length of generated tokens.
const TOKEN_LEN: usize = 48;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Service for authenticating members via bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<R: MemberTokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: MemberTokenRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .map_err(|_| AppError::internal("Invalid token signing secret"))?;
        mac.update(token.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Resolves a raw token to the member it was issued to.
    ///
    /// Returns `Ok(None)` for unknown or revoked tokens. On success the token's
    /// `last_used_at` timestamp is refreshed; failures to do so are logged and
    /// do not affect the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn authenticate(&self, token: &str) -> Result<Option<i64>, AppError> {
        let token_hash = self.hash_token(token)?;

        let Some(member_no) = self
            .repository
            .find_member_by_token_hash(&token_hash)
            .await?
        else {
            return Ok(None);
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, member_no, "Failed to update token last_used_at");
        }

        Ok(Some(member_no))
    }

    /// Issues a new token for a member and stores its hash.
    ///
    /// Returns the raw token; it cannot be recovered later.
    pub async fn issue_token(&self, member_no: i64, name: &str) -> Result<String, AppError> {
        let token = generate_token();
        self.register_token(member_no, name, &token).await?;
        Ok(token)
    }

    /// Stores the hash of a caller-supplied token for a member.
    pub async fn register_token(
        &self,
        member_no: i64,
        name: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let token_hash = self.hash_token(token)?;
        self.repository
            .create_token(member_no, name, &token_hash)
            .await?;
        Ok(())
    }
}

/// Generates a random 48-character alphanumeric token (~286 bits of entropy).
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_CHARSET.len());
            char::from(TOKEN_CHARSET[idx])
        })
        .collect()
}
