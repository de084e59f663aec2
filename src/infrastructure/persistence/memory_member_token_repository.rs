//! Process-local member token repository.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::MemberToken;
use crate::domain::repositories::MemberTokenRepository;
use crate::error::AppError;

/// In-memory [`MemberTokenRepository`]. Tokens are lost on restart.
#[derive(Default)]
pub struct InMemoryMemberTokenRepository {
    tokens: RwLock<Vec<MemberToken>>,
}

impl InMemoryMemberTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberTokenRepository for InMemoryMemberTokenRepository {
    async fn find_member_by_token_hash(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        let tokens = self.tokens.read().await;

        Ok(tokens
            .iter()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
            .map(|t| t.member_no))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().await;

        if let Some(token) = tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
        {
            token.last_used_at = Some(Utc::now());
        }

        Ok(())
    }

    async fn create_token(
        &self,
        member_no: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<MemberToken, AppError> {
        let mut tokens = self.tokens.write().await;

        if tokens.iter().any(|t| t.token_hash == token_hash) {
            return Err(AppError::conflict("이미 존재하는 데이터입니다."));
        }

        let token = MemberToken {
            id: tokens.last().map_or(1, |t| t.id + 1),
            member_no,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };

        tokens.push(token.clone());
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<MemberToken>, AppError> {
        Ok(self.tokens.read().await.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MemberToken>, AppError> {
        Ok(self
            .tokens
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().await;

        if let Some(token) = tokens
            .iter_mut()
            .find(|t| t.id == id && !t.is_revoked())
        {
            token.revoked_at = Some(Utc::now());
        }

        Ok(())
    }
}
