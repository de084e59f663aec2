//! PostgreSQL implementation of member token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::MemberToken;
use crate::domain::repositories::MemberTokenRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct MemberTokenRow {
    id: i64,
    member_no: i64,
    name: String,
    token_hash: String,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
}

impl From<MemberTokenRow> for MemberToken {
    fn from(row: MemberTokenRow) -> Self {
        MemberToken {
            id: row.id,
            member_no: row.member_no,
            name: row.name,
            token_hash: row.token_hash,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
            revoked_at: row.revoked_at,
        }
    }
}

/// PostgreSQL repository for member token storage and validation.
///
/// Stores hashed tokens only. Raw tokens are never persisted.
pub struct PgMemberTokenRepository {
    pool: Arc<PgPool>,
}

impl PgMemberTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberTokenRepository for PgMemberTokenRepository {
    async fn find_member_by_token_hash(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        let member_no = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT member_no
            FROM member_tokens
            WHERE token_hash = $1
              AND revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(member_no)
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE member_tokens
            SET last_used_at = NOW()
            WHERE token_hash = $1
              AND revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn create_token(
        &self,
        member_no: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<MemberToken, AppError> {
        let row = sqlx::query_as::<_, MemberTokenRow>(
            r#"
            INSERT INTO member_tokens (member_no, name, token_hash)
            VALUES ($1, $2, $3)
            RETURNING id, member_no, name, token_hash, created_at, last_used_at, revoked_at
            "#,
        )
        .bind(member_no)
        .bind(name)
        .bind(token_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_tokens(&self) -> Result<Vec<MemberToken>, AppError> {
        let rows = sqlx::query_as::<_, MemberTokenRow>(
            r#"
            SELECT id, member_no, name, token_hash, created_at, last_used_at, revoked_at
            FROM member_tokens
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MemberToken>, AppError> {
        let row = sqlx::query_as::<_, MemberTokenRow>(
            r#"
            SELECT id, member_no, name, token_hash, created_at, last_used_at, revoked_at
            FROM member_tokens
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE member_tokens
            SET revoked_at = NOW()
            WHERE id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
