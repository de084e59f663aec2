//! PostgreSQL implementation of cocktail repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    COCKTAIL_NOT_FOUND_MESSAGE, Cocktail, CocktailUpdate, LikeToggle, NewCocktail,
};
use crate::domain::repositories::CocktailRepository;
use crate::error::AppError;

/// Columns selected for every cocktail read, including the derived like count.
const COCKTAIL_COLUMNS: &str = r#"
    c.cocktail_no, c.member_no, c.name, c.description, c.ingredients,
    c.instructions, c.image, c.created_at, c.updated_at,
    (SELECT COUNT(*) FROM cocktail_likes l WHERE l.cocktail_no = c.cocktail_no) AS like_count
"#;

#[derive(sqlx::FromRow)]
struct CocktailRow {
    cocktail_no: i64,
    member_no: i64,
    name: String,
    description: String,
    ingredients: Vec<String>,
    instructions: Option<String>,
    image: Option<String>,
    like_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CocktailRow> for Cocktail {
    fn from(row: CocktailRow) -> Self {
        Cocktail {
            id: row.cocktail_no,
            member_no: row.member_no,
            name: row.name,
            description: row.description,
            ingredients: row.ingredients,
            instructions: row.instructions,
            image: row.image,
            like_count: row.like_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for cocktails and likes.
///
/// Likes live in `cocktail_likes` and are removed by `ON DELETE CASCADE`
/// when their cocktail is deleted.
pub struct PgCocktailRepository {
    pool: Arc<PgPool>,
}

impl PgCocktailRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CocktailRepository for PgCocktailRepository {
    async fn create(&self, new_cocktail: NewCocktail) -> Result<Cocktail, AppError> {
        let row = sqlx::query_as::<_, CocktailRow>(
            r#"
            INSERT INTO cocktails (member_no, name, description, ingredients, instructions, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING cocktail_no, member_no, name, description, ingredients,
                      instructions, image, created_at, updated_at, 0::BIGINT AS like_count
            "#,
        )
        .bind(new_cocktail.member_no)
        .bind(new_cocktail.name)
        .bind(new_cocktail.description)
        .bind(new_cocktail.ingredients)
        .bind(new_cocktail.instructions)
        .bind(new_cocktail.image)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Cocktail>, AppError> {
        let sql = format!("SELECT {COCKTAIL_COLUMNS} FROM cocktails c WHERE c.cocktail_no = $1");

        let row = sqlx::query_as::<_, CocktailRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Cocktail>, AppError> {
        let sql = format!(
            "SELECT {COCKTAIL_COLUMNS} FROM cocktails c ORDER BY c.created_at DESC, c.cocktail_no DESC"
        );

        let rows = sqlx::query_as::<_, CocktailRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_member(&self, member_no: i64) -> Result<Vec<Cocktail>, AppError> {
        let sql = format!(
            "SELECT {COCKTAIL_COLUMNS} FROM cocktails c \
             WHERE c.member_no = $1 \
             ORDER BY c.created_at DESC, c.cocktail_no DESC"
        );

        let rows = sqlx::query_as::<_, CocktailRow>(&sql)
            .bind(member_no)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, update: CocktailUpdate) -> Result<Cocktail, AppError> {
        let sql = format!(
            r#"
            UPDATE cocktails AS c SET
                name         = $2,
                description  = $3,
                ingredients  = $4,
                instructions = $5,
                image        = $6,
                updated_at   = NOW()
            WHERE c.cocktail_no = $1
            RETURNING {COCKTAIL_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CocktailRow>(&sql)
            .bind(id)
            .bind(update.name)
            .bind(update.description)
            .bind(update.ingredients)
            .bind(update.instructions)
            .bind(update.image)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found(COCKTAIL_NOT_FOUND_MESSAGE))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cocktails WHERE cocktail_no = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn liked_cocktail_ids(&self, member_no: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT cocktail_no FROM cocktail_likes WHERE member_no = $1",
        )
        .bind(member_no)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }

    async fn toggle_like(&self, id: i64, member_no: i64) -> Result<LikeToggle, AppError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT cocktail_no FROM cocktails WHERE cocktail_no = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if exists.is_none() {
            tx.rollback().await?;
            return Err(AppError::not_found(COCKTAIL_NOT_FOUND_MESSAGE));
        }

        let removed =
            sqlx::query("DELETE FROM cocktail_likes WHERE cocktail_no = $1 AND member_no = $2")
                .bind(id)
                .bind(member_no)
                .execute(&mut *tx)
                .await?;

        let liked = if removed.rows_affected() > 0 {
            false
        } else {
            sqlx::query("INSERT INTO cocktail_likes (cocktail_no, member_no) VALUES ($1, $2)")
                .bind(id)
                .bind(member_no)
                .execute(&mut *tx)
                .await?;
            true
        };

        let like_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cocktail_likes WHERE cocktail_no = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(LikeToggle { liked, like_count })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
