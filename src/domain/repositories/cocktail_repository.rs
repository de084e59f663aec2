//! Repository trait for cocktail data access.

use crate::domain::entities::{Cocktail, CocktailUpdate, LikeToggle, NewCocktail};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for cocktails and their likes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCocktailRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryCocktailRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CocktailRepository: Send + Sync {
    /// Stores a new cocktail and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_cocktail: NewCocktail) -> Result<Cocktail, AppError>;

    /// Finds a cocktail by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Cocktail))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: i64) -> Result<Option<Cocktail>, AppError>;

    /// Lists all cocktails, newest first.
    async fn list_all(&self) -> Result<Vec<Cocktail>, AppError>;

    /// Lists cocktails created by a member, newest first.
    async fn list_by_member(&self, member_no: i64) -> Result<Vec<Cocktail>, AppError>;

    /// Replaces the editable fields of a cocktail and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no cocktail has this id.
    async fn update(&self, id: i64, update: CocktailUpdate) -> Result<Cocktail, AppError>;

    /// Deletes a cocktail together with its likes.
    ///
    /// Returns `Ok(true)` if a cocktail was removed, `Ok(false)` if none existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Ids of all cocktails the member currently likes.
    async fn liked_cocktail_ids(&self, member_no: i64) -> Result<Vec<i64>, AppError>;

    /// Adds the member's like if absent, removes it if present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the cocktail does not exist.
    async fn toggle_like(&self, id: i64, member_no: i64) -> Result<LikeToggle, AppError>;

    /// Verifies that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
