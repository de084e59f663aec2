//! Cocktail business rules: ownership, defaults, and likes.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::api::dto::cocktail::{CocktailRequest, CocktailResponse, LikeResponse};
use crate::domain::Caller;
use crate::domain::entities::{COCKTAIL_NOT_FOUND_MESSAGE, Cocktail, CocktailUpdate, NewCocktail};
use crate::domain::repositories::CocktailRepository;
use crate::error::AppError;

/// Description stored when the request leaves it blank.
pub const DEFAULT_DESCRIPTION: &str = "커스텀 칵테일";

pub const UPDATE_FORBIDDEN_MESSAGE: &str = "본인의 칵테일만 수정할 수 있습니다.";
pub const DELETE_FORBIDDEN_MESSAGE: &str = "본인의 칵테일만 삭제할 수 있습니다.";

/// Operations behind the cocktail endpoints.
///
/// Mutating operations take the member number of an already-authenticated
/// caller; read operations take the [`Caller`] so anonymous requests can be
/// served a reduced view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CocktailService: Send + Sync {
    async fn create_cocktail(
        &self,
        request: CocktailRequest,
        member_no: i64,
    ) -> Result<CocktailResponse, AppError>;

    async fn get_all_cocktails(&self, caller: Caller) -> Result<Vec<CocktailResponse>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the cocktail does not exist.
    async fn get_cocktail(
        &self,
        cocktail_no: i64,
        caller: Caller,
    ) -> Result<CocktailResponse, AppError>;

    async fn get_cocktails_by_member(
        &self,
        member_no: i64,
    ) -> Result<Vec<CocktailResponse>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the cocktail does not exist.
    /// Returns [`AppError::Forbidden`] if the member does not own it.
    async fn update_cocktail(
        &self,
        cocktail_no: i64,
        request: CocktailRequest,
        member_no: i64,
    ) -> Result<CocktailResponse, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the cocktail does not exist.
    /// Returns [`AppError::Forbidden`] if the member does not own it.
    async fn delete_cocktail(&self, cocktail_no: i64, member_no: i64) -> Result<(), AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the cocktail does not exist.
    async fn toggle_like(&self, cocktail_no: i64, member_no: i64)
    -> Result<LikeResponse, AppError>;

    /// Verifies that the backing store is reachable.
    async fn check_storage(&self) -> Result<(), AppError>;
}

/// [`CocktailService`] backed by a [`CocktailRepository`].
pub struct RepositoryCocktailService<R: CocktailRepository> {
    repository: Arc<R>,
}

impl<R: CocktailRepository> RepositoryCocktailService<R> {
    /// Creates a new cocktail service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn find_existing(&self, cocktail_no: i64) -> Result<Cocktail, AppError> {
        self.repository
            .find_by_id(cocktail_no)
            .await?
            .ok_or_else(|| AppError::not_found(COCKTAIL_NOT_FOUND_MESSAGE))
    }

    async fn liked_ids(&self, caller: Caller) -> Result<HashSet<i64>, AppError> {
        match caller {
            Caller::Authenticated { member_no } => Ok(self
                .repository
                .liked_cocktail_ids(member_no)
                .await?
                .into_iter()
                .collect()),
            Caller::Anonymous => Ok(HashSet::new()),
        }
    }
}

#[async_trait]
impl<R: CocktailRepository> CocktailService for RepositoryCocktailService<R> {
    async fn create_cocktail(
        &self,
        request: CocktailRequest,
        member_no: i64,
    ) -> Result<CocktailResponse, AppError> {
        let fields = NormalizedFields::from(request);

        let cocktail = self
            .repository
            .create(NewCocktail {
                member_no,
                name: fields.name,
                description: fields.description,
                ingredients: fields.ingredients,
                instructions: fields.instructions,
                image: fields.image,
            })
            .await?;

        Ok(CocktailResponse::from_entity(
            cocktail,
            Caller::Authenticated { member_no },
            &HashSet::new(),
        ))
    }

    async fn get_all_cocktails(&self, caller: Caller) -> Result<Vec<CocktailResponse>, AppError> {
        let cocktails = self.repository.list_all().await?;
        let liked = self.liked_ids(caller).await?;

        Ok(cocktails
            .into_iter()
            .map(|c| CocktailResponse::from_entity(c, caller, &liked))
            .collect())
    }

    async fn get_cocktail(
        &self,
        cocktail_no: i64,
        caller: Caller,
    ) -> Result<CocktailResponse, AppError> {
        let cocktail = self.find_existing(cocktail_no).await?;
        let liked = self.liked_ids(caller).await?;

        Ok(CocktailResponse::from_entity(cocktail, caller, &liked))
    }

    async fn get_cocktails_by_member(
        &self,
        member_no: i64,
    ) -> Result<Vec<CocktailResponse>, AppError> {
        let cocktails = self.repository.list_by_member(member_no).await?;

        Ok(cocktails
            .into_iter()
            .map(|c| CocktailResponse::from_entity(c, Caller::Anonymous, &HashSet::new()))
            .collect())
    }

    async fn update_cocktail(
        &self,
        cocktail_no: i64,
        request: CocktailRequest,
        member_no: i64,
    ) -> Result<CocktailResponse, AppError> {
        let existing = self.find_existing(cocktail_no).await?;
        if !existing.is_owned_by(member_no) {
            return Err(AppError::forbidden(UPDATE_FORBIDDEN_MESSAGE));
        }

        let fields = NormalizedFields::from(request);
        let cocktail = self
            .repository
            .update(
                cocktail_no,
                CocktailUpdate {
                    name: fields.name,
                    description: fields.description,
                    ingredients: fields.ingredients,
                    instructions: fields.instructions,
                    image: fields.image,
                },
            )
            .await?;

        let caller = Caller::Authenticated { member_no };
        let liked = self.liked_ids(caller).await?;

        Ok(CocktailResponse::from_entity(cocktail, caller, &liked))
    }

    async fn delete_cocktail(&self, cocktail_no: i64, member_no: i64) -> Result<(), AppError> {
        let existing = self.find_existing(cocktail_no).await?;
        if !existing.is_owned_by(member_no) {
            return Err(AppError::forbidden(DELETE_FORBIDDEN_MESSAGE));
        }

        if !self.repository.delete(cocktail_no).await? {
            return Err(AppError::not_found(COCKTAIL_NOT_FOUND_MESSAGE));
        }

        Ok(())
    }

    async fn toggle_like(
        &self,
        cocktail_no: i64,
        member_no: i64,
    ) -> Result<LikeResponse, AppError> {
        self.find_existing(cocktail_no).await?;

        let toggle = self.repository.toggle_like(cocktail_no, member_no).await?;

        Ok(LikeResponse::new(cocktail_no, toggle))
    }

    async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

/// Request fields after trimming and defaulting.
struct NormalizedFields {
    name: String,
    description: String,
    ingredients: Vec<String>,
    instructions: Option<String>,
    image: Option<String>,
}

impl From<CocktailRequest> for NormalizedFields {
    fn from(request: CocktailRequest) -> Self {
        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        Self {
            name: request.name.trim().to_string(),
            description,
            ingredients: request
                .ingredients
                .into_iter()
                .map(|i| i.trim().to_string())
                .collect(),
            instructions: non_blank(request.instructions),
            image: non_blank(request.image),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
