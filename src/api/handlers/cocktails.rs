//! Handlers for the cocktail resource.
//!
//! Handlers resolve the caller, enforce authentication for mutating
//! operations and wrap service results in [`ApiResponse`]. Business rules
//! live in [`crate::application::services::CocktailService`].

use axum::{extract::State, http::StatusCode};

use crate::api::dto::cocktail::{CocktailRequest, CocktailResponse, LikeResponse};
use crate::api::dto::envelope::ApiResponse;
use crate::api::extract::{IdPath, ValidatedJson};
use crate::domain::Caller;
use crate::error::AppError;
use crate::state::AppState;

pub const CREATED_MESSAGE: &str = "칵테일이 생성되었습니다.";
pub const UPDATED_MESSAGE: &str = "칵테일이 수정되었습니다.";
pub const DELETED_MESSAGE: &str = "칵테일이 삭제되었습니다.";
pub const LIKE_TOGGLED_MESSAGE: &str = "좋아요가 반영되었습니다.";

/// Creates a cocktail owned by the caller.
///
/// # Endpoint
///
/// `POST /api/cocktails`
///
/// # Response Codes
///
/// - **201 Created**: cocktail stored, returned in `data`
/// - **400 Bad Request**: malformed JSON or constraint violation
/// - **401 Unauthorized**: anonymous caller
pub async fn create_cocktail_handler(
    State(state): State<AppState>,
    caller: Caller,
    ValidatedJson(payload): ValidatedJson<CocktailRequest>,
) -> Result<(StatusCode, ApiResponse<CocktailResponse>), AppError> {
    let member_no = caller.require_member()?;

    let cocktail = state
        .cocktail_service
        .create_cocktail(payload, member_no)
        .await?;

    tracing::info!(
        cocktail_no = cocktail.cocktail_no,
        member_no,
        "Cocktail created"
    );

    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message(CREATED_MESSAGE, cocktail),
    ))
}

/// Lists every cocktail, newest first.
///
/// # Endpoint
///
/// `GET /api/cocktails`
///
/// Anonymous callers receive `liked: null` and `isOwner: null`.
pub async fn list_cocktails_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<ApiResponse<Vec<CocktailResponse>>, AppError> {
    let cocktails = state.cocktail_service.get_all_cocktails(caller).await?;
    Ok(ApiResponse::success(cocktails))
}

/// Returns a single cocktail.
///
/// # Endpoint
///
/// `GET /api/cocktails/{id}`
///
/// # Errors
///
/// Returns 404 if the cocktail does not exist.
pub async fn get_cocktail_handler(
    State(state): State<AppState>,
    caller: Caller,
    IdPath(cocktail_no): IdPath,
) -> Result<ApiResponse<CocktailResponse>, AppError> {
    let cocktail = state
        .cocktail_service
        .get_cocktail(cocktail_no, caller)
        .await?;
    Ok(ApiResponse::success(cocktail))
}

/// Lists cocktails created by one member.
///
/// # Endpoint
///
/// `GET /api/cocktails/members/{member_no}`
pub async fn member_cocktails_handler(
    State(state): State<AppState>,
    IdPath(member_no): IdPath,
) -> Result<ApiResponse<Vec<CocktailResponse>>, AppError> {
    let cocktails = state
        .cocktail_service
        .get_cocktails_by_member(member_no)
        .await?;
    Ok(ApiResponse::success(cocktails))
}

/// Replaces the editable fields of a cocktail owned by the caller.
///
/// # Endpoint
///
/// `PUT /api/cocktails/{id}`
///
/// # Response Codes
///
/// - **200 OK**: updated cocktail in `data`
/// - **400 Bad Request**: malformed JSON or constraint violation
/// - **401 Unauthorized**: anonymous caller
/// - **403 Forbidden**: cocktail belongs to another member
/// - **404 Not Found**: no such cocktail
pub async fn update_cocktail_handler(
    State(state): State<AppState>,
    caller: Caller,
    IdPath(cocktail_no): IdPath,
    ValidatedJson(payload): ValidatedJson<CocktailRequest>,
) -> Result<ApiResponse<CocktailResponse>, AppError> {
    let member_no = caller.require_member()?;

    let cocktail = state
        .cocktail_service
        .update_cocktail(cocktail_no, payload, member_no)
        .await?;

    tracing::info!(cocktail_no, member_no, "Cocktail updated");

    Ok(ApiResponse::success_with_message(UPDATED_MESSAGE, cocktail))
}

/// Deletes a cocktail owned by the caller, along with its likes.
///
/// # Endpoint
///
/// `DELETE /api/cocktails/{id}`
///
/// # Response Codes
///
/// - **200 OK**: `data` is `null`
/// - **401 Unauthorized**: anonymous caller
/// - **403 Forbidden**: cocktail belongs to another member
/// - **404 Not Found**: no such cocktail
pub async fn delete_cocktail_handler(
    State(state): State<AppState>,
    caller: Caller,
    IdPath(cocktail_no): IdPath,
) -> Result<ApiResponse<()>, AppError> {
    let member_no = caller.require_member()?;

    state
        .cocktail_service
        .delete_cocktail(cocktail_no, member_no)
        .await?;

    tracing::info!(cocktail_no, member_no, "Cocktail deleted");

    Ok(ApiResponse::message_only(DELETED_MESSAGE))
}

/// Flips the caller's like on a cocktail.
///
/// # Endpoint
///
/// `POST /api/cocktails/{id}/likes`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "좋아요가 반영되었습니다.",
///   "data": { "cocktailNo": 3, "liked": true, "likeCount": 12 }
/// }
/// ```
pub async fn toggle_like_handler(
    State(state): State<AppState>,
    caller: Caller,
    IdPath(cocktail_no): IdPath,
) -> Result<ApiResponse<LikeResponse>, AppError> {
    let member_no = caller.require_member()?;

    let like = state
        .cocktail_service
        .toggle_like(cocktail_no, member_no)
        .await?;

    tracing::debug!(cocktail_no, member_no, liked = like.liked, "Like toggled");

    Ok(ApiResponse::success_with_message(LIKE_TOGGLED_MESSAGE, like))
}
