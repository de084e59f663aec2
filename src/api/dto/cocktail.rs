//! DTOs for cocktail endpoints.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;
use validator::{Validate, ValidationError};

use crate::domain::Caller;
use crate::domain::entities::{Cocktail, LikeToggle};

/// Largest decoded image accepted in a data URL (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Compiled regex splitting an image data URL into media type and payload.
static DATA_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/[A-Za-z0-9.+-]+;base64,(?P<payload>.+)$").unwrap());

/// Request body for `POST /api/cocktails` and `PUT /api/cocktails/{id}`.
///
/// ```json
/// {
///   "name": "모히토",
///   "description": "상큼한 럼 칵테일",
///   "ingredients": ["화이트 럼 2oz", "라임 주스 1oz", "민트"],
///   "instructions": "민트를 으깬 뒤 나머지 재료와 섞는다",
///   "image": "data:image/png;base64,iVBORw0KGgo..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CocktailRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    /// Blank or missing descriptions are replaced with a default by the service.
    #[validate(custom(function = "validate_description"))]
    pub description: Option<String>,

    #[validate(
        length(min = 1, max = 30, message = "재료는 1~30개여야 합니다."),
        custom(function = "validate_ingredients")
    )]
    pub ingredients: Vec<String>,

    #[validate(custom(function = "validate_instructions"))]
    pub instructions: Option<String>,

    /// Either an `http(s)` URL or a base64 image data URL.
    #[validate(custom(function = "validate_image"))]
    pub image: Option<String>,
}

// Text fields are stored trimmed, so limits apply to the trimmed length.
fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    match trimmed_len(name) {
        0 => Err(ValidationError::new("blank").with_message("공백만 입력할 수 없습니다.".into())),
        1..=100 => Ok(()),
        _ => Err(ValidationError::new("length")
            .with_message("칵테일 이름은 1~100자여야 합니다.".into())),
    }
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if trimmed_len(description) > 500 {
        return Err(ValidationError::new("length")
            .with_message("설명은 500자 이하여야 합니다.".into()));
    }
    Ok(())
}

fn validate_instructions(instructions: &str) -> Result<(), ValidationError> {
    if trimmed_len(instructions) > 2000 {
        return Err(ValidationError::new("length")
            .with_message("제조법은 2000자 이하여야 합니다.".into()));
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[String]) -> Result<(), ValidationError> {
    for ingredient in ingredients {
        let len = trimmed_len(ingredient);
        if len == 0 || len > 100 {
            return Err(ValidationError::new("ingredient")
                .with_message("각 재료는 1~100자여야 합니다.".into()));
        }
    }
    Ok(())
}

fn validate_image(image: &str) -> Result<(), ValidationError> {
    if image.is_empty() {
        return Ok(());
    }

    if image.starts_with("data:") {
        let payload = DATA_URL_REGEX
            .captures(image)
            .and_then(|c| c.name("payload"))
            .ok_or_else(|| {
                ValidationError::new("image_format")
                    .with_message("이미지 형식이 올바르지 않습니다.".into())
            })?;

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload.as_str())
            .map_err(|_| {
                ValidationError::new("image_encoding")
                    .with_message("이미지 인코딩이 올바르지 않습니다.".into())
            })?;

        if decoded.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::new("image_size")
                .with_message("이미지 크기는 5MB 이하여야 합니다.".into()));
        }

        return Ok(());
    }

    match Url::parse(image) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(ValidationError::new("image_url")
            .with_message("이미지 주소가 올바르지 않습니다.".into())),
    }
}

/// JSON representation of a cocktail.
///
/// `liked` and `isOwner` describe the relationship to the caller. They are
/// `null` when the caller is anonymous or when the listing is not
/// caller-specific.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocktailResponse {
    pub cocktail_no: i64,
    pub member_no: i64,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image: Option<String>,
    pub like_count: i64,
    pub liked: Option<bool>,
    pub is_owner: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CocktailResponse {
    /// Builds the caller-specific view of a cocktail.
    ///
    /// `liked_ids` holds the cocktails the caller likes; it is ignored for
    /// anonymous callers.
    pub fn from_entity(cocktail: Cocktail, caller: Caller, liked_ids: &HashSet<i64>) -> Self {
        let (liked, is_owner) = match caller {
            Caller::Authenticated { member_no } => (
                Some(liked_ids.contains(&cocktail.id)),
                Some(cocktail.is_owned_by(member_no)),
            ),
            Caller::Anonymous => (None, None),
        };

        Self {
            cocktail_no: cocktail.id,
            member_no: cocktail.member_no,
            name: cocktail.name,
            description: cocktail.description,
            ingredients: cocktail.ingredients,
            instructions: cocktail.instructions,
            image: cocktail.image,
            like_count: cocktail.like_count,
            liked,
            is_owner,
            created_at: cocktail.created_at,
            updated_at: cocktail.updated_at,
        }
    }
}

/// Result of `POST /api/cocktails/{id}/likes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub cocktail_no: i64,
    pub liked: bool,
    pub like_count: i64,
}

impl LikeResponse {
    pub fn new(cocktail_no: i64, toggle: LikeToggle) -> Self {
        Self {
            cocktail_no,
            liked: toggle.liked,
            like_count: toggle.like_count,
        }
    }
}
