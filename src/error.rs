//! Application error type and its translation into HTTP responses.
//!
//! Every error leaving a handler is rendered as a failure envelope
//! (`{"success": false, "message": ..., "data": ...}`) with a status code
//! chosen by the variant.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use validator::ValidationErrors;

use crate::api::dto::envelope::ApiResponse;

/// Message shown to clients when an internal failure is hidden from them.
const INTERNAL_ERROR_MESSAGE: &str = "서버 오류가 발생했습니다.";

/// Message attached to payload constraint violations.
const INVALID_INPUT_MESSAGE: &str = "입력값이 올바르지 않습니다.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request: bad JSON, bad path parameter, or constraint violations.
    /// `details` carries the field error map, or `Null`.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation { message, details } => {
                let data = if details.is_null() { None } else { Some(details) };
                ApiResponse::failure(message, data)
            }
            AppError::Internal { message } => {
                tracing::error!(error = %message, "Request failed with internal error");
                ApiResponse::failure(INTERNAL_ERROR_MESSAGE, None)
            }
            AppError::Unauthorized { message }
            | AppError::Forbidden { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message } => ApiResponse::failure(message, None),
        };

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict("이미 존재하는 데이터입니다.");
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error")
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        AppError::bad_request(INVALID_INPUT_MESSAGE, details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text(), Value::Null)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text(), Value::Null)
    }
}
