//! Uniform response envelope shared by every endpoint.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wrapper for all API responses, successful or not.
///
/// All three fields are always serialized; absent values appear as `null`:
///
/// ```json
/// { "success": true, "message": "칵테일이 생성되었습니다.", "data": { "cocktailNo": 1 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying data and no message.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Successful response carrying a message and data.
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with a message and `data: null`.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl ApiResponse<Value> {
    /// Failure response. `data` is `null` unless the error carries details.
    pub fn failure(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
