use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// API Error returned by request handlers.
///
/// Every variant renders as `{"error": "<message>"}`; the variant only
/// decides the status code.
#[derive(Error, Debug)]
pub enum ApiError {
    // Validation errors 4xx
    #[error("{0}")]
    ValidationError(String),

    // Backend errors 5xx
    #[error("{0}")]
    TranslationFailed(String),
}

impl ApiError {
    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Helper to create translation backend error
    pub fn translation_failed(message: impl Into<String>) -> Self {
        Self::TranslationFailed(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::TranslationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let response = ErrorResponse { error: self.to_string() };

        (status, Json(response)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_is_400_with_raw_message() {
        let response = ApiError::validation_error("Query is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, serde_json::json!({"error": "Query is required"}));
    }

    #[tokio::test]
    async fn test_translation_failure_is_500() {
        let response = ApiError::translation_failed("Azure Translator API error: 401 - denied")
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Azure Translator API error: 401 - denied");
    }
}
