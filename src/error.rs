//! Error types for the prep server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for the prep server.
///
/// Every handler converts failures into one of these categories at its
/// boundary; nothing else escapes to the router.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed required field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown key, session, or assessment id
    #[error("Not found: {0}")]
    NotFound(String),

    /// A downstream capability (AI model, email) failed; retry is possible
    #[error("Dependency failure: {0}")]
    Dependency(String),

    /// Unexpected fault
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Dependency(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": msg, "retry_available": true }),
            ),
            // Internal details are logged, never returned to the client
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "An unexpected error occurred" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the prep server.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("key".into()), StatusCode::NOT_FOUND),
            (
                AppError::Dependency("model".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_dependency_error_flags_retry() {
        let response = AppError::Dependency("speech model unavailable".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["retry_available"], true);
        assert!(json["error"].as_str().unwrap().contains("speech model"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal("secret stack trace".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert!(!json["error"].as_str().unwrap().contains("secret"));
    }
}
