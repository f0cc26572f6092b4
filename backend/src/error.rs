//! Application error handling
//!
//! This module provides unified error handling for the API, converting
//! internal errors to HTTP status codes. Error responses carry no body: the
//! detail is logged server-side and the client only sees the status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or incomplete request body
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing, invalid or expired token, or bad login credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Target absent or owned by someone else
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(err) => error!("Internal error: {:?}", err),
            ApiError::Database(err) => error!("Database error: {:?}", err),
            other => debug!("Request rejected: {}", other),
        }

        self.status().into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_len(response: Response) -> usize {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .len()
    }

    #[test]
    fn test_bad_request_error_status() {
        let error = ApiError::BadRequest("missing title".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("Todo not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_error_status() {
        let error = ApiError::Internal(anyhow::anyhow!("pool closed"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unauthorized_has_empty_body() {
        let error = ApiError::Unauthorized("Invalid token".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_len(response).await, 0);
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_detail() {
        let error = ApiError::Internal(anyhow::anyhow!("password column missing"));
        let response = error.into_response();
        assert_eq!(body_len(response).await, 0);
    }
}
