// Common DTOs and errors for the public API
//
// These types are shared across multiple API endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jobnest_core::IdError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures surfaced by job and application handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidIdentifier(#[from] IdError),

    #[error("storage error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage details stay in the logs
        let body = match &self {
            ApiError::InvalidIdentifier(e) => ErrorResponse::new(e.to_string()),
            ApiError::Internal(e) => {
                tracing::error!("request failed: {:#}", e);
                ErrorResponse::new("Internal server error")
            }
        };

        body.into_response(status).into_response()
    }
}
