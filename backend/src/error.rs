//! Application error handling
//!
//! Every failure a handler can hit becomes an [`ApiError`], and every
//! `ApiError` renders as a JSON body with a `status` field. Infrastructure
//! errors are logged in full and reported to the client without detail.

use authgate_shared::{AuthError, SchemaError, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid signup data: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Wrong username or password")]
    WrongCredentials,

    #[error("User already exists")]
    UserExists,

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Schema(SchemaError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Schema(_) | ApiError::Invalid(_) | ApiError::UserExists => {
                StatusCode::BAD_REQUEST
            }
            ApiError::WrongCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of the `status` field in the response body
    pub fn status(&self) -> &'static str {
        match self {
            ApiError::Schema(_) => "bad request",
            ApiError::Invalid(_) => "invalid",
            ApiError::WrongCredentials => "wrong",
            ApiError::UserExists => "user already exist",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Internal(_) => "error",
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Schema(e) => Some(e.to_string()),
            ApiError::Unauthorized(e) => Some(e.to_string()),
            ApiError::Invalid(_) | ApiError::WrongCredentials | ApiError::UserExists => None,
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                None
            }
        };

        let body = Json(ErrorResponse {
            status: self.status(),
            message,
        });

        (self.status_code(), body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
