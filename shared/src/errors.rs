//! Error types shared between the HTTP layer and its collaborators

use thiserror::Error;

/// Request body failed the required-field / type checks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("'{0}' is a required property")]
    MissingField(&'static str),

    #[error("'{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("malformed request body: {0}")]
    Malformed(String),

    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Signup fields are present but semantically unusable
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username must not be blank")]
    BlankUsername,

    #[error("password must not be blank")]
    BlankPassword,

    #[error("email must contain a single '@'")]
    InvalidEmail,
}

/// Bearer token failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,
}
