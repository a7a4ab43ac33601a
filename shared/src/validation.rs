//! Semantic checks applied after a body has passed its schema
//!
//! These are the rules the schema layer cannot express: non-blank
//! credentials and a plausible email address.

use crate::errors::ValidationError;
use crate::types::SignupRequest;

/// Usernames are stored and looked up lowercase
pub fn normalize_username(username: &str) -> String {
    username.to_lowercase()
}

/// Reject empty or whitespace-only values
pub fn validate_not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Minimal email check: exactly one `@`
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.matches('@').count() != 1 {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate signup fields that passed the schema check
pub fn validate_signup_fields(req: &SignupRequest) -> Result<(), ValidationError> {
    if !validate_not_blank(&req.username) {
        return Err(ValidationError::BlankUsername);
    }
    if !validate_not_blank(&req.password) {
        return Err(ValidationError::BlankPassword);
    }
    validate_email(&req.email)
}
