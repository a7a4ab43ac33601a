//! Request and response types for the authgate API

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Public projection of a user: everything except the password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// Response envelope shared by every auth endpoint
///
/// Only `status` is always present; `payload` and `access_token`
/// are filled in by successful login (and the token check).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse<P = PublicUser> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<P>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl<P> StatusResponse<P> {
    /// Bare `{"status": "ok"}`
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            payload: None,
            access_token: None,
        }
    }

    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_access_token(mut self, token: String) -> Self {
        self.access_token = Some(token);
        self
    }
}
