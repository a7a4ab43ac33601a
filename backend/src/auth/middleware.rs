//! Bearer-token guard for protected routes
//!
//! Adding [`AuthUser`] to a handler's arguments protects it: the token is
//! verified while extracting, and a failure ends the request with 401
//! before the handler body runs.

use crate::auth::IdentityClaim;
use crate::error::ApiError;
use crate::state::AppState;
use authgate_shared::AuthError;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

/// Authenticated caller, taken from a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: IdentityClaim,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(&parts.headers)?;
        let identity = app_state.jwt().verify(token).map_err(|e| {
            warn!(reason = %e, "bearer token rejected");
            e
        })?;

        Ok(AuthUser { identity })
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
///
/// The scheme name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::InvalidToken)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}
