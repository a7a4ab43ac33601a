//! Authentication routes
//!
//! `POST /login`, `POST /signup` and the protected `GET /token_test`.
//! Bodies are taken as raw JSON and checked against their payload schema
//! here, so a missing field, a wrong type, or a body that is not JSON at
//! all is a 400 with a message, before any business logic runs. A body over
//! the size limit is a 413 in the same JSON shape.

use super::MAX_BODY_BYTES;
use crate::auth::{AuthUser, IdentityClaim};
use crate::error::ApiResult;
use crate::services::NewUserInput;
use crate::state::AppState;
use authgate_shared::{
    validate_login_payload, validate_signup_fields, validate_signup_payload, SchemaError,
    StatusResponse,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::instrument;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/token_test", get(token_test))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, SchemaError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            SchemaError::TooLarge {
                limit: MAX_BODY_BYTES,
            }
        } else {
            SchemaError::Malformed(rejection.body_text())
        }
    })
}

/// POST /login
///
/// 200 with the public user and an access token, 401 `wrong` otherwise.
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let req = validate_login_payload(&json_body(payload)?)?;

    let user = state
        .credentials()
        .check_login(&req.username, &req.password)
        .await?;
    let access_token = state.jwt().issue(&IdentityClaim::from(user.clone()))?;

    Ok(Json(
        StatusResponse::ok()
            .with_payload(user)
            .with_access_token(access_token),
    ))
}

/// POST /signup
///
/// 201 `ok`; 400 `invalid` for blank credentials or a bad email, 400
/// `user already exist` for a taken username.
#[instrument(skip_all)]
async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StatusResponse>)> {
    let req = validate_signup_payload(&json_body(payload)?)?;
    validate_signup_fields(&req)?;

    state
        .credentials()
        .add_user(NewUserInput {
            username: req.username,
            password: req.password,
            email: req.email,
            avatar: req.avatar,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::ok())))
}

/// GET /token_test
///
/// Requires `Authorization: Bearer <token>`; echoes the token's identity.
async fn token_test(auth_user: AuthUser) -> Json<StatusResponse<IdentityClaim>> {
    Json(StatusResponse::ok().with_payload(auth_user.identity))
}
