//! Signup/signin endpoints issuing user JWTs

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{issue_user_jwt, AuthError},
    state::AppState,
};

const TOKEN_TTL_HOURS: i64 = 8;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type RouteError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    token: String,
    expires_at: String,
    user_id: String,
    username: String,
}

fn route_error(status: StatusCode, error: impl Into<String>) -> RouteError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

fn unauthorized(error: impl Into<String>) -> RouteError {
    route_error(StatusCode::UNAUTHORIZED, error)
}

fn internal_error(error: impl std::fmt::Display) -> RouteError {
    route_error(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
}

fn auth_error(err: AuthError) -> RouteError {
    match err {
        AuthError::InvalidInput(msg) => route_error(StatusCode::BAD_REQUEST, msg),
        AuthError::Conflict(msg) => route_error(StatusCode::CONFLICT, msg),
        AuthError::Storage(msg) => internal_error(msg),
    }
}

fn format_expiry(exp: usize) -> String {
    DateTime::<Utc>::from_timestamp(exp as i64, 0)
        .map(|value| value.to_rfc3339())
        .unwrap_or_else(|| Utc::now().to_rfc3339())
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), RouteError> {
    let user = state
        .auth_store()
        .create_user(&req.username, &req.password)
        .await
        .map_err(auth_error)?;

    let (token, exp) = issue_user_jwt(&user.id.to_string(), &user.username, TOKEN_TTL_HOURS)
        .map_err(internal_error)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            expires_at: format_expiry(exp),
            user_id: user.id.to_string(),
            username: user.username,
        }),
    ))
}

async fn signin(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, RouteError> {
    let user = state
        .auth_store()
        .authenticate_user(&req.username, &req.password)
        .await
        .ok_or_else(|| unauthorized("Invalid username or password"))?;

    let (token, exp) = issue_user_jwt(&user.id.to_string(), &user.username, TOKEN_TTL_HOURS)
        .map_err(internal_error)?;

    Ok(Json(AuthResponse {
        token,
        expires_at: format_expiry(exp),
        user_id: user.id.to_string(),
        username: user.username,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/signin", post(signin))
}
