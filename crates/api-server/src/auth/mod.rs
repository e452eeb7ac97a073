//! Authentication primitives: user store, JWT issue/verify, and the
//! Bearer-header resolution the task routes rely on.

mod jwt;
mod store;

pub use jwt::{issue_user_jwt, verify_user_jwt, UserJwtClaims};
pub use store::{AuthError, AuthStore, UserSummary};

use axum::http::{header, HeaderMap};

/// The authenticated caller, as established from the request headers.
/// `user_id` is the owner id forwarded into every core call.
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub user_id: String,
    pub username: String,
}

/// Extract and verify the Bearer token from the Authorization header.
pub fn resolve_user_identity(headers: &HeaderMap) -> Result<UserIdentity, String> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| "Expected a Bearer token".to_string())?;

    let claims = verify_user_jwt(token.trim())?;
    Ok(UserIdentity {
        user_id: claims.sub,
        username: claims.username,
    })
}
