//! Bearer-token identity for voters and admins.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use draftboard_core::error::CoreError;
use draftboard_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The account behind a request's access token.
///
/// Handlers that only need "some logged-in voter" take this directly;
/// admin-only handlers go through [`RequireAdmin`](super::rbac::RequireAdmin).
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `voters.id` of the caller.
    pub user_id: DbId,
    /// `"admin"` or `"voter"`.
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).map_err(unauthorized)?;
        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Session expired or token invalid; log in again"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. An empty token is treated as
/// missing.
fn bearer_token(parts: &Parts) -> Result<&str, &'static str> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or("Log in to continue")?
        .to_str()
        .map_err(|_| "Authorization header is not valid text")?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or("Authorization header must be 'Bearer <token>'")?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err("Authorization header must be 'Bearer <token>'");
    }

    match token.trim() {
        "" => Err("Log in to continue"),
        token => Ok(token),
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}
