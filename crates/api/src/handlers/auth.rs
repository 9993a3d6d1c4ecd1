//! Handlers for the `/auth` resource (login, current identity).

use axum::extract::State;
use axum::Json;
use draftboard_core::error::CoreError;
use draftboard_core::roles::ROLE_ADMIN;
use draftboard_db::models::voter::VoterResponse;
use draftboard_db::repositories::VoterRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub mobile_number: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: VoterResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with mobile number + password. A voter whose ballot is
/// already committed has nothing left to do and is turned away; admins
/// can always log in.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid mobile number or password".into(),
        ))
    };

    let voter = VoterRepo::find_by_mobile(&state.pool, input.mobile_number.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &voter.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(voter_id = voter.id, "Login rejected: bad password");
        return Err(invalid());
    }

    if voter.has_voted && voter.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "You have already voted".into(),
        )));
    }

    let access_token = generate_access_token(voter.id, &voter.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(voter_id = voter.id, role = %voter.role, "Voter logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: voter.into(),
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<VoterResponse>>> {
    let voter = VoterRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::voter_not_found(user.user_id)))?;
    Ok(Json(DataResponse { data: voter.into() }))
}
