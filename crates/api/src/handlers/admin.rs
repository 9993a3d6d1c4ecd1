//! Handlers for the `/admin` resource (accounts, candidates, ledger audit).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use draftboard_core::error::CoreError;
use draftboard_core::roles::validate_role;
use draftboard_core::types::DbId;
use draftboard_db::models::candidate::{CandidateResponse, CreateCandidate};
use draftboard_db::models::rating::Rating;
use draftboard_db::models::voter::{CreateVoter, VoterResponse};
use draftboard_db::repositories::{CandidateRepo, RatingRepo, VoterRepo};
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/voters`.
#[derive(Debug, Deserialize)]
pub struct CreateVoterRequest {
    pub name: String,
    pub mobile_number: String,
    pub password: String,
    /// Defaults to `voter` if omitted.
    pub role: Option<String>,
}

/// POST /api/v1/admin/voters
pub async fn create_voter(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateVoterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<VoterResponse>>)> {
    if input.name.trim().is_empty() || input.mobile_number.trim().is_empty() {
        return Err(CoreError::Validation("Name and mobile number are required".into()).into());
    }
    if let Some(role) = &input.role {
        validate_role(role).map_err(CoreError::Validation)?;
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(CoreError::Validation)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateVoter {
        name: input.name.trim().to_string(),
        mobile_number: input.mobile_number.trim().to_string(),
        password_hash,
        role: input.role,
    };
    let voter = VoterRepo::create(&state.pool, &create).await?;

    tracing::info!(
        voter_id = voter.id,
        role = %voter.role,
        admin_id = admin.user_id,
        "Voter account created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: voter.into() })))
}

/// POST /api/v1/admin/candidates
pub async fn create_candidate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateCandidate>,
) -> AppResult<(StatusCode, Json<DataResponse<CandidateResponse>>)> {
    if input.name.trim().is_empty() || input.roll_number.trim().is_empty() {
        return Err(CoreError::Validation("Name and roll number are required".into()).into());
    }

    let candidate = CandidateRepo::create(&state.pool, &input).await?;
    tracing::info!(
        candidate_id = candidate.id,
        admin_id = admin.user_id,
        "Candidate created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: candidate.into(),
        }),
    ))
}

/// GET /api/v1/admin/voters/{id}/ratings
///
/// The ledger rows a voter cast, for audit.
pub async fn list_voter_ratings(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Rating>>>> {
    VoterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::voter_not_found(id)))?;

    let ratings = RatingRepo::list_by_voter(&state.pool, id).await?;
    Ok(Json(DataResponse { data: ratings }))
}
