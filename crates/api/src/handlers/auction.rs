//! Auction controls: provisional team/price edits and the final sale.
//!
//! All handlers require the `admin` role via [`RequireAdmin`]. Writes go
//! through repository methods guarded by `is_sold = false`, so a sold
//! candidate is never modified again.

use axum::extract::{Path, State};
use axum::Json;
use draftboard_core::auction::{exceeds_budget, validate_price};
use draftboard_core::error::CoreError;
use draftboard_core::types::{Amount, DbId};
use draftboard_db::models::candidate::CandidateResponse;
use draftboard_db::models::team::Team;
use draftboard_db::repositories::{CandidateRepo, TeamRepo};
use draftboard_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /candidates/{id}/team`.
#[derive(Debug, Deserialize)]
pub struct SetTeamRequest {
    pub team_id: DbId,
}

/// Request body for `PUT /candidates/{id}/price`.
#[derive(Debug, Deserialize)]
pub struct SetPriceRequest {
    pub price: Amount,
}

/// Request body for `POST /candidates/{id}/sell`.
#[derive(Debug, Deserialize)]
pub struct SellRequest {
    pub team_id: DbId,
    pub price: Amount,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// PUT /api/v1/candidates/{id}/team
pub async fn set_team(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<SetTeamRequest>,
) -> AppResult<Json<DataResponse<CandidateResponse>>> {
    ensure_team(&state.pool, input.team_id).await?;

    let candidate = match CandidateRepo::set_team(&state.pool, id, input.team_id).await? {
        Some(c) => c,
        None => return Err(missing_or_sold(&state.pool, id).await),
    };

    tracing::info!(
        candidate_id = id,
        team_id = input.team_id,
        admin_id = admin.user_id,
        "Provisional team set"
    );
    Ok(Json(DataResponse {
        data: candidate.into(),
    }))
}

/// PUT /api/v1/candidates/{id}/price
pub async fn set_price(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<SetPriceRequest>,
) -> AppResult<Json<DataResponse<CandidateResponse>>> {
    validate_price(input.price).map_err(CoreError::Validation)?;

    let candidate = match CandidateRepo::set_price(&state.pool, id, input.price).await? {
        Some(c) => c,
        None => return Err(missing_or_sold(&state.pool, id).await),
    };

    tracing::info!(
        candidate_id = id,
        price = input.price,
        admin_id = admin.user_id,
        "Provisional price set"
    );
    Ok(Json(DataResponse {
        data: candidate.into(),
    }))
}

/// POST /api/v1/candidates/{id}/sell
///
/// Finalize the sale. Exactly one of any number of concurrent calls for the
/// same candidate succeeds; the rest get 409 and the first sale's team and
/// price stand. Going over the team's budget is logged, not refused.
pub async fn sell(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<SellRequest>,
) -> AppResult<Json<DataResponse<CandidateResponse>>> {
    let candidate = CandidateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::candidate_not_found(id)))?;

    if !candidate.is_selected {
        return Err(CoreError::Validation(format!(
            "Candidate {id} is not eligible for the auction"
        ))
        .into());
    }

    if candidate.is_sold {
        return Err(CoreError::already_finalized(id).into());
    }

    let team = ensure_team(&state.pool, input.team_id).await?;
    validate_price(input.price).map_err(CoreError::Validation)?;

    let already_spent = TeamRepo::spent_by_team(&state.pool, team.id).await?;
    if exceeds_budget(team.budget, already_spent, input.price) {
        tracing::warn!(
            team_id = team.id,
            budget = team.budget,
            already_spent,
            price = input.price,
            "Sale exceeds team budget"
        );
    }

    let sold = match CandidateRepo::finalize_sale(&state.pool, id, team.id, input.price).await? {
        Some(c) => c,
        None => return Err(missing_or_sold(&state.pool, id).await),
    };

    tracing::info!(
        candidate_id = id,
        team_id = team.id,
        price = input.price,
        admin_id = admin.user_id,
        "Sale finalized"
    );
    Ok(Json(DataResponse { data: sold.into() }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_team(pool: &DbPool, team_id: DbId) -> AppResult<Team> {
    TeamRepo::find_by_id(pool, team_id)
        .await?
        .ok_or(AppError::Core(CoreError::team_not_found(team_id)))
}

/// Explain why a guarded update matched no row: the candidate is either
/// missing (404) or already sold (409).
async fn missing_or_sold(pool: &DbPool, id: DbId) -> AppError {
    match CandidateRepo::find_by_id(pool, id).await {
        Ok(Some(_)) => CoreError::already_finalized(id).into(),
        Ok(None) => CoreError::candidate_not_found(id).into(),
        Err(e) => e.into(),
    }
}
