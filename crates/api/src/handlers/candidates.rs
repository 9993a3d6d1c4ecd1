//! Read handlers for the `/candidates` resource and next-lot selection.

use axum::extract::{Path, Query, State};
use axum::Json;
use draftboard_core::error::CoreError;
use draftboard_core::selection::pick_random;
use draftboard_core::types::DbId;
use draftboard_db::models::candidate::CandidateResponse;
use draftboard_db::repositories::CandidateRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{star_filter, CandidateListParams, StarParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/candidates
///
/// Eligible candidates ordered by name, optionally narrowed by star bucket
/// and to unsold candidates only.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<CandidateListParams>,
) -> AppResult<Json<DataResponse<Vec<CandidateResponse>>>> {
    let filter = star_filter(params.stars.as_deref())?;
    let candidates = CandidateRepo::list_selected(&state.pool, params.unsold_only).await?;

    let data = candidates
        .into_iter()
        .map(CandidateResponse::from)
        .filter(|c| filter.matches(c.average_rating))
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/candidates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CandidateResponse>>> {
    let candidate = CandidateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::candidate_not_found(id)))?;
    Ok(Json(DataResponse {
        data: candidate.into(),
    }))
}

/// GET /api/v1/candidates/random
///
/// Pick the next lot uniformly from eligible unsold candidates matching
/// the optional star filter.
pub async fn pick_random_unsold(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<StarParams>,
) -> AppResult<Json<DataResponse<CandidateResponse>>> {
    let filter = star_filter(params.stars.as_deref())?;
    let pool: Vec<CandidateResponse> = CandidateRepo::list_selected(&state.pool, true)
        .await?
        .into_iter()
        .map(CandidateResponse::from)
        .filter(|c| filter.matches(c.average_rating))
        .collect();

    let picked = pick_random(&pool).cloned().ok_or_else(|| {
        AppError::Core(CoreError::NoMatch(
            "No unsold candidates match the filter".into(),
        ))
    })?;

    tracing::debug!(
        candidate_id = picked.candidate.id,
        pool_size = pool.len(),
        "Picked next lot"
    );
    Ok(Json(DataResponse { data: picked }))
}
