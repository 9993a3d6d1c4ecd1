//! Handlers for the `/teams` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use draftboard_core::auction::{validate_budget, validate_team_name};
use draftboard_core::error::CoreError;
use draftboard_db::models::team::{CreateTeam, Team, TeamWithRoster};
use draftboard_db::repositories::TeamRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/teams
///
/// Every team with its roster, spent total, and remaining budget, derived
/// from sold candidates at read time.
pub async fn list_with_rosters(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<TeamWithRoster>>>> {
    let teams = TeamRepo::list_with_rosters(&state.pool).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// POST /api/v1/teams
///
/// Budget defaults to 1,000,000 when omitted. A duplicate name is a 409 via
/// the `uq_teams_name` constraint.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateTeam>,
) -> AppResult<(StatusCode, Json<DataResponse<Team>>)> {
    validate_team_name(&input.name).map_err(CoreError::Validation)?;
    if let Some(budget) = input.budget {
        validate_budget(budget).map_err(CoreError::Validation)?;
    }

    let team = TeamRepo::create(&state.pool, &input).await?;
    tracing::info!(team_id = team.id, admin_id = admin.user_id, "Team created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: team })))
}
