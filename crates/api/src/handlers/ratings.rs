//! Handler for ballot submission.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use draftboard_core::ballot::{validate_ballot, RatingEntry};
use draftboard_core::error::CoreError;
use draftboard_db::repositories::{BallotOutcome, RatingRepo, VoterRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /ratings`.
#[derive(Debug, Deserialize)]
pub struct SubmitRatingsRequest {
    pub ratings: Vec<RatingEntry>,
}

/// Acknowledgement for a committed ballot.
#[derive(Debug, Serialize)]
pub struct SubmitRatingsResponse {
    pub message: String,
    /// Number of ratings written to the ledger.
    pub recorded: usize,
}

/// POST /api/v1/ratings
///
/// Commit the caller's whole ballot, or nothing. The has-voted flag is
/// checked here for a fast rejection and again under a row lock inside
/// the commit.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<SubmitRatingsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmitRatingsResponse>>)> {
    let voter = VoterRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::voter_not_found(user.user_id)))?;

    if voter.has_voted {
        return Err(CoreError::already_voted().into());
    }

    validate_ballot(&input.ratings, &state.config.rating)?;

    let recorded = match RatingRepo::submit_ballot(&state.pool, voter.id, &input.ratings).await? {
        BallotOutcome::Recorded { count } => count,
        BallotOutcome::VoterNotFound => return Err(CoreError::voter_not_found(voter.id).into()),
        BallotOutcome::AlreadyVoted => return Err(CoreError::already_voted().into()),
        BallotOutcome::UnknownCandidate(id) => {
            return Err(CoreError::candidate_not_found(id).into())
        }
    };

    tracing::info!(voter_id = voter.id, recorded, "Ballot committed");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmitRatingsResponse {
                message: "Ratings submitted successfully".to_string(),
                recorded,
            },
        }),
    ))
}
