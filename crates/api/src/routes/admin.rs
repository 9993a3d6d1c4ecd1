//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /voters                -> create_voter
/// GET  /voters/{id}/ratings   -> list_voter_ratings
/// POST /candidates            -> create_candidate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/voters", post(admin::create_voter))
        .route("/voters/{id}/ratings", get(admin::list_voter_ratings))
        .route("/candidates", post(admin::create_candidate))
}
