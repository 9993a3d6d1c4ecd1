use axum::routing::get;
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// GET  /    -> list_with_rosters
/// POST /    -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(teams::list_with_rosters).post(teams::create))
}
