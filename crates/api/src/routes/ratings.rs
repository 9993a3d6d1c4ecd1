use axum::routing::post;
use axum::Router;

use crate::handlers::ratings;
use crate::state::AppState;

/// Routes mounted at `/ratings`.
///
/// ```text
/// POST /    -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(ratings::submit))
}
