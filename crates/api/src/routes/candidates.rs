//! Route definitions for the `/candidates` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{auction, candidates};
use crate::state::AppState;

/// Routes mounted at `/candidates`.
///
/// ```text
/// GET  /              -> list
/// GET  /random        -> pick_random_unsold
/// GET  /{id}          -> get_by_id
/// PUT  /{id}/team     -> set_team
/// PUT  /{id}/price    -> set_price
/// POST /{id}/sell     -> sell
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(candidates::list))
        .route("/random", get(candidates::pick_random_unsold))
        .route("/{id}", get(candidates::get_by_id))
        .route("/{id}/team", put(auction::set_team))
        .route("/{id}/price", put(auction::set_price))
        .route("/{id}/sell", post(auction::sell))
}
