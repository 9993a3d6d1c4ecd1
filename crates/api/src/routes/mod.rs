pub mod admin;
pub mod auth;
pub mod candidates;
pub mod health;
pub mod ratings;
pub mod teams;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/me                             current voter (auth)
///
/// /ratings                             submit ballot (auth)
///
/// /candidates                          list (auth, ?stars=&unsold_only=)
/// /candidates/random                   next lot (admin, ?stars=)
/// /candidates/{id}                     get (auth)
/// /candidates/{id}/team                set provisional team (admin, PUT)
/// /candidates/{id}/price               set provisional price (admin, PUT)
/// /candidates/{id}/sell                finalize sale (admin, POST)
///
/// /teams                               list with rosters (auth), create (admin)
///
/// /admin/voters                        create voter account (admin)
/// /admin/voters/{id}/ratings           ledger rows for a voter (admin)
/// /admin/candidates                    create candidate (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/ratings", ratings::router())
        .nest("/candidates", candidates::router())
        .nest("/teams", teams::router())
        .nest("/admin", admin::router())
}
