#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use draftboard_api::auth::jwt::{generate_access_token, JwtConfig};
use draftboard_api::auth::password::hash_password;
use draftboard_api::config::ServerConfig;
use draftboard_api::router::build_app_router;
use draftboard_api::state::AppState;
use draftboard_core::ballot::RatingPolicy;
use draftboard_db::models::candidate::{Candidate, CreateCandidate};
use draftboard_db::models::team::{CreateTeam, Team};
use draftboard_db::models::voter::{CreateVoter, Voter};
use draftboard_db::repositories::{CandidateRepo, TeamRepo, VoterRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults and no distribution caps.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "draftboard-integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
        rating: RatingPolicy::default(),
        bootstrap_admin: None,
    }
}

/// Build the full application router against `pool` with the default test config.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Build the application router with a caller-supplied config.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

/// GET with a caller-supplied `Authorization` header value.
pub async fn get_with_authorization(app: Router, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Insert an account with [`TEST_PASSWORD`].
pub async fn create_account(pool: &PgPool, mobile: &str, role: &str) -> Voter {
    let input = CreateVoter {
        name: format!("Account {mobile}"),
        mobile_number: mobile.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: Some(role.to_string()),
    };
    VoterRepo::create(pool, &input)
        .await
        .expect("account creation should succeed")
}

/// Mint an access token for `voter` with the test secret.
pub fn token_for(voter: &Voter) -> String {
    generate_access_token(voter.id, &voter.role, &test_config().jwt)
        .expect("token generation should succeed")
}

pub async fn admin_token(pool: &PgPool) -> String {
    token_for(&create_account(pool, "9999999999", "admin").await)
}

pub async fn create_candidates(pool: &PgPool, count: usize) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let input = CreateCandidate {
            name: format!("Player {}", (b'A' + i as u8) as char),
            roll_number: format!("ROLL-{i:03}"),
            is_selected: None,
        };
        out.push(CandidateRepo::create(pool, &input).await.unwrap());
    }
    out
}

pub async fn create_team(pool: &PgPool, name: &str, budget: Option<i64>) -> Team {
    let input = CreateTeam {
        name: name.to_string(),
        budget,
    };
    TeamRepo::create(pool, &input).await.unwrap()
}
