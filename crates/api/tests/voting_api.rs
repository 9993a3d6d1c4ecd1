//! HTTP-level integration tests for ballot submission.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth};
use draftboard_core::ballot::RatingPolicy;
use draftboard_db::models::candidate::Candidate;
use draftboard_db::repositories::{CandidateRepo, RatingRepo, VoterRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ballot(candidates: &[Candidate], ratings: &[i64]) -> serde_json::Value {
    let entries: Vec<_> = candidates
        .iter()
        .zip(ratings)
        .map(|(c, r)| json!({ "candidate_id": c.id, "rating": r }))
        .collect();
    json!({ "ratings": entries })
}

async fn assert_untouched(pool: &PgPool, voter_id: i64, candidates: &[Candidate]) {
    for c in candidates {
        let row = CandidateRepo::find_by_id(pool, c.id).await.unwrap().unwrap();
        assert_eq!(row.vote_count, 0);
        assert_eq!(row.rating_total, 0);
    }
    assert!(RatingRepo::list_by_voter(pool, voter_id).await.unwrap().is_empty());
    let voter = VoterRepo::find_by_id(pool, voter_id).await.unwrap().unwrap();
    assert!(!voter.has_voted);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Rating A..E with 5..1 succeeds once; the retry is a 409 and A's
/// aggregates moved by exactly one vote of 5.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ballot_scenario_and_retry(pool: PgPool) {
    let voter = common::create_account(&pool, "9000000101", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 5).await;
    let body = ballot(&candidates, &[5, 4, 3, 2, 1]);

    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/v1/ratings", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["recorded"], 5);
    assert!(json["data"]["message"].is_string());

    let response = post_json_auth(common::build_test_app(pool.clone()), "/api/v1/ratings", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "You have already voted");

    let a = CandidateRepo::find_by_id(&pool, candidates[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(a.vote_count, 1);
    assert_eq!(a.rating_total, 5);
}

/// Fewer than five ratings is rejected before any write.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_short_ballot_rejected(pool: PgPool) {
    let voter = common::create_account(&pool, "9000000102", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 4).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/ratings",
        ballot(&candidates, &[5, 4, 3, 2]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    assert_untouched(&pool, voter.id, &candidates).await;
}

/// One out-of-range value rejects the whole batch.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_rating_rejects_batch(pool: PgPool) {
    let voter = common::create_account(&pool, "9000000103", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 5).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/ratings",
        ballot(&candidates, &[5, 4, 6, 2, 1]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_untouched(&pool, voter.id, &candidates).await;
}

/// A rating far outside the stored column's range is still a validation
/// error with the usual body, not a deserialization failure.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_huge_rating_is_validation_error(pool: PgPool) {
    let voter = common::create_account(&pool, "9000000106", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 5).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/ratings",
        ballot(&candidates, &[5, 4, 40_000, 2, 1]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("40000"));

    assert_untouched(&pool, voter.id, &candidates).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fractional_rating_is_validation_error(pool: PgPool) {
    let voter = common::create_account(&pool, "9000000107", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 5).await;

    let mut entries: Vec<_> = candidates
        .iter()
        .map(|c| json!({ "candidate_id": c.id, "rating": 4 }))
        .collect();
    entries[2] = json!({ "candidate_id": candidates[2].id, "rating": 3.5 });

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/ratings",
        json!({ "ratings": entries }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].is_string());

    assert_untouched(&pool, voter.id, &candidates).await;
}

/// A body that is not JSON at all keeps the `{error, code}` shape.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_body_is_bad_request(pool: PgPool) {
    let voter = common::create_account(&pool, "9000000108", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 5).await;

    let response = common::post_raw_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/ratings",
        "{\"ratings\": [",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());

    assert_untouched(&pool, voter.id, &candidates).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_candidate_rejected(pool: PgPool) {
    let voter = common::create_account(&pool, "9000000104", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 4).await;
    let repeated = vec![
        candidates[0].clone(),
        candidates[1].clone(),
        candidates[2].clone(),
        candidates[3].clone(),
        candidates[0].clone(),
    ];

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/ratings",
        ballot(&repeated, &[5, 4, 3, 2, 1]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_untouched(&pool, voter.id, &candidates).await;
}

/// An unknown candidate id aborts the commit with 404 and leaves the
/// voter free to resubmit.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_candidate_is_404_and_rolled_back(pool: PgPool) {
    let voter = common::create_account(&pool, "9000000105", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 4).await;

    let mut entries: Vec<_> = candidates
        .iter()
        .map(|c| json!({ "candidate_id": c.id, "rating": 3 }))
        .collect();
    entries.push(json!({ "candidate_id": 987_654, "rating": 3 }));

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/ratings",
        json!({ "ratings": entries }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_untouched(&pool, voter.id, &candidates).await;
}

/// Distribution caps apply only when configured.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_configured_five_star_cap(pool: PgPool) {
    let voter = common::create_account(&pool, "9000000106", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 5).await;

    let mut config = common::test_config();
    config.rating = RatingPolicy {
        max_five_star: Some(2),
        ..RatingPolicy::default()
    };

    let response = post_json_auth(
        common::build_test_app_with(pool.clone(), config),
        "/api/v1/ratings",
        ballot(&candidates, &[5, 5, 5, 4, 4]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("five-star"));

    // Same ballot passes under the default policy.
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/ratings",
        ballot(&candidates, &[5, 5, 5, 4, 4]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submission_requires_token(pool: PgPool) {
    let candidates = common::create_candidates(&pool, 5).await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/ratings",
        ballot(&candidates, &[1, 2, 3, 4, 5]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// The admin audit view lists exactly the rows the ballot appended, and
/// the candidate listing reports the derived average and star bucket.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ledger_audit_and_averages(pool: PgPool) {
    let admin_token = common::admin_token(&pool).await;
    let voter = common::create_account(&pool, "9000000107", "voter").await;
    let token = common::token_for(&voter);
    let candidates = common::create_candidates(&pool, 5).await;

    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/ratings",
        ballot(&candidates, &[5, 4, 3, 2, 1]),
        &token,
    )
    .await;

    let uri = format!("/api/v1/admin/voters/{}/ratings", voter.id);
    let response = get_auth(common::build_test_app(pool.clone()), &uri, &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["candidate_id"], candidates[0].id);
    assert_eq!(rows[0]["rating"], 5);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/candidates?stars=4,5",
        &admin_token,
    )
    .await;
    let json = body_json(response).await;
    let listed = json["data"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["average_rating"], 5.0);
    assert_eq!(listed[0]["stars"], 5);

    let response = get_auth(common::build_test_app(pool), "/api/v1/admin/voters/424242/ratings", &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
