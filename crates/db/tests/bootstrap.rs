use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    draftboard_db::health_check(&pool).await.unwrap();

    for table in ["voters", "teams", "candidates", "ratings"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Unique constraints follow the `uq_` naming convention the API relies on
/// to map violations to 409 Conflict.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::text FROM pg_constraint
         WHERE contype = 'u' AND conrelid::regclass::text IN ('voters', 'teams', 'candidates', 'ratings')
         ORDER BY conname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let names: Vec<String> = names.into_iter().map(|(n,)| n).collect();
    assert_eq!(
        names,
        vec![
            "uq_candidates_roll_number",
            "uq_ratings_voter_candidate",
            "uq_teams_name",
            "uq_voters_mobile_number",
        ]
    );
}

/// The schema refuses a sold candidate without a team.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sold_requires_team(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO candidates (name, roll_number, is_sold) VALUES ('Orphan', 'R-0', true)",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err(), "sold row without team must violate a check");
}
