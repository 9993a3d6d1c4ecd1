//! Repository for the `voters` table.

use draftboard_core::roles::ROLE_VOTER;
use draftboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::voter::{CreateVoter, Voter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, mobile_number, password_hash, role, has_voted, \
                       voted_at, created_at, updated_at";

/// Provides lookup and creation for voter accounts.
///
/// The `has_voted` flag is only ever set by
/// [`RatingRepo::submit_ballot`](crate::repositories::RatingRepo::submit_ballot),
/// inside the same transaction that writes the ballot.
pub struct VoterRepo;

impl VoterRepo {
    /// Insert a new voter, returning the created row.
    ///
    /// If `role` is `None`, defaults to `voter`.
    pub async fn create(pool: &PgPool, input: &CreateVoter) -> Result<Voter, sqlx::Error> {
        let query = format!(
            "INSERT INTO voters (name, mobile_number, password_hash, role)
             VALUES ($1, $2, $3, COALESCE($4, '{ROLE_VOTER}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Voter>(&query)
            .bind(&input.name)
            .bind(&input.mobile_number)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a voter by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Voter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM voters WHERE id = $1");
        sqlx::query_as::<_, Voter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a voter by mobile number (the login key).
    pub async fn find_by_mobile(
        pool: &PgPool,
        mobile_number: &str,
    ) -> Result<Option<Voter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM voters WHERE mobile_number = $1");
        sqlx::query_as::<_, Voter>(&query)
            .bind(mobile_number)
            .fetch_optional(pool)
            .await
    }
}
