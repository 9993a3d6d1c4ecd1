//! Repository for the `candidates` table.
//!
//! Every auction write is guarded by `is_sold = false`, so a sold row can
//! never be edited or sold a second time. A `None` return from those
//! methods means "missing or already sold"; callers use
//! [`CandidateRepo::find_by_id`] to tell the two apart.

use draftboard_core::types::{Amount, DbId};
use sqlx::PgPool;

use crate::models::candidate::{Candidate, CreateCandidate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, roll_number, is_selected, rating_total, vote_count, \
                       is_sold, team_id, sold_price, sold_at, created_at, updated_at";

/// Provides reads, creation, and auction transitions for candidates.
pub struct CandidateRepo;

impl CandidateRepo {
    /// Insert a new candidate, returning the created row.
    ///
    /// If `is_selected` is `None`, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateCandidate) -> Result<Candidate, sqlx::Error> {
        let query = format!(
            "INSERT INTO candidates (name, roll_number, is_selected)
             VALUES ($1, $2, COALESCE($3, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Candidate>(&query)
            .bind(&input.name)
            .bind(&input.roll_number)
            .bind(input.is_selected)
            .fetch_one(pool)
            .await
    }

    /// Find a candidate by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Candidate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM candidates WHERE id = $1");
        sqlx::query_as::<_, Candidate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List candidates taking part in the auction, ordered by name.
    ///
    /// With `unsold_only`, sold candidates are excluded.
    pub async fn list_selected(
        pool: &PgPool,
        unsold_only: bool,
    ) -> Result<Vec<Candidate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM candidates
             WHERE is_selected = true AND ($1 = false OR is_sold = false)
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Candidate>(&query)
            .bind(unsold_only)
            .fetch_all(pool)
            .await
    }

    /// Assign a provisional team to an unsold candidate.
    pub async fn set_team(
        pool: &PgPool,
        id: DbId,
        team_id: DbId,
    ) -> Result<Option<Candidate>, sqlx::Error> {
        let query = format!(
            "UPDATE candidates SET team_id = $2
             WHERE id = $1 AND is_sold = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Candidate>(&query)
            .bind(id)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a provisional price on an unsold candidate.
    pub async fn set_price(
        pool: &PgPool,
        id: DbId,
        price: Amount,
    ) -> Result<Option<Candidate>, sqlx::Error> {
        let query = format!(
            "UPDATE candidates SET sold_price = $2
             WHERE id = $1 AND is_sold = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Candidate>(&query)
            .bind(id)
            .bind(price)
            .fetch_optional(pool)
            .await
    }

    /// Finalize a sale: flip `is_sold` and pin team and price.
    ///
    /// This is a compare-and-swap on `is_sold = false`; of any number of
    /// concurrent calls for the same candidate at most one returns `Some`.
    pub async fn finalize_sale(
        pool: &PgPool,
        id: DbId,
        team_id: DbId,
        price: Amount,
    ) -> Result<Option<Candidate>, sqlx::Error> {
        let query = format!(
            "UPDATE candidates SET
                is_sold = true,
                team_id = $2,
                sold_price = $3,
                sold_at = NOW()
             WHERE id = $1 AND is_sold = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Candidate>(&query)
            .bind(id)
            .bind(team_id)
            .bind(price)
            .fetch_optional(pool)
            .await
    }
}
