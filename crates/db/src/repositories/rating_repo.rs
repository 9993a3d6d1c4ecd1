//! Repository for the `ratings` ledger and the ballot commit.

use draftboard_core::ballot::RatingEntry;
use draftboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::Rating;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, voter_id, candidate_id, rating, created_at";

/// Result of [`RatingRepo::submit_ballot`].
///
/// Every variant other than `Recorded` means the transaction was rolled
/// back and nothing was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BallotOutcome {
    /// The ballot was committed; `count` ledger rows were appended.
    Recorded { count: usize },
    VoterNotFound,
    AlreadyVoted,
    /// A rating referenced a candidate that does not exist.
    UnknownCandidate(DbId),
}

/// Provides the ledger reads and the all-or-nothing ballot write.
pub struct RatingRepo;

impl RatingRepo {
    /// Commit one voter's ballot in a single transaction.
    ///
    /// 1. Lock the voter row and re-check `has_voted`.
    /// 2. For each entry, bump the candidate's `rating_total` / `vote_count`
    ///    and append a ledger row.
    /// 3. Mark the voter as having voted.
    ///
    /// `entries` must already have passed
    /// [`validate_ballot`](draftboard_core::ballot::validate_ballot).
    pub async fn submit_ballot(
        pool: &PgPool,
        voter_id: DbId,
        entries: &[RatingEntry],
    ) -> Result<BallotOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let has_voted = sqlx::query_scalar::<_, bool>(
            "SELECT has_voted FROM voters WHERE id = $1 FOR UPDATE",
        )
        .bind(voter_id)
        .fetch_optional(&mut *tx)
        .await?;

        match has_voted {
            None => return Ok(BallotOutcome::VoterNotFound),
            Some(true) => return Ok(BallotOutcome::AlreadyVoted),
            Some(false) => {}
        }

        // Lock candidates in id order so concurrent ballots cannot deadlock.
        let mut ordered: Vec<&RatingEntry> = entries.iter().collect();
        ordered.sort_by_key(|e| e.candidate_id);

        for entry in ordered {
            let updated = sqlx::query(
                "UPDATE candidates SET
                    rating_total = rating_total + $2,
                    vote_count = vote_count + 1
                 WHERE id = $1",
            )
            .bind(entry.candidate_id)
            .bind(entry.rating)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                tracing::debug!(
                    voter_id,
                    candidate_id = entry.candidate_id,
                    "Ballot references unknown candidate, rolling back"
                );
                return Ok(BallotOutcome::UnknownCandidate(entry.candidate_id));
            }

            sqlx::query(
                "INSERT INTO ratings (voter_id, candidate_id, rating) VALUES ($1, $2, $3::SMALLINT)",
            )
            .bind(voter_id)
            .bind(entry.candidate_id)
            .bind(entry.rating)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE voters SET has_voted = true, voted_at = NOW() WHERE id = $1")
            .bind(voter_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(BallotOutcome::Recorded {
            count: entries.len(),
        })
    }

    /// All ledger rows cast by a voter, ordered by candidate.
    pub async fn list_by_voter(pool: &PgPool, voter_id: DbId) -> Result<Vec<Rating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings WHERE voter_id = $1 ORDER BY candidate_id ASC"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(voter_id)
            .fetch_all(pool)
            .await
    }

    /// Number of ledger rows for a candidate. Always equals its `vote_count`.
    pub async fn count_for_candidate(pool: &PgPool, candidate_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings WHERE candidate_id = $1")
            .bind(candidate_id)
            .fetch_one(pool)
            .await
    }
}
