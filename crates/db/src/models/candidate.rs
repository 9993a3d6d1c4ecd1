//! Candidate entity model and DTOs.

use draftboard_core::auction::{average_rating, star_bucket};
use draftboard_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A candidate row from the `candidates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Candidate {
    pub id: DbId,
    pub name: String,
    pub roll_number: String,
    /// Whether the candidate takes part in the auction.
    pub is_selected: bool,
    /// Running sum of every rating received.
    pub rating_total: i64,
    pub vote_count: i32,
    pub is_sold: bool,
    pub team_id: Option<DbId>,
    /// Meaningful only when `is_sold` is true.
    pub sold_price: Amount,
    pub sold_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Candidate {
    pub fn average_rating(&self) -> f64 {
        average_rating(self.rating_total, self.vote_count)
    }
}

/// Candidate as returned by the API: the row plus read-time rating fields.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateResponse {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub average_rating: f64,
    pub stars: i16,
}

impl From<Candidate> for CandidateResponse {
    fn from(candidate: Candidate) -> Self {
        let average_rating = candidate.average_rating();
        Self {
            candidate,
            average_rating,
            stars: star_bucket(average_rating),
        }
    }
}

/// DTO for creating a new candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCandidate {
    pub name: String,
    pub roll_number: String,
    /// Defaults to `true` if omitted.
    pub is_selected: Option<bool>,
}
