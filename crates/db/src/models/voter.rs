//! Voter account model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use draftboard_core::types::{DbId, Timestamp};

/// Full voter row from the `voters` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`VoterResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Voter {
    pub id: DbId,
    pub name: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub role: String,
    pub has_voted: bool,
    pub voted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe voter representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct VoterResponse {
    pub id: DbId,
    pub name: String,
    pub mobile_number: String,
    pub role: String,
    pub has_voted: bool,
    pub voted_at: Option<Timestamp>,
}

impl From<Voter> for VoterResponse {
    fn from(voter: Voter) -> Self {
        Self {
            id: voter.id,
            name: voter.name,
            mobile_number: voter.mobile_number,
            role: voter.role,
            has_voted: voter.has_voted,
            voted_at: voter.voted_at,
        }
    }
}

/// DTO for creating a voter account. The password must already be hashed.
#[derive(Debug, Deserialize)]
pub struct CreateVoter {
    pub name: String,
    pub mobile_number: String,
    pub password_hash: String,
    /// Defaults to `voter` if omitted.
    pub role: Option<String>,
}
