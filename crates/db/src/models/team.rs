//! Team entity model, DTOs, and the derived roster view.

use draftboard_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A team row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    pub budget: Amount,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new team.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeam {
    pub name: String,
    /// Defaults to 1,000,000 if omitted.
    pub budget: Option<Amount>,
}

/// One sold candidate as it appears on a team roster.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RosterEntry {
    pub candidate_id: DbId,
    pub name: String,
    pub price: Amount,
    #[serde(skip)]
    pub team_id: DbId,
}

/// A team together with its derived roster and budget figures.
#[derive(Debug, Clone, Serialize)]
pub struct TeamWithRoster {
    pub id: DbId,
    pub name: String,
    pub budget: Amount,
    pub roster: Vec<RosterEntry>,
    pub spent: Amount,
    pub remaining_budget: Amount,
}
