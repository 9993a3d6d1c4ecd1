//! Rating ledger model.

use draftboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One immutable row from the `ratings` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub voter_id: DbId,
    pub candidate_id: DbId,
    pub rating: i16,
    pub created_at: Timestamp,
}
