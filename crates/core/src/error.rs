//! Domain error taxonomy shared by the `db` and `api` crates.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced candidate, team, or voter does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A lookup by criteria rather than id came back empty.
    #[error("No match: {0}")]
    NoMatch(String),

    /// Input was rejected before any mutation (bad rating, price, batch size).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation collides with state that can no longer change
    /// (ballot already cast, candidate already sold).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    pub fn candidate_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Candidate",
            id,
        }
    }

    pub fn team_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "Team", id }
    }

    pub fn voter_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "Voter", id }
    }

    /// The voter's ballot has already been committed.
    pub fn already_voted() -> Self {
        CoreError::Conflict("You have already voted".into())
    }

    /// The candidate's sale has already been finalized.
    pub fn already_finalized(candidate_id: DbId) -> Self {
        CoreError::Conflict(format!(
            "Candidate {candidate_id} has already been sold"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_not_found_helpers_name_the_entity() {
        assert_matches!(
            CoreError::candidate_not_found(7),
            CoreError::NotFound { entity: "Candidate", id: 7 }
        );
        assert_matches!(
            CoreError::team_not_found(3),
            CoreError::NotFound { entity: "Team", id: 3 }
        );
    }

    #[test]
    fn test_already_finalized_mentions_candidate() {
        let err = CoreError::already_finalized(42);
        assert!(err.to_string().contains("Candidate 42"));
    }
}
