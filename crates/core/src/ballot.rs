//! Rating ballot rules.
//!
//! A ballot is the full batch of ratings one voter submits in a single
//! request. [`validate_ballot`] runs every check that can be decided without
//! storage, so a rejected ballot never reaches the database.
//!
//! Distribution caps (max five-star / max one-star) are part of
//! [`RatingPolicy`] and are disabled unless explicitly configured.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lowest accepted rating value.
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating value.
pub const MAX_RATING: i64 = 5;

/// Default minimum number of ratings in one ballot.
pub const DEFAULT_MIN_BATCH: usize = 5;

/// One rating inside a ballot.
///
/// `rating` is wider than the stored SMALLINT so any integer a client sends
/// reaches [`validate_ballot`] and fails as [`BallotError::InvalidRating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub candidate_id: DbId,
    pub rating: i64,
}

/// Server-side ballot policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingPolicy {
    /// Minimum number of entries a ballot must contain.
    pub min_batch: usize,
    /// Maximum number of five-star entries, or `None` for no cap.
    pub max_five_star: Option<usize>,
    /// Maximum number of one-star entries, or `None` for no cap.
    pub max_one_star: Option<usize>,
}

impl Default for RatingPolicy {
    fn default() -> Self {
        Self {
            min_batch: DEFAULT_MIN_BATCH,
            max_five_star: None,
            max_one_star: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BallotError {
    #[error("You must rate at least {min} players (got {got})")]
    InsufficientRatings { min: usize, got: usize },

    #[error("Rating {rating} for candidate {candidate_id} is outside 1..=5")]
    InvalidRating { candidate_id: DbId, rating: i64 },

    #[error("Candidate {candidate_id} is rated more than once")]
    DuplicateCandidate { candidate_id: DbId },

    #[error("At most {max} five-star ratings are allowed (got {got})")]
    TooManyFiveStar { max: usize, got: usize },

    #[error("At most {max} one-star ratings are allowed (got {got})")]
    TooManyOneStar { max: usize, got: usize },
}

impl From<BallotError> for CoreError {
    fn from(err: BallotError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// Check that `rating` is within the accepted star range.
pub fn is_valid_rating(rating: i64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Count entries per star value. Index 0 holds one-star entries.
///
/// Out-of-range ratings are ignored; callers validate them separately.
pub fn star_counts(entries: &[RatingEntry]) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for entry in entries {
        if is_valid_rating(entry.rating) {
            counts[(entry.rating - MIN_RATING) as usize] += 1;
        }
    }
    counts
}

/// Validate a full ballot against `policy`.
///
/// Checks run in a fixed order so the first reported error is stable:
/// batch size, rating range, duplicate candidates, then distribution caps.
pub fn validate_ballot(entries: &[RatingEntry], policy: &RatingPolicy) -> Result<(), BallotError> {
    if entries.len() < policy.min_batch {
        return Err(BallotError::InsufficientRatings {
            min: policy.min_batch,
            got: entries.len(),
        });
    }

    if let Some(bad) = entries.iter().find(|e| !is_valid_rating(e.rating)) {
        return Err(BallotError::InvalidRating {
            candidate_id: bad.candidate_id,
            rating: bad.rating,
        });
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.candidate_id) {
            return Err(BallotError::DuplicateCandidate {
                candidate_id: entry.candidate_id,
            });
        }
    }

    let counts = star_counts(entries);
    if let Some(max) = policy.max_five_star {
        let got = counts[4];
        if got > max {
            return Err(BallotError::TooManyFiveStar { max, got });
        }
    }
    if let Some(max) = policy.max_one_star {
        let got = counts[0];
        if got > max {
            return Err(BallotError::TooManyOneStar { max, got });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn entries(ratings: &[i64]) -> Vec<RatingEntry> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, &rating)| RatingEntry {
                candidate_id: i as DbId + 1,
                rating,
            })
            .collect()
    }

    #[test]
    fn test_full_spread_ballot_passes() {
        let ballot = entries(&[5, 4, 3, 2, 1]);
        assert!(validate_ballot(&ballot, &RatingPolicy::default()).is_ok());
    }

    #[test]
    fn test_short_ballot_rejected() {
        let ballot = entries(&[5, 4, 3, 2]);
        assert_matches!(
            validate_ballot(&ballot, &RatingPolicy::default()),
            Err(BallotError::InsufficientRatings { min: 5, got: 4 })
        );
    }

    #[test]
    fn test_empty_ballot_rejected() {
        assert_matches!(
            validate_ballot(&[], &RatingPolicy::default()),
            Err(BallotError::InsufficientRatings { got: 0, .. })
        );
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        let ballot = entries(&[5, 4, 6, 2, 1]);
        assert_matches!(
            validate_ballot(&ballot, &RatingPolicy::default()),
            Err(BallotError::InvalidRating { candidate_id: 3, rating: 6 })
        );

        let ballot = entries(&[0, 4, 3, 2, 1]);
        assert_matches!(
            validate_ballot(&ballot, &RatingPolicy::default()),
            Err(BallotError::InvalidRating { rating: 0, .. })
        );
    }

    #[test]
    fn test_rating_far_outside_smallint_rejected() {
        let ballot = entries(&[5, 4, 40_000, 2, 1]);
        assert_matches!(
            validate_ballot(&ballot, &RatingPolicy::default()),
            Err(BallotError::InvalidRating { candidate_id: 3, rating: 40_000 })
        );
    }

    #[test]
    fn test_size_checked_before_range() {
        let ballot = entries(&[9, 9]);
        assert_matches!(
            validate_ballot(&ballot, &RatingPolicy::default()),
            Err(BallotError::InsufficientRatings { .. })
        );
    }

    #[test]
    fn test_duplicate_candidate_rejected() {
        let mut ballot = entries(&[5, 4, 3, 2, 1]);
        ballot[4].candidate_id = 2;
        assert_matches!(
            validate_ballot(&ballot, &RatingPolicy::default()),
            Err(BallotError::DuplicateCandidate { candidate_id: 2 })
        );
    }

    #[test]
    fn test_caps_disabled_by_default() {
        let ballot = entries(&[5; 12]);
        assert!(validate_ballot(&ballot, &RatingPolicy::default()).is_ok());

        let ballot = entries(&[1; 6]);
        assert!(validate_ballot(&ballot, &RatingPolicy::default()).is_ok());
    }

    #[test]
    fn test_five_star_cap_enforced_when_configured() {
        let policy = RatingPolicy {
            max_five_star: Some(10),
            ..RatingPolicy::default()
        };
        assert!(validate_ballot(&entries(&[5; 10]), &policy).is_ok());
        assert_matches!(
            validate_ballot(&entries(&[5; 11]), &policy),
            Err(BallotError::TooManyFiveStar { max: 10, got: 11 })
        );
    }

    #[test]
    fn test_one_star_cap_enforced_when_configured() {
        let policy = RatingPolicy {
            max_one_star: Some(1),
            ..RatingPolicy::default()
        };
        assert!(validate_ballot(&entries(&[1, 2, 3, 4, 5]), &policy).is_ok());
        assert_matches!(
            validate_ballot(&entries(&[1, 1, 3, 4, 5]), &policy),
            Err(BallotError::TooManyOneStar { max: 1, got: 2 })
        );
    }

    #[test]
    fn test_star_counts() {
        let counts = star_counts(&entries(&[5, 5, 3, 1, 9]));
        assert_eq!(counts, [1, 0, 1, 0, 2]);
    }

    #[test]
    fn test_ballot_error_converts_to_validation() {
        let err: CoreError = BallotError::InsufficientRatings { min: 5, got: 1 }.into();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("at least 5"));
    }
}
