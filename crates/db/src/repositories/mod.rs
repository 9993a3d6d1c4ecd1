//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod candidate_repo;
pub mod rating_repo;
pub mod team_repo;
pub mod voter_repo;

pub use candidate_repo::CandidateRepo;
pub use rating_repo::{BallotOutcome, RatingRepo};
pub use team_repo::TeamRepo;
pub use voter_repo::VoterRepo;
