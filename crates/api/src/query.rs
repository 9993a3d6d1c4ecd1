//! Query parameter types shared by the candidate handlers.

use draftboard_core::auction::StarFilter;
use serde::Deserialize;

use crate::error::AppError;

/// Query parameters for `GET /candidates` (`?stars=4,5&unsold_only=true`).
#[derive(Debug, Default, Deserialize)]
pub struct CandidateListParams {
    /// Comma-separated star buckets. Absent or blank means all.
    pub stars: Option<String>,
    #[serde(default)]
    pub unsold_only: bool,
}

/// Query parameters for `GET /candidates/random` (`?stars=`).
#[derive(Debug, Default, Deserialize)]
pub struct StarParams {
    pub stars: Option<String>,
}

/// Parse an optional `stars` query value into a [`StarFilter`].
pub fn star_filter(raw: Option<&str>) -> Result<StarFilter, AppError> {
    match raw {
        Some(raw) => StarFilter::parse(raw).map_err(AppError::BadRequest),
        None => Ok(StarFilter::default()),
    }
}
