//! Auction rules: prices, budgets, and the star filter used to pick lots.
//!
//! A team's roster and remaining budget are never stored. They are derived
//! from the sold candidates at read time, and the helpers here do the
//! arithmetic on the rows the repository returns.

use crate::types::Amount;

/// Budget assigned to a team when none is given at creation.
pub const DEFAULT_TEAM_BUDGET: Amount = 1_000_000;

/// Upper bound for any single price or budget (one trillion units).
///
/// Must match the `ck_*_max` constraints in
/// `20260301000005_bound_amounts.sql`.
pub const MAX_AMOUNT: Amount = 1_000_000_000_000;

/// Highest star bucket a candidate can fall into.
pub const MAX_STARS: i16 = 5;

/// Validate that a sale price is within `0..=MAX_AMOUNT`.
pub fn validate_price(price: Amount) -> Result<(), String> {
    if price < 0 {
        return Err(format!("Price must be non-negative (got {price})"));
    }
    if price > MAX_AMOUNT {
        return Err(format!("Price must not exceed {MAX_AMOUNT} (got {price})"));
    }
    Ok(())
}

/// Validate that a team budget is within `0..=MAX_AMOUNT`.
pub fn validate_budget(budget: Amount) -> Result<(), String> {
    if budget < 0 {
        return Err(format!("Budget must be non-negative (got {budget})"));
    }
    if budget > MAX_AMOUNT {
        return Err(format!("Budget must not exceed {MAX_AMOUNT} (got {budget})"));
    }
    Ok(())
}

/// Validate that a team name is not blank.
pub fn validate_team_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Team name must not be empty".to_string());
    }
    Ok(())
}

/// Mean rating, or `0.0` for a candidate nobody has rated yet.
pub fn average_rating(rating_total: i64, vote_count: i32) -> f64 {
    if vote_count <= 0 {
        return 0.0;
    }
    rating_total as f64 / f64::from(vote_count)
}

/// Star bucket for an average rating: `floor(average)` clamped to `0..=5`.
pub fn star_bucket(average: f64) -> i16 {
    (average.floor() as i16).clamp(0, MAX_STARS)
}

/// Narrow a wide intermediate back to [`Amount`], saturating at the bounds.
fn saturate(value: i128) -> Amount {
    value.clamp(i128::from(Amount::MIN), i128::from(Amount::MAX)) as Amount
}

/// Sum of sold prices on a roster, saturating instead of overflowing.
pub fn spent(prices: &[Amount]) -> Amount {
    saturate(prices.iter().map(|&p| i128::from(p)).sum())
}

/// Budget left after the roster's sold prices. May be negative: budgets are
/// advisory and not enforced at sale time.
pub fn remaining_budget(budget: Amount, prices: &[Amount]) -> Amount {
    budget.saturating_sub(spent(prices))
}

/// Whether adding a sale at `price` would take a team past its budget.
pub fn exceeds_budget(budget: Amount, already_spent: Amount, price: Amount) -> bool {
    i128::from(already_spent) + i128::from(price) > i128::from(budget)
}

/// Set of star buckets selected by the operator. Empty means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarFilter {
    stars: Vec<i16>,
}

impl StarFilter {
    /// Build a filter from explicit star values, rejecting anything
    /// outside `0..=5`.
    pub fn new(stars: Vec<i16>) -> Result<Self, String> {
        if let Some(bad) = stars.iter().find(|s| !(0..=MAX_STARS).contains(*s)) {
            return Err(format!("Star filter value {bad} is outside 0..={MAX_STARS}"));
        }
        let mut stars = stars;
        stars.sort_unstable();
        stars.dedup();
        Ok(Self { stars })
    }

    /// Parse a comma-separated list such as `"4,5"`. Blank input yields
    /// the empty ("all") filter.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let stars = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i16>()
                    .map_err(|_| format!("Invalid star value '{s}'"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(stars)
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[i16] {
        &self.stars
    }

    /// True when the filter is empty or contains `floor(average)`.
    pub fn matches(&self, average: f64) -> bool {
        self.stars.is_empty() || self.stars.contains(&star_bucket(average))
    }
}
