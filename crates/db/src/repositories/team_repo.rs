//! Repository for the `teams` table and the derived roster view.

use std::collections::HashMap;

use draftboard_core::auction::{remaining_budget, spent, DEFAULT_TEAM_BUDGET};
use draftboard_core::types::{Amount, DbId};
use sqlx::PgPool;

use crate::models::team::{CreateTeam, RosterEntry, Team, TeamWithRoster};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, budget, created_at, updated_at";

/// Provides team CRUD plus roster aggregation.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a new team, returning the created row.
    ///
    /// If `budget` is `None`, defaults to [`DEFAULT_TEAM_BUDGET`].
    pub async fn create(pool: &PgPool, input: &CreateTeam) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (name, budget)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(input.name.trim())
            .bind(input.budget.unwrap_or(DEFAULT_TEAM_BUDGET))
            .fetch_one(pool)
            .await
    }

    /// Find a team by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all teams ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams ORDER BY name ASC");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }

    /// Sum of sold prices currently charged to a team.
    /// Saturates at `Amount::MAX`; see [`spent`].
    pub async fn spent_by_team(pool: &PgPool, team_id: DbId) -> Result<Amount, sqlx::Error> {
        let prices = sqlx::query_scalar::<_, i64>(
            "SELECT sold_price FROM candidates WHERE team_id = $1 AND is_sold = true",
        )
        .bind(team_id)
        .fetch_all(pool)
        .await?;
        Ok(spent(&prices))
    }

    /// Every team with its roster and remaining budget.
    ///
    /// Rosters are recomputed from `candidates` on each call; two queries
    /// regardless of the number of teams.
    pub async fn list_with_rosters(pool: &PgPool) -> Result<Vec<TeamWithRoster>, sqlx::Error> {
        let teams = Self::list(pool).await?;

        let entries = sqlx::query_as::<_, RosterEntry>(
            "SELECT id AS candidate_id, name, sold_price AS price, team_id
             FROM candidates
             WHERE is_sold = true AND team_id IS NOT NULL
             ORDER BY sold_at ASC, id ASC",
        )
        .fetch_all(pool)
        .await?;

        let mut by_team: HashMap<DbId, Vec<RosterEntry>> = HashMap::new();
        for entry in entries {
            by_team.entry(entry.team_id).or_default().push(entry);
        }

        Ok(teams
            .into_iter()
            .map(|team| {
                let roster = by_team.remove(&team.id).unwrap_or_default();
                let prices: Vec<Amount> = roster.iter().map(|e| e.price).collect();
                TeamWithRoster {
                    id: team.id,
                    name: team.name,
                    budget: team.budget,
                    spent: spent(&prices),
                    remaining_budget: remaining_budget(team.budget, &prices),
                    roster,
                }
            })
            .collect())
    }
}
