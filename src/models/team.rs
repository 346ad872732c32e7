//! Team identity and the derived TeamStanding statistics block.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches, series, and penalties).
pub type TeamId = Uuid;

/// A team in the tournament: identity only. Statistics are never stored
/// here; they are recomputed from the match/series/penalty lists on every
/// read (see `logic::standings`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Short display code, e.g. "IND".
    pub short_code: String,
    pub owner: String,
    /// Opaque reference to an uploaded logo (handled outside the core).
    pub logo_ref: Option<String>,
}

impl Team {
    /// Create a new team with the given name and short code.
    pub fn new(name: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            short_code: short_code.into(),
            owner: String::new(),
            logo_ref: None,
        }
    }
}

/// Derived statistics row for one team (the standings table projection).
///
/// Invariant: `total_points == base_points + bonus_points - penalty_points`,
/// and `pct == total_points / max_attainable * 100` (0 when nothing has
/// been played yet).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub name: String,
    pub short_code: String,
    pub series_played: u32,
    pub matches_played: u32,
    pub won: u32,
    pub lost: u32,
    pub drawn: u32,
    pub tied: u32,
    pub no_result: u32,
    pub base_points: i64,
    pub bonus_points: i64,
    pub penalty_points: i64,
    pub total_points: i64,
    /// Points available had the team won every completed match/series.
    pub max_attainable: i64,
    pub pct: f64,
}

impl TeamStanding {
    /// Zeroed row for a team that has not played anything yet.
    pub fn zeroed(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
            short_code: team.short_code.clone(),
            series_played: 0,
            matches_played: 0,
            won: 0,
            lost: 0,
            drawn: 0,
            tied: 0,
            no_result: 0,
            base_points: 0,
            bonus_points: 0,
            penalty_points: 0,
            total_points: 0,
            max_attainable: 0,
            pct: 0.0,
        }
    }
}
