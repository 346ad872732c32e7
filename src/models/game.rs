//! Match and Series: the generated fixture list.

use crate::models::stadium::StadiumId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Unique identifier for a series.
pub type SeriesId = Uuid;

/// Lifecycle of a single match. Generated matches start `NotStarted`; the
/// result-commit operation moves them to `Completed`; the admin unlock
/// reverses that.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// Outcome of a completed match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Team1Win,
    Team2Win,
    Draw,
    Tie,
    NoResult,
    Abandoned,
}

impl MatchResult {
    /// True for outcomes that name a winner and therefore require `winner_id`.
    pub fn needs_winner(self) -> bool {
        matches!(self, MatchResult::Team1Win | MatchResult::Team2Win)
    }

    /// True for rained-off/abandoned outcomes that contribute no points.
    pub fn is_void(self) -> bool {
        matches!(self, MatchResult::NoResult | MatchResult::Abandoned)
    }
}

/// A single match inside a bilateral series.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeriesMatch {
    pub id: MatchId,
    /// Round number shared with the owning series.
    pub round: u32,
    pub series_id: SeriesId,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub stadium_id: StadiumId,
    pub status: MatchStatus,
    /// None until completed, and None for a draw/tie/no-result.
    pub winner_id: Option<TeamId>,
    /// None until completed.
    pub result: Option<MatchResult>,
    pub notes: Option<String>,
}

impl SeriesMatch {
    pub fn new(
        round: u32,
        series_id: SeriesId,
        team1_id: TeamId,
        team2_id: TeamId,
        stadium_id: StadiumId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            series_id,
            team1_id,
            team2_id,
            stadium_id,
            status: MatchStatus::NotStarted,
            winner_id: None,
            result: None,
            notes: None,
        }
    }

    /// True if `team` plays in this match.
    pub fn involves(&self, team: TeamId) -> bool {
        self.team1_id == team || self.team2_id == team
    }
}

/// Lifecycle of a series, always derived from its matches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// A bilateral series: an ordered block of matches between two teams inside
/// one round. The round itself is just this grouping key, not a stored
/// entity.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub round: u32,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    /// Ordered ids of the matches this series owns. Fixed at generation.
    pub match_ids: Vec<MatchId>,
    /// Number of matches, fixed at creation.
    pub num_matches: u32,
    /// Derived: see `status_for`. Refreshed after every commit/unlock.
    pub status: SeriesStatus,
}

impl Series {
    pub fn new(round: u32, team1_id: TeamId, team2_id: TeamId, num_matches: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            team1_id,
            team2_id,
            match_ids: Vec::with_capacity(num_matches as usize),
            num_matches,
            status: SeriesStatus::NotStarted,
        }
    }

    /// True if `team` plays in this series.
    pub fn involves(&self, team: TeamId) -> bool {
        self.team1_id == team || self.team2_id == team
    }

    /// Derive this series' status from the full match list: completed iff
    /// every owned match is completed, in-progress iff at least one is.
    pub fn status_for(&self, matches: &[SeriesMatch]) -> SeriesStatus {
        let mut total = 0u32;
        let mut done = 0u32;
        for m in matches.iter().filter(|m| m.series_id == self.id) {
            total += 1;
            if m.status == MatchStatus::Completed {
                done += 1;
            }
        }
        if total > 0 && done == total {
            SeriesStatus::Completed
        } else if done > 0 {
            SeriesStatus::InProgress
        } else {
            SeriesStatus::NotStarted
        }
    }
}
