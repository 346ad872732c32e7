//! Tournament aggregate, penalties, activity log, and error type.

use crate::models::config::{PointsConfig, ScheduleConfig};
use crate::models::game::{MatchId, Series, SeriesMatch};
use crate::models::stadium::{Stadium, StadiumId};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, PartialEq)]
pub enum TournamentError {
    /// Fewer than 2 teams: nothing to pair.
    NotEnoughTeams,
    /// A schedule already exists; use regenerate instead.
    ScheduleExists,
    /// Tournament is not in a state that allows this action.
    InvalidState,
    MatchNotFound(MatchId),
    TeamNotFound(TeamId),
    StadiumNotFound(StadiumId),
    PenaltyNotFound(PenaltyId),
    /// Result/winner combination is inconsistent (e.g. a win without a
    /// winner, or a winner not playing in the match).
    InvalidResult,
    /// Match already has a committed result; unlock it first.
    MatchLocked(MatchId),
    /// Unlock requested for a match that has no committed result.
    MatchNotCompleted(MatchId),
    /// Penalty points must be a positive deduction.
    InvalidPenalty,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams => write!(f, "Need at least 2 teams to build a schedule"),
            TournamentError::ScheduleExists => write!(f, "A schedule already exists; regenerate instead"),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::StadiumNotFound(_) => write!(f, "Stadium not found"),
            TournamentError::PenaltyNotFound(_) => write!(f, "Penalty record not found"),
            TournamentError::InvalidResult => write!(f, "Result and winner selection are inconsistent"),
            TournamentError::MatchLocked(_) => write!(f, "Match already has a result; unlock it first"),
            TournamentError::MatchNotCompleted(_) => write!(f, "Match has no result to unlock"),
            TournamentError::InvalidPenalty => write!(f, "Penalty points must be greater than zero"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Unique identifier for a penalty record.
pub type PenaltyId = Uuid;

/// A points deduction against one team. Append-only; removable by id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub id: PenaltyId,
    pub team_id: TeamId,
    /// Positive number of points, interpreted as a deduction.
    pub points: u32,
    pub reason: String,
    pub recorded_at: DateTime<Utc>,
}

impl Penalty {
    pub fn new(team_id: TeamId, points: u32, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            points,
            reason: reason.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// One line of the activity log (the only history the app keeps).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Overall tournament phase.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Adding teams/stadiums, editing config; no schedule yet.
    #[default]
    Setup,
    /// Schedule generated; results being recorded.
    Ongoing,
    /// Every series completed.
    Completed,
}

/// Full tournament state. The aggregate is treated as a single value and
/// replaced wholesale on every persisted write; the core never performs
/// partial updates at the storage boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    pub teams: Vec<Team>,
    pub stadiums: Vec<Stadium>,
    /// All generated matches, in generation order.
    pub matches: Vec<SeriesMatch>,
    /// All generated series, in generation order.
    pub series: Vec<Series>,
    pub penalties: Vec<Penalty>,
    pub points: PointsConfig,
    pub schedule: ScheduleConfig,
    pub activity_log: Vec<LogEntry>,
}

impl Tournament {
    /// Create a new tournament in Setup state with no teams.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: TournamentStatus::Setup,
            teams: Vec::new(),
            stadiums: Vec::new(),
            matches: Vec::new(),
            series: Vec::new(),
            penalties: Vec::new(),
            points: PointsConfig::default(),
            schedule: ScheduleConfig::default(),
            activity_log: Vec::new(),
        }
    }

    /// Create a tournament with an initial roster (e.g. for tests).
    pub fn with_teams(name: impl Into<String>, teams: Vec<Team>) -> Self {
        Self {
            teams,
            ..Self::new(name)
        }
    }

    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut SeriesMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Add a team. Names must be unique (case-insensitive) and non-empty.
    /// Allowed at any phase; late additions simply never appear in an
    /// already-generated schedule.
    pub fn add_team(&mut self, team: Team) -> Result<TeamId, TournamentError> {
        let name = team.name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Remove a team by id (only valid in Setup; teams are never deleted
    /// once the season starts).
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Edit team display fields (allowed any time).
    pub fn update_team(
        &mut self,
        team_id: TeamId,
        name: Option<String>,
        short_code: Option<String>,
        owner: Option<String>,
        logo_ref: Option<String>,
    ) -> Result<(), TournamentError> {
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        if let Some(n) = name {
            team.name = n;
        }
        if let Some(c) = short_code {
            team.short_code = c;
        }
        if let Some(o) = owner {
            team.owner = o;
        }
        if logo_ref.is_some() {
            team.logo_ref = logo_ref;
        }
        Ok(())
    }

    pub fn add_stadium(&mut self, stadium: Stadium) -> StadiumId {
        let id = stadium.id;
        self.stadiums.push(stadium);
        id
    }

    /// Remove a stadium by id (only valid in Setup; generated matches keep
    /// their venue assignment).
    pub fn remove_stadium(&mut self, stadium_id: StadiumId) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .stadiums
            .iter()
            .position(|s| s.id == stadium_id)
            .ok_or(TournamentError::StadiumNotFound(stadium_id))?;
        self.stadiums.remove(idx);
        Ok(())
    }

    /// Replace the points formula (only valid in Setup so already-committed
    /// results keep meaning what they meant).
    pub fn set_points_config(&mut self, points: PointsConfig) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.points = points;
        Ok(())
    }

    /// Replace the scheduling config (only valid in Setup).
    pub fn set_schedule_config(&mut self, schedule: ScheduleConfig) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.schedule = schedule;
        Ok(())
    }

    /// Record a penalty against a team. Points must be positive; the team
    /// must exist at the time of recording.
    pub fn add_penalty(
        &mut self,
        team_id: TeamId,
        points: u32,
        reason: impl Into<String>,
    ) -> Result<PenaltyId, TournamentError> {
        if points == 0 {
            return Err(TournamentError::InvalidPenalty);
        }
        if self.get_team(team_id).is_none() {
            return Err(TournamentError::TeamNotFound(team_id));
        }
        let penalty = Penalty::new(team_id, points, reason);
        let id = penalty.id;
        let team_name = self
            .get_team(team_id)
            .map(|t| t.name.clone())
            .unwrap_or_default();
        self.log(format!("Penalty of {} points recorded against {}", points, team_name));
        self.penalties.push(penalty);
        Ok(id)
    }

    /// Remove a penalty record by id.
    pub fn remove_penalty(&mut self, penalty_id: PenaltyId) -> Result<(), TournamentError> {
        let idx = self
            .penalties
            .iter()
            .position(|p| p.id == penalty_id)
            .ok_or(TournamentError::PenaltyNotFound(penalty_id))?;
        self.penalties.remove(idx);
        self.log("Penalty record removed".to_string());
        Ok(())
    }

    /// Append a line to the activity log.
    pub fn log(&mut self, message: String) {
        self.activity_log.push(LogEntry {
            at: Utc::now(),
            message,
        });
    }
}
