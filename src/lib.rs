//! Cricket tournament web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    commit_result, compute_standings, generate, generate_schedule, regenerate_schedule,
    unlock_match, GeneratedSchedule,
};
pub use models::{
    parse_series_length, LogEntry, ManualSeriesEntry, MatchId, MatchResult, MatchStatus, Penalty,
    PenaltyId, PointsConfig, ScheduleConfig, SchedulingMode, Series, SeriesId, SeriesMatch,
    SeriesStatus, Stadium, StadiumId, Team, TeamId, TeamStanding, Tournament, TournamentError,
    TournamentId, TournamentStatus,
};
