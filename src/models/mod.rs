//! Data model: teams, stadiums, matches/series, config, and the tournament aggregate.

mod config;
mod game;
mod stadium;
mod team;
mod tournament;

pub use config::{
    parse_series_length, ManualSeriesEntry, PointsConfig, ScheduleConfig, SchedulingMode,
};
pub use game::{MatchId, MatchResult, MatchStatus, Series, SeriesId, SeriesMatch, SeriesStatus};
pub use stadium::{Stadium, StadiumId};
pub use team::{Team, TeamId, TeamStanding};
pub use tournament::{
    LogEntry, Penalty, PenaltyId, Tournament, TournamentError, TournamentId, TournamentStatus,
};
