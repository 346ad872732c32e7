//! Points and scheduling configuration, plus the string-encoded form options.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Points formula: per-match values plus the optional series bonus.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    pub win_points: i64,
    pub draw_points: i64,
    /// Participation points credited to the losing team of a decided match.
    pub loss_points: i64,
    /// Enables the per-series bonus pass of the standings computation.
    pub count_series_bonus: bool,
    pub series_win_points: i64,
    pub series_draw_points: i64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            win_points: 12,
            draw_points: 6,
            loss_points: 4,
            count_series_bonus: false,
            series_win_points: 5,
            series_draw_points: 2,
        }
    }
}

/// How pairings are produced: fully automatic round robin, fully manual
/// draft entries, or manual entries first with the round robin filling the
/// rest.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMode {
    #[default]
    Auto,
    Manual,
    Hybrid,
}

/// A pre-generation draft pairing with a fixed match count. Consumed once by
/// the generator and superseded by the generated series/match records.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ManualSeriesEntry {
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub num_matches: u32,
    /// Preferred round; the generator still moves the pairing later if a
    /// team is already busy in that round.
    #[serde(default)]
    pub round_hint: u32,
}

/// Scheduling configuration as collected by the setup form.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// String-encoded series length range, e.g. "3-5" or "3".
    pub series_length: String,
    pub mode: SchedulingMode,
    /// Free-form format label; anything containing "DOUBLE" means two
    /// round-robin passes.
    pub format: String,
    #[serde(default)]
    pub manual_draft: Vec<ManualSeriesEntry>,
}

impl ScheduleConfig {
    /// Inclusive (min, max) series length. Malformed input falls back to a
    /// single-match series rather than erroring (the form is free text).
    pub fn series_length_range(&self) -> (u32, u32) {
        parse_series_length(&self.series_length)
    }

    /// Number of round-robin passes: 2 when the format mentions DOUBLE.
    pub fn round_robin_passes(&self) -> u32 {
        if self.format.to_ascii_uppercase().contains("DOUBLE") {
            2
        } else {
            1
        }
    }
}

/// Parse a series-length range like "3-5": strip everything except digits
/// and dashes, split on "-", take the first two numbers. "3" means (3, 3).
/// Anything unusable defaults to (1, 1).
pub fn parse_series_length(raw: &str) -> (u32, u32) {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    let mut parts = cleaned.split('-').filter_map(|p| p.parse::<u32>().ok());
    match (parts.next(), parts.next()) {
        (Some(min), Some(max)) if min >= 1 && max >= min => (min, max),
        (Some(n), None) if n >= 1 => (n, n),
        _ => (1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_length_plain_range() {
        assert_eq!(parse_series_length("3-5"), (3, 5));
    }

    #[test]
    fn series_length_single_number() {
        assert_eq!(parse_series_length("3"), (3, 3));
        assert_eq!(parse_series_length(" 7 matches "), (7, 7));
    }

    #[test]
    fn series_length_strips_noise() {
        assert_eq!(parse_series_length("best of 3 - 5 games"), (3, 5));
    }

    #[test]
    fn series_length_malformed_defaults_to_one() {
        assert_eq!(parse_series_length(""), (1, 1));
        assert_eq!(parse_series_length("abc"), (1, 1));
        assert_eq!(parse_series_length("5-3"), (1, 1));
        assert_eq!(parse_series_length("0-2"), (1, 1));
    }

    #[test]
    fn format_substring_controls_passes() {
        let mut cfg = ScheduleConfig::default();
        cfg.format = "Single Round Robin".into();
        assert_eq!(cfg.round_robin_passes(), 1);
        cfg.format = "double round robin".into();
        assert_eq!(cfg.round_robin_passes(), 2);
        cfg.format = String::new();
        assert_eq!(cfg.round_robin_passes(), 1);
    }
}
