//! Result commit and unlock: the only writers of match data after
//! generation.

use crate::models::{
    MatchId, MatchResult, MatchStatus, SeriesId, SeriesStatus, TeamId, Tournament,
    TournamentError, TournamentStatus,
};

/// Commit a result for one match.
///
/// A team-1/team-2 win requires the matching `winner` id (and the winner
/// must actually play in the match); draw/tie/no-result/abandoned require no
/// winner. A match that already holds a result must be unlocked first.
/// Validation happens before any mutation, so a rejected commit leaves the
/// tournament untouched.
pub fn commit_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    outcome: MatchResult,
    winner: Option<TeamId>,
    notes: Option<String>,
) -> Result<(), TournamentError> {
    let m = tournament
        .matches
        .iter()
        .find(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.status == MatchStatus::Completed {
        return Err(TournamentError::MatchLocked(match_id));
    }

    let winner_id = if outcome.needs_winner() {
        let expected = if outcome == MatchResult::Team1Win {
            m.team1_id
        } else {
            m.team2_id
        };
        match winner {
            Some(w) if w == expected => Some(w),
            _ => return Err(TournamentError::InvalidResult),
        }
    } else {
        if winner.is_some() {
            return Err(TournamentError::InvalidResult);
        }
        None
    };

    let series_id = m.series_id;
    let m = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    m.status = MatchStatus::Completed;
    m.result = Some(outcome);
    m.winner_id = winner_id;
    m.notes = notes;

    refresh_series_status(tournament, series_id);
    refresh_tournament_status(tournament);
    tournament.log(format!("Result committed for match {}", match_id));
    Ok(())
}

/// Administrative reversal: put a completed match back to not-started and
/// clear its result fields.
pub fn unlock_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    let m = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.status != MatchStatus::Completed {
        return Err(TournamentError::MatchNotCompleted(match_id));
    }
    m.status = MatchStatus::NotStarted;
    m.winner_id = None;
    m.result = None;
    m.notes = None;
    let series_id = m.series_id;

    refresh_series_status(tournament, series_id);
    refresh_tournament_status(tournament);
    tournament.log(format!("Match {} unlocked", match_id));
    Ok(())
}

/// Re-derive one series' status from its matches. Series status is never
/// set directly by a user action.
fn refresh_series_status(tournament: &mut Tournament, series_id: SeriesId) {
    let status = tournament
        .series
        .iter()
        .find(|s| s.id == series_id)
        .map(|s| s.status_for(&tournament.matches));
    if let (Some(status), Some(s)) = (
        status,
        tournament.series.iter_mut().find(|s| s.id == series_id),
    ) {
        s.status = status;
    }
}

/// Ongoing while any series is unfinished; Completed once every series is.
fn refresh_tournament_status(tournament: &mut Tournament) {
    if tournament.series.is_empty() {
        return;
    }
    let all_done = tournament
        .series
        .iter()
        .all(|s| s.status == SeriesStatus::Completed);
    tournament.status = if all_done {
        TournamentStatus::Completed
    } else {
        TournamentStatus::Ongoing
    };
}
