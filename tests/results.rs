//! Integration tests for result commits, unlocks, and the derived series
//! and tournament statuses.

use cricket_tournament_web::{
    commit_result, unlock_match, MatchId, MatchResult, MatchStatus, Series, SeriesMatch,
    SeriesStatus, Stadium, Team, TeamId, Tournament, TournamentError, TournamentStatus,
};
use uuid::Uuid;

fn two_team_tournament(series_len: u32) -> (Tournament, TeamId, TeamId, Vec<MatchId>) {
    let teams = vec![Team::new("Alpha", "ALP"), Team::new("Beta", "BET")];
    let (a, b) = (teams[0].id, teams[1].id);
    let mut t = Tournament::with_teams("Test Cup", teams);
    let stadium_id = t.add_stadium(Stadium::new("Main Ground"));

    let mut s = Series::new(1, a, b, series_len);
    let mut ids = Vec::new();
    for _ in 0..series_len {
        let m = SeriesMatch::new(1, s.id, a, b, stadium_id);
        ids.push(m.id);
        s.match_ids.push(m.id);
        t.matches.push(m);
    }
    t.series.push(s);
    t.status = TournamentStatus::Ongoing;
    (t, a, b, ids)
}

#[test]
fn commit_records_winner_and_completes_match() {
    let (mut t, a, _b, ids) = two_team_tournament(1);
    commit_result(&mut t, ids[0], MatchResult::Team1Win, Some(a), Some("by 5 wickets".into()))
        .unwrap();

    let m = &t.matches[0];
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!(m.winner_id, Some(a));
    assert_eq!(m.result, Some(MatchResult::Team1Win));
    assert_eq!(m.notes.as_deref(), Some("by 5 wickets"));
}

#[test]
fn commit_requires_a_winner_for_a_win() {
    let (mut t, _a, b, ids) = two_team_tournament(1);
    assert_eq!(
        commit_result(&mut t, ids[0], MatchResult::Team1Win, None, None).err(),
        Some(TournamentError::InvalidResult)
    );
    // Wrong side named as winner.
    assert_eq!(
        commit_result(&mut t, ids[0], MatchResult::Team1Win, Some(b), None).err(),
        Some(TournamentError::InvalidResult)
    );
    // Rejections leave the match untouched.
    assert_eq!(t.matches[0].status, MatchStatus::NotStarted);
}

#[test]
fn draws_and_void_results_take_no_winner() {
    let (mut t, a, _b, ids) = two_team_tournament(2);
    assert_eq!(
        commit_result(&mut t, ids[0], MatchResult::Draw, Some(a), None).err(),
        Some(TournamentError::InvalidResult)
    );
    commit_result(&mut t, ids[0], MatchResult::Draw, None, None).unwrap();
    commit_result(&mut t, ids[1], MatchResult::Abandoned, None, None).unwrap();
    assert!(t.matches.iter().all(|m| m.winner_id.is_none()));
}

#[test]
fn commit_rejects_unknown_match_and_double_commit() {
    let (mut t, a, _b, ids) = two_team_tournament(1);
    let bogus = Uuid::new_v4();
    assert_eq!(
        commit_result(&mut t, bogus, MatchResult::Draw, None, None).err(),
        Some(TournamentError::MatchNotFound(bogus))
    );

    commit_result(&mut t, ids[0], MatchResult::Team1Win, Some(a), None).unwrap();
    assert_eq!(
        commit_result(&mut t, ids[0], MatchResult::Team2Win, None, None).err(),
        Some(TournamentError::MatchLocked(ids[0]))
    );
}

#[test]
fn series_status_follows_its_matches() {
    let (mut t, a, b, ids) = two_team_tournament(3);
    assert_eq!(t.series[0].status, SeriesStatus::NotStarted);

    commit_result(&mut t, ids[0], MatchResult::Team1Win, Some(a), None).unwrap();
    assert_eq!(t.series[0].status, SeriesStatus::InProgress);

    commit_result(&mut t, ids[1], MatchResult::Team2Win, Some(b), None).unwrap();
    assert_eq!(t.series[0].status, SeriesStatus::InProgress);

    commit_result(&mut t, ids[2], MatchResult::Draw, None, None).unwrap();
    assert_eq!(t.series[0].status, SeriesStatus::Completed);

    // Unlocking one match reopens the series.
    unlock_match(&mut t, ids[1]).unwrap();
    assert_eq!(t.series[0].status, SeriesStatus::InProgress);
}

#[test]
fn unlock_clears_result_fields() {
    let (mut t, a, _b, ids) = two_team_tournament(1);
    commit_result(&mut t, ids[0], MatchResult::Team1Win, Some(a), Some("tight one".into()))
        .unwrap();
    unlock_match(&mut t, ids[0]).unwrap();

    let m = &t.matches[0];
    assert_eq!(m.status, MatchStatus::NotStarted);
    assert_eq!(m.winner_id, None);
    assert_eq!(m.result, None);
    assert_eq!(m.notes, None);
}

#[test]
fn unlock_requires_a_completed_match() {
    let (mut t, _a, _b, ids) = two_team_tournament(1);
    assert_eq!(
        unlock_match(&mut t, ids[0]).err(),
        Some(TournamentError::MatchNotCompleted(ids[0]))
    );
    let bogus = Uuid::new_v4();
    assert_eq!(
        unlock_match(&mut t, bogus).err(),
        Some(TournamentError::MatchNotFound(bogus))
    );
}

#[test]
fn tournament_completes_when_every_series_does() {
    let (mut t, a, _b, ids) = two_team_tournament(2);
    commit_result(&mut t, ids[0], MatchResult::Team1Win, Some(a), None).unwrap();
    assert_eq!(t.status, TournamentStatus::Ongoing);

    commit_result(&mut t, ids[1], MatchResult::NoResult, None, None).unwrap();
    assert_eq!(t.status, TournamentStatus::Completed);

    unlock_match(&mut t, ids[1]).unwrap();
    assert_eq!(t.status, TournamentStatus::Ongoing);
}

#[test]
fn penalty_validation() {
    let (mut t, a, _b, _ids) = two_team_tournament(1);
    assert_eq!(
        t.add_penalty(a, 0, "nothing").err(),
        Some(TournamentError::InvalidPenalty)
    );
    let stranger = Uuid::new_v4();
    assert_eq!(
        t.add_penalty(stranger, 5, "ghost team").err(),
        Some(TournamentError::TeamNotFound(stranger))
    );

    let id = t.add_penalty(a, 5, "slow over rate").unwrap();
    assert_eq!(t.penalties.len(), 1);
    t.remove_penalty(id).unwrap();
    assert!(t.penalties.is_empty());
    assert_eq!(
        t.remove_penalty(id).err(),
        Some(TournamentError::PenaltyNotFound(id))
    );
}
