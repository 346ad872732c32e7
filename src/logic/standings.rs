//! Standings computation: a pure projection of the match/series/penalty
//! lists into a ranked table.

use crate::models::{
    MatchResult, MatchStatus, SeriesStatus, TeamId, TeamStanding, Tournament,
};
use std::collections::HashMap;

/// Compute the ranked standings table.
///
/// Always recomputed from scratch over the full tournament state, so the
/// displayed table can never drift from the underlying records. Never
/// fails; an empty roster yields an empty table, and matches or penalties
/// referencing unknown teams contribute nothing.
///
/// Ranking: descending percentage of attainable points, then descending
/// total points, then ascending penalty points; remaining ties keep roster
/// order.
pub fn compute_standings(tournament: &Tournament) -> Vec<TeamStanding> {
    let mut rows: Vec<TeamStanding> = tournament
        .teams
        .iter()
        .map(TeamStanding::zeroed)
        .collect();
    let index: HashMap<TeamId, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (r.team_id, i))
        .collect();

    for s in &tournament.series {
        for tid in [s.team1_id, s.team2_id] {
            if let Some(&i) = index.get(&tid) {
                rows[i].series_played += 1;
            }
        }
    }

    let points = &tournament.points;

    for m in &tournament.matches {
        if m.status != MatchStatus::Completed {
            continue;
        }
        let Some(result) = m.result else { continue };

        for tid in [m.team1_id, m.team2_id] {
            if let Some(&i) = index.get(&tid) {
                rows[i].matches_played += 1;
            }
        }

        // Rained-off and abandoned matches count as played but offer no
        // points to anyone, so they stay out of the attainable denominator.
        if result.is_void() {
            for tid in [m.team1_id, m.team2_id] {
                if let Some(&i) = index.get(&tid) {
                    rows[i].no_result += 1;
                }
            }
            continue;
        }

        for tid in [m.team1_id, m.team2_id] {
            if let Some(&i) = index.get(&tid) {
                rows[i].max_attainable += points.win_points;
            }
        }

        let t1 = index.get(&m.team1_id).copied();
        let t2 = index.get(&m.team2_id).copied();
        match result {
            MatchResult::Team1Win => {
                if let Some(i) = t1 {
                    rows[i].base_points += points.win_points;
                    rows[i].won += 1;
                }
                if let Some(i) = t2 {
                    rows[i].base_points += points.loss_points;
                    rows[i].lost += 1;
                }
            }
            MatchResult::Team2Win => {
                if let Some(i) = t2 {
                    rows[i].base_points += points.win_points;
                    rows[i].won += 1;
                }
                if let Some(i) = t1 {
                    rows[i].base_points += points.loss_points;
                    rows[i].lost += 1;
                }
            }
            MatchResult::Draw => {
                for i in [t1, t2].into_iter().flatten() {
                    rows[i].base_points += points.draw_points;
                    rows[i].drawn += 1;
                }
            }
            MatchResult::Tie => {
                for i in [t1, t2].into_iter().flatten() {
                    rows[i].base_points += points.draw_points;
                    rows[i].tied += 1;
                }
            }
            MatchResult::NoResult | MatchResult::Abandoned => {}
        }
    }

    if points.count_series_bonus {
        for s in &tournament.series {
            // Status re-derived here rather than trusted from the stored
            // field, same drift-proofing as the rest of this projection.
            if s.status_for(&tournament.matches) != SeriesStatus::Completed {
                continue;
            }
            let mut team1_wins = 0u32;
            let mut team2_wins = 0u32;
            let mut any_completed = false;
            for m in tournament.matches.iter().filter(|m| m.series_id == s.id) {
                if m.status != MatchStatus::Completed {
                    continue;
                }
                any_completed = true;
                match m.result {
                    Some(MatchResult::Team1Win) => team1_wins += 1,
                    Some(MatchResult::Team2Win) => team2_wins += 1,
                    _ => {}
                }
            }
            if !any_completed {
                continue;
            }

            let t1 = index.get(&s.team1_id).copied();
            let t2 = index.get(&s.team2_id).copied();
            for i in [t1, t2].into_iter().flatten() {
                rows[i].max_attainable += points.series_win_points;
            }
            if team1_wins > team2_wins {
                if let Some(i) = t1 {
                    rows[i].bonus_points += points.series_win_points;
                }
            } else if team2_wins > team1_wins {
                if let Some(i) = t2 {
                    rows[i].bonus_points += points.series_win_points;
                }
            } else {
                for i in [t1, t2].into_iter().flatten() {
                    rows[i].bonus_points += points.series_draw_points;
                }
            }
        }
    }

    for p in &tournament.penalties {
        if let Some(&i) = index.get(&p.team_id) {
            rows[i].penalty_points += i64::from(p.points);
        }
    }

    for r in &mut rows {
        r.total_points = r.base_points + r.bonus_points - r.penalty_points;
        r.pct = if r.max_attainable > 0 {
            r.total_points as f64 / r.max_attainable as f64 * 100.0
        } else {
            0.0
        };
    }

    // sort_by is stable, so rows tied on every key keep roster order.
    rows.sort_by(|a, b| {
        b.pct
            .total_cmp(&a.pct)
            .then_with(|| b.total_points.cmp(&a.total_points))
            .then_with(|| a.penalty_points.cmp(&b.penalty_points))
    });
    rows
}
