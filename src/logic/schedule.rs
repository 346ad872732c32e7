//! Fixture generation: round-robin pairing, manual draft placement, and
//! randomized series lengths.

use crate::models::{
    ScheduleConfig, SchedulingMode, Series, SeriesMatch, Stadium, StadiumId, Team, TeamId,
    Tournament, TournamentError, TournamentStatus,
};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Placeholder team id padded into an odd roster; any pairing against it
/// produces no series and no matches.
const BYE_TEAM: TeamId = Uuid::nil();

/// Name used for the synthetic venue when no stadium was supplied.
const DEFAULT_VENUE_NAME: &str = "Default Venue";

/// Output of one generation run. The caller replaces the tournament's
/// matches and series wholesale with these lists.
#[derive(Clone, Debug)]
pub struct GeneratedSchedule {
    pub matches: Vec<SeriesMatch>,
    pub series: Vec<Series>,
    /// Set when no stadium was supplied: the synthetic venue every match
    /// was assigned to, for the caller to adopt.
    pub default_stadium: Option<Stadium>,
}

/// A realized pairing before series/match records are materialized.
struct Pairing {
    round: u32,
    team1: TeamId,
    team2: TeamId,
    /// Fixed count from a manual draft entry; None draws from the
    /// configured range.
    fixed_matches: Option<u32>,
}

/// Normalized pair key so (a, b) and (b, a) reserve the same slot.
fn pair_key(a: TeamId, b: TeamId) -> (TeamId, TeamId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Generate the full fixture list for one season.
///
/// Pure with respect to the tournament: takes the roster, venue list, and
/// scheduling config, and returns the matches/series to install. Fails only
/// when fewer than 2 teams are supplied. Series lengths are drawn from the
/// thread RNG, so two runs over the same inputs differ.
pub fn generate(
    teams: &[Team],
    stadiums: &[Stadium],
    config: &ScheduleConfig,
) -> Result<GeneratedSchedule, TournamentError> {
    if teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }

    let roster: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let roster_set: HashSet<TeamId> = roster.iter().copied().collect();

    let mut pairings: Vec<Pairing> = Vec::new();
    let mut round_usage: HashMap<u32, HashSet<TeamId>> = HashMap::new();
    let mut reserved: HashSet<(TeamId, TeamId)> = HashSet::new();
    let mut last_manual_round = 0u32;

    if matches!(config.mode, SchedulingMode::Manual | SchedulingMode::Hybrid) {
        for entry in &config.manual_draft {
            // Silent data gap: drafts naming unknown teams (or a team
            // against itself) contribute nothing.
            if entry.team1_id == entry.team2_id
                || !roster_set.contains(&entry.team1_id)
                || !roster_set.contains(&entry.team2_id)
            {
                continue;
            }
            // Lowest round at or after the hint where both teams are free.
            let mut round = entry.round_hint.max(1);
            loop {
                let used = round_usage.entry(round).or_default();
                if !used.contains(&entry.team1_id) && !used.contains(&entry.team2_id) {
                    used.insert(entry.team1_id);
                    used.insert(entry.team2_id);
                    break;
                }
                round += 1;
            }
            reserved.insert(pair_key(entry.team1_id, entry.team2_id));
            last_manual_round = last_manual_round.max(round);
            pairings.push(Pairing {
                round,
                team1: entry.team1_id,
                team2: entry.team2_id,
                fixed_matches: Some(entry.num_matches.max(1)),
            });
        }
    }

    if matches!(config.mode, SchedulingMode::Auto | SchedulingMode::Hybrid) {
        // Circle method: fix position 0, rotate the rest one step per
        // round, pairing position i with n-1-i. An odd roster gets a BYE
        // slot whose pairings are dropped.
        let mut ids = roster.clone();
        if ids.len() % 2 == 1 {
            ids.push(BYE_TEAM);
        }
        let n = ids.len();
        let rounds_per_pass = (n - 1) as u32;
        let passes = config.round_robin_passes();

        // In hybrid mode auto rounds start after the last manual round so
        // a team is never paired twice under one round number.
        let round_offset = last_manual_round;

        let mut rotation: Vec<TeamId> = ids[1..].to_vec();
        for pass in 0..passes {
            for r in 0..rounds_per_pass {
                let round = round_offset + pass * rounds_per_pass + r + 1;
                let mut order = Vec::with_capacity(n);
                order.push(ids[0]);
                order.extend(rotation.iter().copied());
                for i in 0..n / 2 {
                    let a = order[i];
                    let b = order[n - 1 - i];
                    if a == BYE_TEAM || b == BYE_TEAM {
                        continue;
                    }
                    if reserved.contains(&pair_key(a, b)) {
                        continue;
                    }
                    pairings.push(Pairing {
                        round,
                        team1: a,
                        team2: b,
                        fixed_matches: None,
                    });
                }
                rotation.rotate_right(1);
            }
        }
    }

    // Materialize series and matches. Venues cycle by match index within
    // each series; with no venues at all, one synthetic default stands in.
    let default_stadium = if stadiums.is_empty() {
        Some(Stadium::new(DEFAULT_VENUE_NAME))
    } else {
        None
    };
    let venue_ids: Vec<StadiumId> = match &default_stadium {
        Some(s) => vec![s.id],
        None => stadiums.iter().map(|s| s.id).collect(),
    };

    let (min_len, max_len) = config.series_length_range();
    let mut rng = rand::thread_rng();
    let mut matches: Vec<SeriesMatch> = Vec::new();
    let mut series: Vec<Series> = Vec::with_capacity(pairings.len());

    for p in pairings {
        let count = match p.fixed_matches {
            Some(c) => c,
            None => rng.gen_range(min_len..=max_len),
        };
        let mut s = Series::new(p.round, p.team1, p.team2, count);
        for idx in 0..count {
            let stadium_id = venue_ids[idx as usize % venue_ids.len()];
            let m = SeriesMatch::new(p.round, s.id, p.team1, p.team2, stadium_id);
            s.match_ids.push(m.id);
            matches.push(m);
        }
        series.push(s);
    }

    Ok(GeneratedSchedule {
        matches,
        series,
        default_stadium,
    })
}

/// Generate and install the season schedule. Refuses to run while any match
/// exists (use `regenerate_schedule` for that) and moves the tournament to
/// Ongoing on success.
pub fn generate_schedule(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if !tournament.matches.is_empty() {
        return Err(TournamentError::ScheduleExists);
    }
    let generated = generate(&tournament.teams, &tournament.stadiums, &tournament.schedule)?;
    if let Some(stadium) = generated.default_stadium {
        tournament.stadiums.push(stadium);
    }
    tournament.log(format!(
        "Schedule generated: {} series, {} matches",
        generated.series.len(),
        generated.matches.len()
    ));
    tournament.matches = generated.matches;
    tournament.series = generated.series;
    tournament.status = TournamentStatus::Ongoing;
    Ok(())
}

/// Throw away the whole fixture list (results included) and build a new
/// one. The only way matches are ever deleted once a season has started.
pub fn regenerate_schedule(tournament: &mut Tournament) -> Result<(), TournamentError> {
    tournament.matches.clear();
    tournament.series.clear();
    tournament.log("Existing schedule cleared for regeneration".to_string());
    generate_schedule(tournament)
}
