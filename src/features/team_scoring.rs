//! Team weekly scoring
//!
//! Unpivots each game into one row per team per week and derives expanding
//! scoring averages. Like the defense-side averages (and unlike the
//! player-side windows), avg_score includes the current week.

use std::collections::{BTreeMap, HashMap};

use crate::features::rolling::{mean, round2, ExpandingMean};
use crate::{GameRecord, TeamCode};

/// One team's scoring output for one week, with expanding averages
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TeamWeekScore {
    pub season: u16,
    pub week: u8,
    pub team: TeamCode,
    /// Points scored that week
    pub score: f64,
    /// Expanding mean of score to date, current week included
    pub avg_score: f64,
    /// Previous week's avg_score; league-wide mean of avg_score for a
    /// team's first week
    pub last1_avg_score: f64,
    /// Expanding mean requiring at least 3 weeks, else last1_avg_score
    pub last3_avg_score: f64,
}

/// Derive per-team weekly scoring rows from the schedule, ordered by
/// (season, week, team)
pub fn team_weekly_scoring(games: &[GameRecord]) -> Vec<TeamWeekScore> {
    // Home and away perspectives each contribute one row per game
    let mut totals: BTreeMap<(u16, u8, TeamCode), f64> = BTreeMap::new();
    for game in games {
        *totals
            .entry((game.season, game.week, game.home_team.clone()))
            .or_insert(0.0) += game.home_score as f64;
        *totals
            .entry((game.season, game.week, game.away_team.clone()))
            .or_insert(0.0) += game.away_score as f64;
    }

    // Expanding state per team; BTreeMap iteration is already
    // chronological within each team
    let mut accumulators: HashMap<TeamCode, ExpandingMean> = HashMap::new();
    let mut prior_avg: HashMap<TeamCode, f64> = HashMap::new();

    struct Partial {
        season: u16,
        week: u8,
        team: TeamCode,
        score: f64,
        avg_score: f64,
        prev_avg: Option<f64>,
        last3_raw: Option<f64>,
    }

    let mut partials: Vec<Partial> = Vec::with_capacity(totals.len());
    for ((season, week, team), score) in totals {
        let acc = accumulators.entry(team.clone()).or_default();
        acc.push(score);
        // push-then-read: the mean includes this week
        let avg_score = round2(acc.mean().unwrap_or(score));
        let last3_raw = acc.mean_with_min(3).map(round2);
        let prev_avg = prior_avg.insert(team.clone(), avg_score);

        partials.push(Partial {
            season,
            week,
            team,
            score,
            avg_score,
            prev_avg,
            last3_raw,
        });
    }

    // Single scalar backfill for teams with no prior week
    let league_avg = round2(mean(
        &partials.iter().map(|p| p.avg_score).collect::<Vec<f64>>(),
    ));

    partials
        .into_iter()
        .map(|p| {
            let last1_avg_score = p.prev_avg.unwrap_or(league_avg);
            let last3_avg_score = p.last3_raw.unwrap_or(last1_avg_score);
            TeamWeekScore {
                season: p.season,
                week: p.week,
                team: p.team,
                score: p.score,
                avg_score: p.avg_score,
                last1_avg_score,
                last3_avg_score,
            }
        })
        .collect()
}
