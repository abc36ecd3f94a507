//! Vegas-implied scoring expectations
//!
//! Splits each game's total and spread into implied per-side totals and
//! compares them against the teams' trailing-3-week scoring averages. The
//! diff is the terminal market-vs-recent-form signal.

use std::collections::HashMap;

use crate::features::team_scoring::TeamWeekScore;
use crate::{GameRecord, TeamCode};

/// Betting-line expectations for one game, joined with recent team scoring
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VegasRow {
    pub season: u16,
    pub week: u8,
    pub home_team: TeamCode,
    pub away_team: TeamCode,
    pub total_line: Option<f64>,
    pub spread_line: Option<f64>,
    /// total/2 + spread/2 (positive spread favors home)
    pub implied_home_total: Option<f64>,
    /// total/2 - spread/2
    pub implied_away_total: Option<f64>,
    /// Home team's last3_avg_score for this week
    pub home_avg_score: Option<f64>,
    /// Away team's last3_avg_score for this week
    pub away_avg_score: Option<f64>,
    /// implied_home_total - home_avg_score
    pub home_implied_total_diff: Option<f64>,
    /// implied_away_total - away_avg_score
    pub away_implied_total_diff: Option<f64>,
}

/// Compute vegas rows for every game, joining each side's trailing scoring
/// average by (season, week, team)
pub fn vegas_features(games: &[GameRecord], team_scores: &[TeamWeekScore]) -> Vec<VegasRow> {
    let recent: HashMap<(u16, u8, &TeamCode), f64> = team_scores
        .iter()
        .map(|row| ((row.season, row.week, &row.team), row.last3_avg_score))
        .collect();

    games
        .iter()
        .map(|game| {
            let implied = match (game.total_line, game.spread_line) {
                (Some(total), Some(spread)) => {
                    Some((total / 2.0 + spread / 2.0, total / 2.0 - spread / 2.0))
                }
                _ => None,
            };
            let (implied_home_total, implied_away_total) = match implied {
                Some((home, away)) => (Some(home), Some(away)),
                None => (None, None),
            };

            let home_avg_score = recent
                .get(&(game.season, game.week, &game.home_team))
                .copied();
            let away_avg_score = recent
                .get(&(game.season, game.week, &game.away_team))
                .copied();

            VegasRow {
                season: game.season,
                week: game.week,
                home_team: game.home_team.clone(),
                away_team: game.away_team.clone(),
                total_line: game.total_line,
                spread_line: game.spread_line,
                implied_home_total,
                implied_away_total,
                home_avg_score,
                away_avg_score,
                home_implied_total_diff: diff(implied_home_total, home_avg_score),
                away_implied_total_diff: diff(implied_away_total, away_avg_score),
            }
        })
        .collect()
}

fn diff(implied: Option<f64>, recent: Option<f64>) -> Option<f64> {
    match (implied, recent) {
        (Some(implied), Some(recent)) => Some(implied - recent),
        _ => None,
    }
}
