//! Raw row filtering and normalization
//!
//! Converts provider-shaped rows into typed records: keeps regular-season
//! rows for offensive skill positions, drops the final week of each season
//! and collapses historical team abbreviations to their current codes.

use crate::data::providers::{ScheduleRow, WeeklyStatRow};
use crate::{GameRecord, PlayerId, PlayerWeekRecord, Position, TeamCode};

/// Historical or relocated franchise codes mapped to their current code
const TEAM_ALIASES: &[(&str, &str)] = &[("LA", "LAR"), ("OAK", "LV"), ("SD", "LAC")];

/// Collapse a team abbreviation through the alias table.
///
/// Unknown codes pass through unchanged; applying twice is a no-op since no
/// alias target is itself an alias.
pub fn canonical_team_code(code: &str) -> &str {
    TEAM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, current)| *current)
        .unwrap_or(code)
}

/// Normalize a team code into its canonical `TeamCode`
pub fn normalize_team(code: &str) -> TeamCode {
    TeamCode::new(canonical_team_code(code))
}

/// The league extended the regular season from 17 to 18 weeks in 2021; the
/// final week of each season is excluded either way.
fn is_excluded_final_week(season: u16, week: u8) -> bool {
    if season < 2021 {
        week == 17
    } else {
        week == 18
    }
}

/// Filter and type raw weekly stat rows.
///
/// Keeps regular-season rows for QB/RB/WR/TE, drops each season's final
/// week and normalizes team and opponent codes.
pub fn prepare_weekly(rows: Vec<WeeklyStatRow>) -> Vec<PlayerWeekRecord> {
    let total = rows.len();
    let records: Vec<PlayerWeekRecord> = rows
        .into_iter()
        .filter(|row| row.season_type == "REG")
        .filter(|row| !is_excluded_final_week(row.season, row.week))
        .filter_map(|row| {
            let position = Position::from_code(&row.position)?;
            Some(PlayerWeekRecord {
                player_id: PlayerId(row.player_id),
                player_name: row.player_name,
                position,
                team: normalize_team(&row.recent_team),
                opponent: normalize_team(&row.opponent_team),
                season: row.season,
                week: row.week,
                stats: row.stats,
            })
        })
        .collect();

    log::info!(
        "Prepared {} of {} weekly stat rows (regular season, skill positions)",
        records.len(),
        total
    );
    records
}

/// Filter and type raw schedule rows, keeping regular-season games only
pub fn prepare_schedule(rows: Vec<ScheduleRow>) -> Vec<GameRecord> {
    let total = rows.len();
    let records: Vec<GameRecord> = rows
        .into_iter()
        .filter(|row| row.game_type == "REG")
        .map(|row| GameRecord {
            season: row.season,
            week: row.week,
            gameday: row.gameday,
            home_team: normalize_team(&row.home_team),
            away_team: normalize_team(&row.away_team),
            home_score: row.home_score,
            away_score: row.away_score,
            total_line: row.total_line,
            spread_line: row.spread_line,
        })
        .collect();

    log::info!("Prepared {} of {} schedule rows (regular season)", records.len(), total);
    records
}
