//! External data provider seams
//!
//! The crate does not fetch anything itself; implementations of these traits
//! (an HTTP client, a parquet reader, a fixture loader) live outside and
//! deliver rows in the provider's own wire shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Result, StatLine};

/// One raw per-player-per-week row as delivered by the stats provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStatRow {
    pub player_id: String,
    #[serde(default)]
    pub player_name: Option<String>,
    pub season: u16,
    pub week: u8,
    /// Season phase discriminator; only "REG" rows survive preprocessing
    pub season_type: String,
    pub position: String,
    pub recent_team: String,
    pub opponent_team: String,
    #[serde(flatten)]
    pub stats: StatLine,
}

/// One raw per-game schedule row as delivered by the schedule provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub season: u16,
    pub week: u8,
    /// Game phase discriminator; only "REG" games survive preprocessing
    pub game_type: String,
    #[serde(default)]
    pub gameday: Option<NaiveDate>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub total_line: Option<f64>,
    #[serde(default)]
    pub spread_line: Option<f64>,
}

/// Source of per-player weekly box-score statistics
pub trait WeeklyStatsProvider {
    /// Fetch all weekly stat rows for the given seasons
    fn fetch_weekly(&self, seasons: &[u16]) -> Result<Vec<WeeklyStatRow>>;
}

/// Source of per-game schedule, score and betting-line data
pub trait ScheduleProvider {
    /// Fetch all schedule rows for the given seasons
    fn fetch_schedule(&self, seasons: &[u16]) -> Result<Vec<ScheduleRow>>;
}
