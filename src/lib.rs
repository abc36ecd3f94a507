//! Fantasy football feature engineering
//!
//! Turns raw weekly player statistics and game schedule/odds data into
//! model-ready features: fantasy scoring, rolling player form, defense
//! vs. position matchup strength, home/away context and vegas-implied
//! scoring expectations.

pub mod data;
pub mod features;
pub mod pipeline;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::features::ScoringRules;

/// Provider-issued unique identifier for a player
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// League team abbreviation ("KC", "LAR", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamCode(pub String);

impl TeamCode {
    pub fn new(code: impl Into<String>) -> Self {
        TeamCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Offense-relevant player positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
}

impl Position {
    pub fn code(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
        }
    }

    /// Parse a provider position code. Returns None for positions outside
    /// the offensive skill set (K, DST, OL, ...), which are not scored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" | "HB" | "FB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Raw per-week offensive statistics for one player.
///
/// Every field defaults to zero so statistics a provider omits (a QB with no
/// receptions, a WR with no pass attempts) contribute nothing to scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(default)]
    pub passing_yards: f64,
    #[serde(default)]
    pub passing_tds: f64,
    #[serde(default)]
    pub interceptions: f64,
    #[serde(default)]
    pub rushing_yards: f64,
    #[serde(default)]
    pub rushing_tds: f64,
    #[serde(default)]
    pub receiving_yards: f64,
    #[serde(default)]
    pub receiving_tds: f64,
    #[serde(default)]
    pub receptions: f64,
    #[serde(default)]
    pub rushing_fumbles_lost: f64,
    #[serde(default)]
    pub receiving_fumbles_lost: f64,
    #[serde(default)]
    pub sack_fumbles_lost: f64,
    #[serde(default)]
    pub passing_2pt_conversions: f64,
    #[serde(default)]
    pub rushing_2pt_conversions: f64,
    #[serde(default)]
    pub receiving_2pt_conversions: f64,
}

impl StatLine {
    /// Fumbles lost summed across rushing, receiving and sack categories
    pub fn fumbles_lost(&self) -> f64 {
        self.rushing_fumbles_lost + self.receiving_fumbles_lost + self.sack_fumbles_lost
    }

    /// Two-point conversions summed across passing, rushing and receiving
    pub fn two_point_conversions(&self) -> f64 {
        self.passing_2pt_conversions + self.rushing_2pt_conversions + self.receiving_2pt_conversions
    }
}

/// One player's statistics for one regular-season week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerWeekRecord {
    pub player_id: PlayerId,
    pub player_name: Option<String>,
    pub position: Position,
    pub team: TeamCode,
    pub opponent: TeamCode,
    pub season: u16,
    pub week: u8,
    pub stats: StatLine,
}

/// One regular-season game with final scores and betting lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub season: u16,
    pub week: u8,
    pub gameday: Option<NaiveDate>,
    pub home_team: TeamCode,
    pub away_team: TeamCode,
    pub home_score: u32,
    pub away_score: u32,
    /// Combined point total line; None when the book posted no line
    pub total_line: Option<f64>,
    /// Point spread; positive favors the home team
    pub spread_line: Option<f64>,
}

impl GameRecord {
    /// Check if a team was playing at home
    pub fn is_home(&self, team: &TeamCode) -> Option<bool> {
        if *team == self.home_team {
            Some(true)
        } else if *team == self.away_team {
            Some(false)
        } else {
            None
        }
    }

    /// Get score for a specific team
    pub fn score_for(&self, team: &TeamCode) -> Option<u32> {
        if *team == self.home_team {
            Some(self.home_score)
        } else if *team == self.away_team {
            Some(self.away_score)
        } else {
            None
        }
    }

    /// Get the opponent for a given team
    pub fn opponent(&self, team: &TeamCode) -> Option<&TeamCode> {
        if *team == self.home_team {
            Some(&self.away_team)
        } else if *team == self.away_team {
            Some(&self.home_team)
        } else {
            None
        }
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum FantasyError {
    #[error("Provider {provider} failed: {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FantasyError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seasons to request from the data providers
    pub seasons: Vec<u16>,
    pub scoring: ScoringRules,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seasons: (2018..=2024).collect(),
            scoring: ScoringRules::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FantasyError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| FantasyError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FantasyError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
