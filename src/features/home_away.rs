//! Home/away resolution
//!
//! A player-week is home when its team hosts a scheduled game that week.
//! Anything else reads as away; a missing schedule row is not
//! distinguished from a genuine road game.

use std::collections::HashSet;

use crate::{GameRecord, TeamCode};

/// Lookup of (season, week, home team) slots built from the schedule
#[derive(Debug, Clone, Default)]
pub struct HomeAwayIndex {
    home_slots: HashSet<(u16, u8, TeamCode)>,
}

impl HomeAwayIndex {
    pub fn from_schedule(games: &[GameRecord]) -> Self {
        let home_slots = games
            .iter()
            .map(|game| (game.season, game.week, game.home_team.clone()))
            .collect();
        HomeAwayIndex { home_slots }
    }

    /// True when the team hosts a game in that (season, week)
    pub fn is_home(&self, season: u16, week: u8, team: &TeamCode) -> bool {
        self.home_slots.contains(&(season, week, team.clone()))
    }
}
