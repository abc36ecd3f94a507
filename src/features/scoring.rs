//! Fantasy point scoring
//!
//! A weighted linear combination of box-score statistics plus fixed
//! yardage-threshold bonuses.

use serde::{Deserialize, Serialize};

use crate::features::rolling::round2;
use crate::StatLine;

/// Scoring weights and bonus thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Points per passing yard
    pub passing_yard: f64,
    pub passing_td: f64,
    pub interception: f64,
    /// Points per rushing yard
    pub rushing_yard: f64,
    pub rushing_td: f64,
    /// Points per receiving yard
    pub receiving_yard: f64,
    pub receiving_td: f64,
    /// Points per reception (full PPR)
    pub reception: f64,
    pub fumble_lost: f64,
    pub two_point_conversion: f64,
    /// Passing yards needed for the yardage bonus
    pub passing_bonus_yards: f64,
    /// Rushing yards needed for the yardage bonus
    pub rushing_bonus_yards: f64,
    /// Receiving yards needed for the yardage bonus
    pub receiving_bonus_yards: f64,
    /// Points awarded per yardage bonus reached
    pub yardage_bonus: f64,
}

impl ScoringRules {
    /// DraftKings classic scoring
    pub fn draftkings() -> Self {
        ScoringRules {
            passing_yard: 0.04,
            passing_td: 4.0,
            interception: -1.0,
            rushing_yard: 0.1,
            rushing_td: 6.0,
            receiving_yard: 0.1,
            receiving_td: 6.0,
            reception: 1.0,
            fumble_lost: -1.0,
            two_point_conversion: 2.0,
            passing_bonus_yards: 300.0,
            rushing_bonus_yards: 100.0,
            receiving_bonus_yards: 100.0,
            yardage_bonus: 3.0,
        }
    }

    /// Score one stat line, rounded to 2 decimal places
    pub fn fantasy_points(&self, stats: &StatLine) -> f64 {
        let mut points = stats.passing_yards * self.passing_yard
            + stats.passing_tds * self.passing_td
            + stats.interceptions * self.interception
            + stats.rushing_yards * self.rushing_yard
            + stats.rushing_tds * self.rushing_td
            + stats.receiving_yards * self.receiving_yard
            + stats.receiving_tds * self.receiving_td
            + stats.receptions * self.reception
            + stats.fumbles_lost() * self.fumble_lost
            + stats.two_point_conversions() * self.two_point_conversion;

        if stats.passing_yards >= self.passing_bonus_yards {
            points += self.yardage_bonus;
        }
        if stats.rushing_yards >= self.rushing_bonus_yards {
            points += self.yardage_bonus;
        }
        if stats.receiving_yards >= self.receiving_bonus_yards {
            points += self.yardage_bonus;
        }

        round2(points)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::draftkings()
    }
}
