//! Defense vs. position matchup strength
//!
//! Weekly fantasy points each defense allowed to each position, rolled into
//! an expanding allowed-average. Unlike the player-side windows, the
//! average INCLUDES the current week: each weekly total is pushed into the
//! accumulator before the mean is read.

use std::collections::HashMap;

use crate::features::rolling::ExpandingMean;
use crate::{PlayerWeekRecord, Position, TeamCode};

/// Expanding average of fantasy points allowed, keyed by
/// (season, week, defense, position)
#[derive(Debug, Clone, Default)]
pub struct DefenseVsPosition {
    averages: HashMap<(u16, u8, TeamCode, Position), f64>,
}

impl DefenseVsPosition {
    /// Aggregate scored player-weeks into allowed-averages.
    ///
    /// `records` and `scores` run in parallel; each row's opponent is the
    /// defense that allowed the score.
    pub fn from_scored_rows(records: &[PlayerWeekRecord], scores: &[f64]) -> Self {
        debug_assert_eq!(records.len(), scores.len());

        // Points allowed per (season, week, defense, position)
        let mut weekly: HashMap<(u16, u8, TeamCode, Position), f64> = HashMap::new();
        for (record, &score) in records.iter().zip(scores) {
            let key = (record.season, record.week, record.opponent.clone(), record.position);
            *weekly.entry(key).or_insert(0.0) += score;
        }

        // Chronological within each (defense, position) group
        let mut totals: Vec<((u16, u8, TeamCode, Position), f64)> = weekly.into_iter().collect();
        totals.sort_by(|((sa, wa, da, pa), _), ((sb, wb, db, pb), _)| {
            (da, pa, sa, wa).cmp(&(db, pb, sb, wb))
        });

        let mut averages = HashMap::with_capacity(totals.len());
        let mut group: Option<(TeamCode, Position)> = None;
        let mut acc = ExpandingMean::new();

        for ((season, week, defense, position), allowed) in totals {
            if group.as_ref() != Some(&(defense.clone(), position)) {
                group = Some((defense.clone(), position));
                acc = ExpandingMean::new();
            }
            acc.push(allowed);
            if let Some(avg) = acc.mean() {
                averages.insert((season, week, defense, position), avg);
            }
        }

        DefenseVsPosition { averages }
    }

    /// Allowed-average for a defense against a position at a given week;
    /// None when that matchup never occurred
    pub fn allowed_avg(
        &self,
        season: u16,
        week: u8,
        defense: &TeamCode,
        position: Position,
    ) -> Option<f64> {
        self.averages
            .get(&(season, week, defense.clone(), position))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.averages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}
