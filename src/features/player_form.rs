//! Player scoring form
//!
//! Career and trailing-window averages of each player's fantasy score.
//! Trailing windows are read BEFORE the current week's score enters the
//! history, so they never include the week being described. Rows with
//! insufficient history fall through an ordered fallback chain.

use std::collections::HashMap;

use crate::features::rolling::ScoreHistory;
use crate::{PlayerId, PlayerWeekRecord, Position};

/// Form averages for one player-week
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerForm {
    /// Mean score across the player's whole history (same value on every row)
    pub career_avg: f64,
    /// Previous week's score; position-wide mean when no prior week exists
    pub last1: f64,
    /// Mean of the 3 preceding scores, with fallback
    pub last3: f64,
    /// Mean of the 5 preceding scores, with fallback
    pub last5: f64,
    /// True when the player had no prior week at this row
    pub is_rookie: bool,
}

/// Raw trailing-window values captured before any fallback is applied
struct RawWindows {
    last1: Option<f64>,
    last3: Option<f64>,
    last5: Option<f64>,
}

/// Compute per-row form for scored player-weeks.
///
/// `records` and `scores` run in parallel and must be ordered
/// chronologically; rows of the same player are folded in the order they
/// appear. Returns one `PlayerForm` per input row, index-aligned.
pub fn compute_player_form(records: &[PlayerWeekRecord], scores: &[f64]) -> Vec<PlayerForm> {
    debug_assert_eq!(records.len(), scores.len());

    // Trailing windows per player, read before the current score is pushed
    let mut histories: HashMap<&PlayerId, ScoreHistory> = HashMap::new();
    let mut raw: Vec<RawWindows> = Vec::with_capacity(records.len());

    for (record, &score) in records.iter().zip(scores) {
        let history = histories.entry(&record.player_id).or_default();
        raw.push(RawWindows {
            last1: history.last(),
            last3: history.trailing_mean(3),
            last5: history.trailing_mean(5),
        });
        history.push(score);
    }

    // Full-history means, broadcast to every row of the player/position
    let career_avgs = grouped_means(records.iter().map(|r| &r.player_id).zip(scores.iter().copied()));
    let position_avgs = grouped_means(records.iter().map(|r| r.position).zip(scores.iter().copied()));

    records
        .iter()
        .zip(raw)
        .map(|(record, windows)| resolve(record, windows, &career_avgs, &position_avgs))
        .collect()
}

/// Apply the fallback chain to one row's raw windows
fn resolve(
    record: &PlayerWeekRecord,
    windows: RawWindows,
    career_avgs: &HashMap<&PlayerId, f64>,
    position_avgs: &HashMap<Position, f64>,
) -> PlayerForm {
    // Both maps were built from these same rows, so the lookups always hit
    let career_avg = career_avgs.get(&record.player_id).copied().unwrap_or(0.0);
    let position_avg = position_avgs.get(&record.position).copied().unwrap_or(0.0);

    let is_rookie = windows.last1.is_none();

    // last3 falls back to the raw previous score, then the career mean;
    // last5 falls back to the already-resolved last3
    let last3 = windows.last3.or(windows.last1).unwrap_or(career_avg);
    let last5 = windows.last5.unwrap_or(last3);
    let last1 = windows.last1.unwrap_or(position_avg);

    PlayerForm {
        career_avg,
        last1,
        last3,
        last5,
        is_rookie,
    }
}

/// Mean per group key over (key, value) pairs
fn grouped_means<K, I>(pairs: I) -> HashMap<K, f64>
where
    K: std::hash::Hash + Eq,
    I: Iterator<Item = (K, f64)>,
{
    let mut sums: HashMap<K, (f64, usize)> = HashMap::new();
    for (key, value) in pairs {
        let entry = sums.entry(key).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}
