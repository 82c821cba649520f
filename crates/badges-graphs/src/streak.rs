//! Contribution streak: persisted state and the continuation check.
//!
//! A streak is the number of consecutive days with at least one contribution,
//! ending at the latest day of the fetched calendar. GitHub's calendar only
//! covers a trailing year, so the value is persisted and extended run over run
//! instead of being recomputed from scratch each time.

use badges_common::{write_file, BadgeError, ContributionDay, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, io::ErrorKind, path::Path};
use tracing::{debug, info, warn};

/// Saved streak value and the last date it is valid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive active days
    pub streak: u32,
    /// UTC calendar date the streak ends on
    pub date: NaiveDate,
}

impl StreakState {
    /// Create a new state
    pub fn new(streak: u32, date: NaiveDate) -> Self {
        Self { streak, date }
    }

    /// Read the state file.
    ///
    /// A missing file is `None`. An unreadable or unparsable file is logged and
    /// also treated as `None`, so the streak gets recomputed and the file
    /// overwritten on the next save.
    pub fn load(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No saved streak state");
                return None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read streak state, recomputing");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not parse streak state, recomputing");
                None
            }
        }
    }

    /// Write the state as pretty JSON with a trailing newline
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        write_file(path, json)
    }
}

/// Consecutive positive days ending at the latest date in `days`.
///
/// Scans backward and stops at the first zero-count day or the first date hole.
pub fn canonical_streak(days: &[ContributionDay]) -> u32 {
    let by_date: BTreeMap<NaiveDate, u32> = days.iter().map(|d| (d.date, d.count)).collect();
    backward_scan(&by_date)
}

fn backward_scan(by_date: &BTreeMap<NaiveDate, u32>) -> u32 {
    let mut streak = 0;
    let mut expected: Option<NaiveDate> = None;

    for (&date, &count) in by_date.iter().rev() {
        if expected.is_some_and(|e| e != date) || count == 0 {
            break;
        }
        streak += 1;
        expected = date.pred_opt();
        if expected.is_none() {
            break;
        }
    }

    streak
}

/// Decide the streak for this run from the saved state and a fresh calendar.
///
/// - saved date equals the latest date: the saved streak is kept as is
/// - every day after the saved date up to the latest one is positive: the saved
///   streak grows by that many days
/// - otherwise (a zero or missing day in the gap, no saved state, or a saved
///   date ahead of the calendar): the streak is recomputed by a backward scan
///
/// Fails with [`BadgeError::NoContributionData`] when `days` is empty.
pub fn continue_streak(saved: Option<&StreakState>, days: &[ContributionDay]) -> Result<StreakState> {
    let by_date: BTreeMap<NaiveDate, u32> = days.iter().map(|d| (d.date, d.count)).collect();
    let latest = *by_date
        .keys()
        .next_back()
        .ok_or(BadgeError::NoContributionData)?;

    let streak = match saved {
        Some(state) if state.date == latest => {
            debug!(streak = state.streak, %latest, "Saved streak is current");
            state.streak
        }
        Some(state) if state.date < latest => {
            let gap: Vec<NaiveDate> = state
                .date
                .iter_days()
                .skip(1)
                .take_while(|d| *d <= latest)
                .collect();
            let all_active = gap
                .iter()
                .all(|d| by_date.get(d).copied().unwrap_or(0) > 0);

            if all_active {
                let extended = state.streak.saturating_add(gap.len() as u32);
                info!(saved = state.streak, added = gap.len(), extended, "Extending saved streak");
                extended
            } else {
                let recomputed = backward_scan(&by_date);
                info!(saved = state.streak, recomputed, "Gap contains an inactive day, streak recomputed");
                recomputed
            }
        }
        Some(state) => {
            warn!(saved_date = %state.date, %latest, "Saved streak date is ahead of the calendar, recomputing");
            backward_scan(&by_date)
        }
        None => backward_scan(&by_date),
    };

    Ok(StreakState::new(streak, latest))
}
