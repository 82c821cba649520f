//! Domain types shared across the workspace.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day of a GitHub contribution calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    /// Calendar date (UTC)
    pub date: NaiveDate,
    /// Number of recorded contributions on that date
    #[serde(rename = "contributionCount", default)]
    pub count: u32,
}

impl ContributionDay {
    /// Create a new day record
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}

/// A week column of the contribution calendar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    /// Days of the week, as returned by GitHub (Sunday first)
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>,
}

/// GitHub's `contributionCalendar` object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    /// Sum reported by GitHub for the queried range
    #[serde(default)]
    pub total_contributions: u64,
    /// Week columns
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
}

impl ContributionCalendar {
    /// Flatten the weeks into days sorted ascending by date.
    ///
    /// Duplicate dates collapse into one entry; the last one seen wins.
    pub fn days(&self) -> Vec<ContributionDay> {
        let by_date: BTreeMap<NaiveDate, u32> = self
            .weeks
            .iter()
            .flat_map(|w| w.contribution_days.iter())
            .map(|d| (d.date, d.count))
            .collect();

        by_date
            .into_iter()
            .map(|(date, count)| ContributionDay { date, count })
            .collect()
    }

    /// Whether the calendar holds no days at all
    pub fn is_empty(&self) -> bool {
        self.weeks.iter().all(|w| w.contribution_days.is_empty())
    }

    /// Build a calendar from flat days, chunked into weeks of seven.
    ///
    /// Mostly useful for fixtures; real calendars come from the API.
    pub fn from_days(days: impl IntoIterator<Item = ContributionDay>) -> Self {
        let days: Vec<ContributionDay> = days.into_iter().collect();
        let total_contributions = days.iter().map(|d| u64::from(d.count)).sum();
        let weeks = days
            .chunks(7)
            .map(|chunk| ContributionWeek {
                contribution_days: chunk.to_vec(),
            })
            .collect();
        Self {
            total_contributions,
            weeks,
        }
    }
}
