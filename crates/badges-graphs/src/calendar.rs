//! Calendar densification for the chart renderers.

use badges_common::ContributionDay;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// One calendar year of contributions for a single user, every date present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearContributions {
    /// GitHub login the data belongs to
    pub login: String,
    /// Calendar year
    pub year: i32,
    /// January 1st through December 31st, ascending
    pub days: Vec<ContributionDay>,
}

impl YearContributions {
    /// Densify `days` over `year`; days from other years are dropped.
    pub fn new(login: impl Into<String>, year: i32, days: &[ContributionDay]) -> Self {
        Self {
            login: login.into(),
            year,
            days: fill_year(days, year),
        }
    }

    /// Largest daily count (at least 1)
    pub fn max_count(&self) -> u32 {
        max_count(&self.days)
    }

    /// Sum of all daily counts
    pub fn total(&self) -> u64 {
        self.days.iter().map(|d| u64::from(d.count)).sum()
    }

    /// Per-month sums, January first
    pub fn monthly_totals(&self) -> [u64; 12] {
        let mut totals = [0u64; 12];
        for day in &self.days {
            totals[day.date.month0() as usize] += u64::from(day.count);
        }
        totals
    }

    /// Days of month `month0` (0-based)
    pub fn month(&self, month0: u32) -> impl Iterator<Item = &ContributionDay> {
        self.days.iter().filter(move |d| d.date.month0() == month0)
    }
}

/// Every date from `start` through `end` inclusive, with missing dates counted as zero.
///
/// Days outside the range are dropped. An inverted range yields nothing.
pub fn fill_range(days: &[ContributionDay], start: NaiveDate, end: NaiveDate) -> Vec<ContributionDay> {
    let counts: HashMap<NaiveDate, u32> = days.iter().map(|d| (d.date, d.count)).collect();
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| ContributionDay::new(date, counts.get(&date).copied().unwrap_or(0)))
        .collect()
}

/// Every date of `year`, January 1st through December 31st.
pub fn fill_year(days: &[ContributionDay], year: i32) -> Vec<ContributionDay> {
    match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(start), Some(end)) => fill_range(days, start, end),
        _ => Vec::new(),
    }
}

/// Largest daily count, at least 1 so it can be used as a divisor.
pub fn max_count(days: &[ContributionDay]) -> u32 {
    days.iter().map(|d| d.count).max().unwrap_or(0).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use badges_common::test_utils::date;

    #[test]
    fn test_fill_range_inserts_zeros() {
        let days = vec![
            ContributionDay::new(date("2024-03-02"), 4),
            ContributionDay::new(date("2024-03-05"), 1),
            ContributionDay::new(date("2024-02-01"), 9),
        ];
        let filled = fill_range(&days, date("2024-03-01"), date("2024-03-05"));
        let counts: Vec<u32> = filled.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![0, 4, 0, 0, 1]);
        assert_eq!(filled[0].date, date("2024-03-01"));
    }

    #[test]
    fn test_fill_year_handles_leap_years() {
        assert_eq!(fill_year(&[], 2024).len(), 366);
        assert_eq!(fill_year(&[], 2023).len(), 365);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert!(fill_range(&[], date("2024-03-05"), date("2024-03-01")).is_empty());
    }

    #[test]
    fn test_year_contributions_totals() {
        let days = vec![
            ContributionDay::new(date("2023-12-31"), 50),
            ContributionDay::new(date("2024-01-15"), 2),
            ContributionDay::new(date("2024-01-16"), 3),
            ContributionDay::new(date("2024-12-31"), 4),
        ];
        let year = YearContributions::new("octocat", 2024, &days);
        assert_eq!(year.days.len(), 366);
        assert_eq!(year.total(), 9);
        assert_eq!(year.max_count(), 4);

        let monthly = year.monthly_totals();
        assert_eq!(monthly[0], 5);
        assert_eq!(monthly[11], 4);
        assert_eq!(monthly.iter().sum::<u64>(), 9);
        assert_eq!(year.month(1).count(), 29);
    }

    #[test]
    fn test_max_count_never_zero() {
        assert_eq!(max_count(&[]), 1);
        assert_eq!(
            max_count(&[
                ContributionDay::new(date("2024-01-01"), 0),
                ContributionDay::new(date("2024-01-02"), 7)
            ]),
            7
        );
    }
}
