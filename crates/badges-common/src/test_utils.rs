//! Test utilities and shared fixtures for the badge workspace.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for
//! the other crates' tests.

use chrono::NaiveDate;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

use crate::types::{ContributionCalendar, ContributionDay};

static INIT: Once = Once::new();

/// Initialize logging for tests once per process.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Parse a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    s.parse()
        .unwrap_or_else(|e| panic!("bad fixture date {s:?}: {e}"))
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Contribution calendar fixtures.
pub mod calendar_fixtures {
    use super::*;

    /// Consecutive days starting at `start` with the given counts.
    pub fn days_from(start: &str, counts: &[u32]) -> Vec<ContributionDay> {
        let start = date(start);
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ContributionDay::new(start + chrono::Days::new(i as u64), count))
            .collect()
    }

    /// Calendar of consecutive days starting at `start` with the given counts.
    pub fn calendar_from(start: &str, counts: &[u32]) -> ContributionCalendar {
        ContributionCalendar::from_days(days_from(start, counts))
    }

    /// GraphQL response body wrapping `calendar`, as GitHub would send it.
    pub fn graphql_body(calendar: &ContributionCalendar) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "user": {
                    "contributionsCollection": {
                        "contributionCalendar": calendar
                    }
                }
            }
        })
    }

    /// GraphQL body for an unknown login.
    pub fn graphql_unknown_user(login: &str) -> serde_json::Value {
        serde_json::json!({
            "data": { "user": null },
            "errors": [{
                "type": "NOT_FOUND",
                "path": ["user"],
                "message": format!("Could not resolve to a User with the login of '{login}'.")
            }]
        })
    }
}

/// WakaTime response fixtures.
pub mod waka_fixtures {
    use serde_json::{json, Value};

    /// A typical all-time response.
    pub fn all_time_stats() -> Value {
        json!({
            "data": {
                "username": "@octocat",
                "total_seconds": 360000.0,
                "total_seconds_all": 370000.0,
                "languages": [
                    {"name": "Rust", "percent": 61.24, "total_seconds": 220464.0},
                    {"name": "TypeScript", "percent": 20.0, "total_seconds": 72000.0},
                    {"name": "Python", "total_seconds": 36000.0},
                    {"name": "YAML", "percent": 0.0, "total_seconds": 1800.0}
                ],
                "projects": [{"name": "badges"}, {"name": "dotfiles"}, {"name": "blog"}]
            }
        })
    }

    /// A response that exists but has no recorded time.
    pub fn empty_stats() -> Value {
        json!({ "data": { "total_seconds": 0, "languages": [], "projects": [] } })
    }

    /// A small last-7-days response.
    pub fn last_week_stats() -> Value {
        json!({
            "data": {
                "total_seconds": 18000,
                "languages": [{"name": "Go", "percent": 100.0, "total_seconds": 18000}],
                "projects": [{"name": "tool"}]
            }
        })
    }
}

/// Config file fixtures.
pub mod config_fixtures {
    /// A minimal YAML configuration
    pub fn minimal_config_yaml() -> &'static str {
        r#"
github:
  user: octocat
"#
    }

    /// A fully populated YAML configuration
    pub fn full_config_yaml() -> &'static str {
        r##"
github:
  endpoint: "https://api.github.com/graphql"
  user: octocat
  timeout_secs: 20
wakatime:
  base_url: "https://wakatime.com/api/v1"
  username: octocat
  timeout_secs: 12
  cache_path: ".github/waka-template/waka_data.json"
output:
  streak_svg: "streak.svg"
  streak_state: "streak_state.json"
  monthly_svg: "./assets/contrib-monthly.svg"
  line_svg: "./Assets/contrib-daily-line.svg"
  waka_svg: "wakatime.svg"
  waka_png: "wakatime.png"
  accent_color: "#f39a2e"
retry:
  github_attempts: 4
  github_base_delay_ms: 700
  wakatime_attempts: 4
  wakatime_base_delay_ms: 1000
  wakatime_jitter_ms: 400
  views_attempts: 3
  views_delay_ms: 3000
"##
    }
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}
