//! WakaTime stats normalization and the live → cache → placeholder chain.

use badges_common::{write_file, StatsRange, WakaStatsResponse, WakaTimeClient};
use serde::Serialize;
use serde_json::Value;
use std::{fmt, fs, path::Path};
use tracing::{info, warn};
use url::Url;

const WAKATIME_PROFILE_BASE: &str = "https://wakatime.com/";

const LANGUAGE_PALETTE: [&str; 10] = [
    "#f39a2e", "#ffd86b", "#29a3a3", "#f67280", "#6a5acd", "#20b2aa", "#ff6f61", "#87ceeb",
    "#9bdeac", "#a68cff",
];

/// Stable palette color for a language name.
///
/// Uses the classic `h * 31 + c` string hash over UTF-16 code units with
/// 32-bit wrapping on the shifted term, so a name keeps its color across runs.
pub fn language_color(name: &str) -> &'static str {
    let mut h: i64 = 0;
    for unit in name.encode_utf16() {
        h = i64::from(unit) + i64::from((h as i32).wrapping_shl(5)) - h;
    }
    LANGUAGE_PALETTE[(h.unsigned_abs() % LANGUAGE_PALETTE.len() as u64) as usize]
}

/// Public profile link for `username`, with the name percent-encoded as a path segment.
pub fn profile_url(username: &str) -> Option<String> {
    let name = username.trim().trim_start_matches('@');
    if name.is_empty() {
        return None;
    }
    let mut url = Url::parse(WAKATIME_PROFILE_BASE).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(&format!("@{name}"));
    Some(url.to_string())
}

/// One language row ready for drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    /// Language name
    pub name: String,
    /// Share of total time, rounded to one decimal
    pub percent: f64,
    /// Seconds spent
    pub total_seconds: f64,
    /// Palette color
    pub color: &'static str,
}

/// Render-ready view of a stats response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WakaSummary {
    /// Total hours with one decimal, e.g. `"100.0"`
    pub hours: String,
    /// Total seconds the hours were derived from
    pub total_seconds: f64,
    /// Number of projects
    pub projects: usize,
    /// Languages in response order
    pub languages: Vec<LanguageShare>,
    /// Account name without the leading `@`
    pub username: Option<String>,
}

/// Normalize a raw stats response. Never fails; missing fields count as empty.
///
/// A language whose `percent` is missing or zero gets its share computed
/// from `total_seconds`.
pub fn normalize(raw: &Value) -> WakaSummary {
    let data = WakaStatsResponse::from_value(raw).data;
    let total = data.total_seconds();
    let languages = data
        .languages
        .iter()
        .map(|lang| {
            let seconds = lang.total_seconds.unwrap_or(0.0);
            let percent = match lang.percent {
                Some(p) if p != 0.0 => p,
                _ if total > 0.0 => seconds / total * 100.0,
                _ => 0.0,
            };
            LanguageShare {
                name: lang.name.clone(),
                percent: (percent * 10.0).round() / 10.0,
                total_seconds: seconds,
                color: language_color(&lang.name),
            }
        })
        .collect();

    WakaSummary {
        hours: format!("{:.1}", total / 3600.0),
        total_seconds: total,
        projects: data.projects.len(),
        languages,
        username: data.display_username(),
    }
}

/// Where the stats used for rendering came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    /// Live all-time stats
    AllTime,
    /// Live last-7-days stats
    LastSevenDays,
    /// The on-disk cache of an earlier live response
    Cache,
    /// Hard-coded empty stats
    Placeholder,
}

impl StatsSource {
    /// True for data fetched during this run
    pub fn is_live(self) -> bool {
        matches!(self, Self::AllTime | Self::LastSevenDays)
    }
}

impl fmt::Display for StatsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AllTime => "all_time",
            Self::LastSevenDays => "last_7_days",
            Self::Cache => "cache",
            Self::Placeholder => "placeholder",
        };
        f.write_str(s)
    }
}

/// Raw stats plus their origin
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStats {
    /// Response JSON as received (or as cached)
    pub raw: Value,
    /// Where `raw` came from
    pub source: StatsSource,
}

impl ResolvedStats {
    /// Normalized view of `raw`
    pub fn summary(&self) -> WakaSummary {
        normalize(&self.raw)
    }
}

fn reports_time(raw: &Value) -> bool {
    WakaStatsResponse::from_value(raw).data.total_seconds() > 0.0
}

async fn fetch_live(client: &WakaTimeClient) -> Option<ResolvedStats> {
    match client.stats(StatsRange::AllTime).await {
        Ok(raw) if reports_time(&raw) => {
            return Some(ResolvedStats {
                raw,
                source: StatsSource::AllTime,
            })
        }
        Ok(_) => info!("all_time stats report zero seconds; trying last_7_days"),
        Err(e) => warn!(error = %e, "all_time stats fetch failed"),
    }

    match client.stats(StatsRange::LastSevenDays).await {
        Ok(raw) => Some(ResolvedStats {
            raw,
            source: StatsSource::LastSevenDays,
        }),
        Err(e) => {
            warn!(error = %e, "last_7_days stats fetch failed");
            None
        }
    }
}

fn read_cache(cache_path: &Path) -> Option<Value> {
    let content = match fs::read_to_string(cache_path) {
        Ok(content) => content,
        Err(e) => {
            info!(path = %cache_path.display(), error = %e, "No usable WakaTime cache");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!(path = %cache_path.display(), error = %e, "WakaTime cache exists but could not be parsed");
            None
        }
    }
}

fn write_cache(cache_path: &Path, raw: &Value) {
    let result = serde_json::to_string_pretty(raw)
        .map_err(Into::into)
        .and_then(|json| write_file(cache_path, json.as_bytes()));
    match result {
        Ok(()) => info!(path = %cache_path.display(), "Cached WakaTime stats"),
        Err(e) => warn!(path = %cache_path.display(), error = %e, "Failed to write WakaTime cache"),
    }
}

/// Resolve the stats to render. Always succeeds.
///
/// Order: live `all_time` (skipped when it reports zero seconds), live
/// `last_7_days`, the cache file, then the empty placeholder. A live result
/// is written back to `cache_path`; a failed cache write is only logged.
/// Passing no client skips straight to the cache.
pub async fn resolve_stats(client: Option<&WakaTimeClient>, cache_path: &Path) -> ResolvedStats {
    if let Some(client) = client {
        if let Some(live) = fetch_live(client).await {
            write_cache(cache_path, &live.raw);
            info!(source = %live.source, "Resolved WakaTime stats");
            return live;
        }
    }

    if let Some(raw) = read_cache(cache_path) {
        info!(path = %cache_path.display(), "Loaded cached WakaTime stats");
        return ResolvedStats {
            raw,
            source: StatsSource::Cache,
        };
    }

    warn!("No WakaTime data available; using placeholder");
    ResolvedStats {
        raw: WakaStatsResponse::placeholder_json(),
        source: StatsSource::Placeholder,
    }
}
