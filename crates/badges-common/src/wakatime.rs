//! WakaTime REST client.
//!
//! Stats are returned as raw JSON so the caller can cache exactly what the API
//! sent; [`WakaStatsResponse`] gives a typed, lenient view over that JSON.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use tracing::{debug, info, instrument};
use url::Url;

use crate::{
    error::{BadgeError, Result},
    retry::RetryPolicy,
};

/// Public WakaTime API root
pub const DEFAULT_WAKATIME_BASE_URL: &str = "https://wakatime.com/api/v1";

/// Time range of a stats request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsRange {
    /// Everything WakaTime has recorded
    AllTime,
    /// The trailing week
    LastSevenDays,
}

impl StatsRange {
    /// Path segment used by the API
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllTime => "all_time",
            Self::LastSevenDays => "last_7_days",
        }
    }
}

impl fmt::Display for StatsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the WakaTime client
#[derive(Debug, Clone)]
pub struct WakaTimeConfig {
    /// API root, e.g. `https://wakatime.com/api/v1`
    pub base_url: String,
    /// Secret API key, sent as the basic-auth username
    pub api_key: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retry schedule
    pub retry: RetryPolicy,
}

impl Default for WakaTimeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WAKATIME_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 12,
            retry: RetryPolicy::wakatime_default(),
        }
    }
}

impl WakaTimeConfig {
    /// Create a configuration with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Client for the WakaTime stats endpoints
#[derive(Debug, Clone)]
pub struct WakaTimeClient {
    client: Client,
    config: WakaTimeConfig,
    base_url: Url,
}

impl WakaTimeClient {
    /// Create a new client. Fails when the API key is empty or the base URL is invalid.
    pub fn new(config: WakaTimeConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(BadgeError::missing_credentials("WAKATIME_API_KEY not set"));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            BadgeError::config_with_source(format!("invalid WakaTime URL {}", config.base_url), e)
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BadgeError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// URL of the stats endpoint for `range`
    pub fn stats_url(&self, range: StatsRange) -> String {
        format!(
            "{}/users/current/stats/{}",
            self.base_url.as_str().trim_end_matches('/'),
            range
        )
    }

    /// Fetch the raw stats JSON for `range`, retrying on any failure.
    #[instrument(skip(self))]
    pub async fn stats(&self, range: StatsRange) -> Result<serde_json::Value> {
        let url = self.stats_url(range);
        info!("Fetching WakaTime {range} stats");

        let value = self
            .config
            .retry
            .run("wakatime stats", || self.get_json(&url), |_: &BadgeError| true)
            .await?;

        debug!("WakaTime {range} stats fetched");
        Ok(value)
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.api_key, Some(""))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let excerpt: String = text.chars().take(200).collect();
            return Err(BadgeError::wakatime_with_status(
                format!("HTTP {status} {}", excerpt.trim()),
                status.as_u16(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| BadgeError::wakatime(format!("invalid JSON body: {e}")))
    }
}

/// Typed view over a stats response. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WakaStatsResponse {
    /// Payload
    #[serde(default)]
    pub data: WakaStatsData,
}

/// The `data` object of a stats response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WakaStatsData {
    /// Total coded seconds in the range
    #[serde(default)]
    pub total_seconds: Option<f64>,
    /// Total including "other" activity, used when `total_seconds` is missing
    #[serde(default)]
    pub total_seconds_all: Option<f64>,
    /// Per-language breakdown, largest first
    #[serde(default)]
    pub languages: Vec<WakaLanguage>,
    /// Projects seen in the range; only the count matters here
    #[serde(default)]
    pub projects: Vec<serde_json::Value>,
    /// Account username, sometimes prefixed with `@`
    #[serde(default)]
    pub username: Option<String>,
}

/// One language entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WakaLanguage {
    /// Language name
    #[serde(default)]
    pub name: String,
    /// Share of the total, 0-100
    #[serde(default)]
    pub percent: Option<f64>,
    /// Seconds spent in this language
    #[serde(default)]
    pub total_seconds: Option<f64>,
}

impl WakaStatsResponse {
    /// Interpret arbitrary JSON; anything that does not fit yields the empty default.
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// The placeholder used when no data is available at all
    pub fn placeholder_json() -> serde_json::Value {
        serde_json::json!({ "data": { "total_seconds": 0, "languages": [], "projects": [] } })
    }
}

impl WakaStatsData {
    /// `total_seconds`, falling back to `total_seconds_all`, then zero
    pub fn total_seconds(&self) -> f64 {
        [self.total_seconds, self.total_seconds_all]
            .into_iter()
            .flatten()
            .find(|s| *s > 0.0)
            .unwrap_or(0.0)
    }

    /// Username without a leading `@`, if WakaTime reported a non-empty one
    pub fn display_username(&self) -> Option<String> {
        self.username
            .as_deref()
            .map(|u| u.trim_start_matches('@').trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_paths() {
        assert_eq!(StatsRange::AllTime.as_str(), "all_time");
        assert_eq!(StatsRange::LastSevenDays.to_string(), "last_7_days");
    }

    #[test]
    fn test_stats_url() {
        let client = WakaTimeClient::new(
            WakaTimeConfig::new("key").with_base_url("http://localhost:9999/api/v1/"),
        )
        .unwrap();
        assert_eq!(
            client.stats_url(StatsRange::AllTime),
            "http://localhost:9999/api/v1/users/current/stats/all_time"
        );
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let err = WakaTimeClient::new(WakaTimeConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_lenient_parsing() {
        let value = json!({
            "data": {
                "total_seconds_all": 7200.0,
                "languages": [{"name": "Rust", "percent": 75.5}, {"name": "Go"}],
                "projects": [{"name": "a"}, {"name": "b"}],
                "username": "@octocat"
            }
        });
        let stats = WakaStatsResponse::from_value(&value);
        assert_eq!(stats.data.total_seconds(), 7200.0);
        assert_eq!(stats.data.languages.len(), 2);
        assert_eq!(stats.data.languages[1].percent, None);
        assert_eq!(stats.data.projects.len(), 2);
        assert_eq!(stats.data.display_username().as_deref(), Some("octocat"));
    }

    #[test]
    fn test_garbage_becomes_empty() {
        let stats = WakaStatsResponse::from_value(&json!({"data": "nope"}));
        assert_eq!(stats, WakaStatsResponse::default());
        assert_eq!(stats.data.total_seconds(), 0.0);
    }

    #[test]
    fn test_placeholder_shape() {
        let stats = WakaStatsResponse::from_value(&WakaStatsResponse::placeholder_json());
        assert_eq!(stats.data.total_seconds(), 0.0);
        assert!(stats.data.languages.is_empty());
        assert!(stats.data.projects.is_empty());
    }
}
