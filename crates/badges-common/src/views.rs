//! Profile-views counter badge (komarev.com) client.

use regex::Regex;
use reqwest::Client;
use std::{sync::LazyLock, time::Duration};
use tracing::{debug, info, instrument};
use url::Url;

use crate::{
    error::{BadgeError, Result},
    retry::RetryPolicy,
};

/// Badge service root
pub const DEFAULT_VIEWS_BASE_URL: &str = "https://komarev.com/ghpvc/";

static TEXT_NODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">([^<>]+)<").expect("Invalid text node regex"));

static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:,\d{3})*|\d+)$").expect("Invalid numeric token regex")
});

static DIGIT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2,}").expect("Invalid digit run regex"));

/// Configuration for the profile-views client
#[derive(Debug, Clone)]
pub struct ProfileViewsConfig {
    /// Badge service root
    pub base_url: String,
    /// Badge label text
    pub label: String,
    /// Badge color, hex without `#`
    pub color: String,
    /// Badge style
    pub style: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retry schedule
    pub retry: RetryPolicy,
}

impl Default for ProfileViewsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_VIEWS_BASE_URL.to_string(),
            label: "Profile views".to_string(),
            color: "0e75b6".to_string(),
            style: "flat".to_string(),
            timeout_secs: 20,
            retry: RetryPolicy::views_default(),
        }
    }
}

/// Fetches the counter badge SVG
#[derive(Debug, Clone)]
pub struct ProfileViewsClient {
    client: Client,
    config: ProfileViewsConfig,
}

impl ProfileViewsClient {
    /// Create a new client
    pub fn new(config: ProfileViewsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BadgeError::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { client, config })
    }

    /// Badge URL for `username`
    pub fn badge_url(&self, username: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.config.base_url,
            [
                ("username", username),
                ("label", self.config.label.as_str()),
                ("color", self.config.color.as_str()),
                ("style", self.config.style.as_str()),
            ],
        )
        .map_err(|e| BadgeError::config_with_source("invalid profile views URL", e))
    }

    /// Download the badge SVG. Note that each fetch increments the counter.
    #[instrument(skip(self))]
    pub async fn fetch_svg(&self, username: &str) -> Result<String> {
        let url = self.badge_url(username)?;
        info!("Fetching profile views badge");

        let svg = self
            .config
            .retry
            .run("profile views", || self.get_text(url.clone()), |_: &BadgeError| true)
            .await?;

        debug!(bytes = svg.len(), "Badge fetched");
        Ok(svg)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Pull the view count out of a counter badge SVG.
///
/// The last visible text node that is a plain number (commas allowed as
/// thousands separators) wins; failing that, the longest run of two or more
/// digits anywhere in the document.
pub fn extract_views(svg: &str) -> Result<u64> {
    let last_numeric = TEXT_NODE_REGEX
        .captures_iter(svg)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty() && NUMERIC_REGEX.is_match(t))
        .last();

    if let Some(token) = last_numeric {
        if let Ok(views) = token.replace(',', "").parse::<u64>() {
            return Ok(views);
        }
    }

    // First of the longest runs, so ties go to the earliest match.
    let mut longest: Option<&str> = None;
    for m in DIGIT_RUN_REGEX.find_iter(svg) {
        if longest.map_or(true, |l| m.as_str().len() > l.len()) {
            longest = Some(m.as_str());
        }
    }

    longest
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or_else(|| BadgeError::malformed("no numeric value found in badge SVG"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BADGE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="20">
<g fill="#fff"><text x="40" y="14">Profile views</text><text x="100" y="14">1,234</text></g></svg>"##;

    #[test]
    fn test_extract_last_numeric_text() {
        assert_eq!(extract_views(BADGE).unwrap(), 1234);
    }

    #[test]
    fn test_extract_plain_number() {
        let svg = "<svg><text>views</text><text> 42 </text><text>7</text></svg>";
        assert_eq!(extract_views(svg).unwrap(), 7);
    }

    #[test]
    fn test_extract_falls_back_to_digit_run() {
        let svg = r#"<svg width="12"><text>views: 4567 total</text></svg>"#;
        assert_eq!(extract_views(svg).unwrap(), 4567);
    }

    #[test]
    fn test_extract_fails_without_digits() {
        let err = extract_views("<svg><text>nothing</text></svg>").unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn test_badge_url_encodes_params() {
        let client = ProfileViewsClient::new(ProfileViewsConfig::default()).unwrap();
        let url = client.badge_url("octo cat").unwrap();
        assert_eq!(
            url.as_str(),
            "https://komarev.com/ghpvc/?username=octo+cat&label=Profile+views&color=0e75b6&style=flat"
        );
    }
}
