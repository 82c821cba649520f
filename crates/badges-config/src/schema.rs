//! Configuration structures.
//!
//! Secrets (`token`, `api_key`) may be read from a file or the environment but
//! are never serialized back out.

use badges_common::{RetryPolicy, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// GitHub GraphQL settings
    #[validate]
    pub github: GitHubSettings,

    /// WakaTime settings
    #[validate]
    pub wakatime: WakaTimeSettings,

    /// Profile-views badge settings
    #[validate]
    pub views: ViewsSettings,

    /// Default output locations
    #[validate]
    pub output: OutputSettings,

    /// Colors used by the renderers
    #[validate]
    pub theme: ThemeSettings,

    /// Retry budgets and delays
    #[validate]
    pub retry: RetrySettings,

    /// Log filter used when neither `RUST_LOG` nor `--log-level` is given
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error, off"
    ))]
    pub log_level: String,
}

/// GitHub API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GitHubSettings {
    /// GraphQL endpoint
    #[validate(url(message = "GitHub endpoint must be a valid URL"))]
    pub endpoint: String,

    /// Token, resolved from `PH_TOKEN`, `GH_TOKEN` or `GITHUB_TOKEN`
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// Login whose contributions are rendered
    #[validate(custom(
        function = "crate::validation::validate_github_login",
        message = "Invalid GitHub login"
    ))]
    pub user: Option<String>,

    /// `owner/repo` of the repository running the workflow (`GITHUB_REPOSITORY`)
    pub repository: Option<String>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_secs: u64,
}

/// WakaTime API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WakaTimeSettings {
    /// API root
    #[validate(url(message = "WakaTime base URL must be a valid URL"))]
    pub base_url: String,

    /// API key (`WAKATIME_API_KEY`)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Username for the profile link (`WAKATIME_USERNAME`)
    pub username: Option<String>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_secs: u64,

    /// Last good raw stats JSON, used when the API is unavailable
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Invalid cache path"
    ))]
    pub cache_path: String,
}

/// Profile-views counter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ViewsSettings {
    /// Badge service root
    #[validate(url(message = "Views base URL must be a valid URL"))]
    pub base_url: String,

    /// Badge label
    #[validate(length(min = 1, message = "Badge label cannot be empty"))]
    pub label: String,

    /// Badge color, hex without `#`
    #[validate(regex(
        path = "crate::validation::BARE_HEX_COLOR_REGEX",
        message = "Badge color must be six hex digits without #"
    ))]
    pub color: String,

    /// Badge style
    pub style: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_secs: u64,

    /// Latest snapshot JSON
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub snapshot_path: String,

    /// History JSON array
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub history_path: String,

    /// Where the fetched badge SVG is saved
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub svg_path: String,
}

/// Default output paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputSettings {
    /// Streak card
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub streak_svg: String,

    /// Persisted streak state
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub streak_state: String,

    /// Month-by-month heatmap
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub monthly_svg: String,

    /// Daily line chart
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub line_svg: String,

    /// WakaTime SVG cards
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub waka_svg: String,

    /// WakaTime PNG card
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub waka_png: String,
}

/// Renderer colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ThemeSettings {
    /// Heatmap scale, lightest (zero contributions) first
    #[validate(custom(
        function = "crate::validation::validate_palette",
        message = "Heatmap palette must be five #rrggbb colors"
    ))]
    pub heatmap_colors: Vec<String>,

    /// Line chart stroke color
    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Line color must be valid hex color"
    ))]
    pub line_color: String,

    /// Card background for the streak and WakaTime cards
    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Card background must be valid hex color"
    ))]
    pub card_background: String,

    /// Accent color for bars and highlights
    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Accent color must be valid hex color"
    ))]
    pub accent_color: String,
}

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RetrySettings {
    /// Total GitHub attempts
    #[validate(range(min = 1, max = 10, message = "Attempts must be between 1 and 10"))]
    pub github_attempts: usize,

    /// Step of the linear GitHub backoff
    #[validate(range(max = 60000, message = "Delay cannot exceed 60000 ms"))]
    pub github_base_delay_ms: u64,

    /// Total WakaTime attempts
    #[validate(range(min = 1, max = 10, message = "Attempts must be between 1 and 10"))]
    pub wakatime_attempts: usize,

    /// First WakaTime delay; doubles on each retry
    #[validate(range(max = 60000, message = "Delay cannot exceed 60000 ms"))]
    pub wakatime_base_delay_ms: u64,

    /// Random extra delay bound
    #[validate(range(max = 10000, message = "Jitter cannot exceed 10000 ms"))]
    pub wakatime_jitter_ms: u64,

    /// Total profile-views attempts
    #[validate(range(min = 1, max = 10, message = "Attempts must be between 1 and 10"))]
    pub views_attempts: usize,

    /// Fixed delay between profile-views attempts
    #[validate(range(max = 60000, message = "Delay cannot exceed 60000 ms"))]
    pub views_delay_ms: u64,
}

impl RetrySettings {
    /// Policy for GitHub calls
    pub fn github_policy(&self) -> RetryPolicy {
        RetryPolicy::linear(self.github_attempts, Duration::from_millis(self.github_base_delay_ms))
    }

    /// Policy for WakaTime calls
    pub fn wakatime_policy(&self) -> RetryPolicy {
        RetryPolicy::exponential(
            self.wakatime_attempts,
            Duration::from_millis(self.wakatime_base_delay_ms),
        )
        .with_jitter(Duration::from_millis(self.wakatime_jitter_ms))
    }

    /// Policy for the profile-views badge
    pub fn views_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.views_attempts, Duration::from_millis(self.views_delay_ms))
    }
}

impl Config {
    /// Run every field validator, mapping failures into the workspace error type
    pub fn validate_all(&self) -> Result<()> {
        self.validate()
            .map_err(|e| badges_common::BadgeError::config_with_source("invalid configuration", e))
    }

    /// Serialize to YAML (secrets omitted)
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| badges_common::BadgeError::config_with_source("failed to serialize configuration", e))
    }
}
