//! Runtime context shared by the subcommands: configuration plus the clients
//! and renderer styles derived from it.

use badges_common::{
    owner_from_repository, BadgeError, GitHubClient, GitHubConfig, ProfileViewsClient,
    ProfileViewsConfig, Result, WakaTimeClient, WakaTimeConfig,
};
use badges_config::Config;
use badges_graphs::{CardStyle, HeatmapStyle, LineChartStyle};
use std::path::PathBuf;
use tracing::debug;

/// Loaded configuration with client and style factories
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Config,
}

impl AppContext {
    /// Wrap a loaded and validated configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GitHub client; fails with a credentials error when no token is configured.
    pub fn github_client(&self) -> Result<GitHubClient> {
        let settings = &self.config.github;
        let token = settings
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                BadgeError::missing_credentials(
                    "a GitHub token is required (PH_TOKEN, GH_TOKEN or GITHUB_TOKEN)",
                )
            })?;

        GitHubClient::new(
            GitHubConfig::new(token)
                .with_endpoint(settings.endpoint.clone())
                .with_timeout(settings.timeout_secs)
                .with_retry(self.config.retry.github_policy()),
        )
    }

    /// WakaTime client, or `None` when no API key is configured
    pub fn wakatime_client(&self) -> Result<Option<WakaTimeClient>> {
        let settings = &self.config.wakatime;
        let Some(api_key) = settings.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            debug!("No WakaTime API key configured");
            return Ok(None);
        };

        WakaTimeClient::new(
            WakaTimeConfig::new(api_key)
                .with_base_url(settings.base_url.clone())
                .with_timeout(settings.timeout_secs)
                .with_retry(self.config.retry.wakatime_policy()),
        )
        .map(Some)
    }

    /// WakaTime client, failing when no API key is configured
    pub fn require_wakatime_client(&self) -> Result<WakaTimeClient> {
        self.wakatime_client()?
            .ok_or_else(|| BadgeError::missing_credentials("WAKATIME_API_KEY not set"))
    }

    /// Profile-views counter client
    pub fn views_client(&self) -> Result<ProfileViewsClient> {
        let settings = &self.config.views;
        ProfileViewsClient::new(ProfileViewsConfig {
            base_url: settings.base_url.clone(),
            label: settings.label.clone(),
            color: settings.color.clone(),
            style: settings.style.clone(),
            timeout_secs: settings.timeout_secs,
            retry: self.config.retry.views_policy(),
        })
    }

    /// Login for the chart commands: the flag, else the configured user.
    pub fn required_login(&self, flag: Option<&str>) -> Result<String> {
        flag.or(self.config.github.user.as_deref())
            .map(str::trim)
            .filter(|login| !login.is_empty())
            .map(str::to_string)
            .ok_or_else(|| BadgeError::validation_field("--user <github-username> is required", "user"))
    }

    /// Login for the streak: the flag, the configured user, then the owner of
    /// `GITHUB_REPOSITORY`.
    pub fn streak_login(&self, flag: Option<&str>) -> Result<String> {
        if let Ok(login) = self.required_login(flag) {
            return Ok(login);
        }
        let repository = self
            .config
            .github
            .repository
            .as_deref()
            .ok_or_else(|| BadgeError::missing_repository("GITHUB_REPOSITORY not set"))?;
        owner_from_repository(repository)
    }

    /// WakaTime profile name: the flag, the name in the stats, then the configured one.
    pub fn waka_username(&self, flag: Option<&str>, from_stats: Option<&str>) -> Option<String> {
        flag.or(from_stats)
            .or(self.config.wakatime.username.as_deref())
            .map(|name| name.trim().trim_start_matches('@'))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    /// WakaTime cache file
    pub fn waka_cache_path(&self) -> PathBuf {
        PathBuf::from(&self.config.wakatime.cache_path)
    }

    /// Colors for the streak and WakaTime cards
    pub fn card_style(&self) -> CardStyle {
        CardStyle {
            background: self.config.theme.card_background.clone(),
            accent: self.config.theme.accent_color.clone(),
            ..CardStyle::default()
        }
    }

    /// Heatmap color scale
    pub fn heatmap_style(&self) -> HeatmapStyle {
        HeatmapStyle {
            colors: self.config.theme.heatmap_colors.clone(),
            ..HeatmapStyle::default()
        }
    }

    /// Line chart colors
    pub fn line_style(&self) -> LineChartStyle {
        LineChartStyle {
            stroke: self.config.theme.line_color.clone(),
            ..LineChartStyle::default()
        }
    }
}
