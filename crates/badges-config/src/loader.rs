//! Configuration loading utilities

use crate::schema::Config;
use badges_common::{BadgeError, Result as BadgeResult};
use std::{
    env,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "BADGES_CONFIG_PATH";

/// Token variables, highest precedence first
pub const TOKEN_ENV_VARS: [&str; 3] = ["PH_TOKEN", "GH_TOKEN", "GITHUB_TOKEN"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for BadgeError {
    fn from(err: ConfigError) -> Self {
        BadgeError::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::parse_yaml(&content)?;

        Self::apply_env_overrides(&mut config)?;
        validator::Validate::validate(&config)?;

        Ok(config)
    }

    /// Parse YAML without touching the environment. An empty document yields the defaults.
    pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration, honouring an explicit path first.
    ///
    /// Lookup order: `explicit`, then `BADGES_CONFIG_PATH`, then `badges.yaml`
    /// or `badges.yml` in the working directory, then built-in defaults.
    /// Environment overrides are applied in every case.
    pub fn load(explicit: Option<&Path>) -> BadgeResult<Config> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.trim().is_empty()).map(PathBuf::from))
            .or_else(|| {
                ["badges.yaml", "badges.yml"]
                    .into_iter()
                    .map(PathBuf::from)
                    .find(|p| p.exists())
            });

        let config = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                Self::load_config(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_env_overrides(&mut config)?;
                validator::Validate::validate(&config).map_err(ConfigError::from)?;
                config
            }
        };

        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |name| env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source. Blank values are ignored.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = TOKEN_ENV_VARS.iter().find_map(|name| get(*name)) {
            config.github.token = Some(token);
        }

        if let Some(repository) = get("GITHUB_REPOSITORY") {
            config.github.repository = Some(repository);
        }

        if let Some(endpoint) = get("BADGES_GITHUB_ENDPOINT") {
            config.github.endpoint = endpoint;
        }

        if let Some(timeout) = get("BADGES_GITHUB_TIMEOUT") {
            config.github.timeout_secs = timeout.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: "BADGES_GITHUB_TIMEOUT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(api_key) = get("WAKATIME_API_KEY") {
            config.wakatime.api_key = Some(api_key);
        }

        if let Some(username) = get("WAKATIME_USERNAME") {
            config.wakatime.username = Some(username);
        }

        if let Some(base_url) = get("BADGES_WAKATIME_BASE_URL") {
            config.wakatime.base_url = base_url;
        }

        if let Some(timeout) = get("BADGES_WAKATIME_TIMEOUT") {
            config.wakatime.timeout_secs = timeout.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: "BADGES_WAKATIME_TIMEOUT".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}
