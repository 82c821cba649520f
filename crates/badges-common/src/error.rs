//! Error types and utilities for the badge generator

use thiserror::Error;

/// Result type alias for badge operations
pub type Result<T> = std::result::Result<T, BadgeError>;

/// Main error type for badge operations
#[derive(Error, Debug)]
pub enum BadgeError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required token or API key was not provided
    #[error("Missing credentials: {message}")]
    MissingCredentials { message: String },

    /// `GITHUB_REPOSITORY` is absent or not in `owner/repo` form
    #[error("Missing repository context: {message}")]
    MissingRepository { message: String },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (timeouts, refused connections, transport failures)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// GitHub GraphQL API errors
    #[error("GitHub API error: {message}")]
    GitHub {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// WakaTime API errors
    #[error("WakaTime API error: {message}")]
    WakaTime {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The API answered, but not with the shape we need
    #[error("Malformed API response: {message}")]
    MalformedResponse { message: String },

    /// The contribution calendar came back without any days
    #[error("No contribution data found in the contribution calendar")]
    NoContributionData,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SVG or PNG rendering errors
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A file handed to the sanitizer could not be processed
    #[error("Failed to sanitize {path}: {source}")]
    Sanitize {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BadgeError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing credentials error
    pub fn missing_credentials(msg: impl Into<String>) -> Self {
        Self::MissingCredentials {
            message: msg.into(),
        }
    }

    /// Create a missing repository context error
    pub fn missing_repository(msg: impl Into<String>) -> Self {
        Self::MissingRepository {
            message: msg.into(),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new GitHub API error
    pub fn github(msg: impl Into<String>) -> Self {
        Self::GitHub {
            message: msg.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new GitHub API error with status code
    pub fn github_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::GitHub {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new WakaTime API error
    pub fn wakatime(msg: impl Into<String>) -> Self {
        Self::WakaTime {
            message: msg.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new WakaTime API error with status code
    pub fn wakatime_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::WakaTime {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: msg.into(),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new sanitizer error for a file
    pub fn sanitize(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Sanitize {
            path: path.into(),
            source,
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether a retry could plausibly succeed.
    ///
    /// Transport failures and 5xx answers are transient, and so are GraphQL
    /// error payloads that mention rate limiting or timeouts. Everything else
    /// (bad credentials, unknown users, malformed payloads) fails fast.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::GitHub {
                status_code: Some(status),
                ..
            }
            | Self::WakaTime {
                status_code: Some(status),
                ..
            } => *status >= 500,
            Self::GitHub {
                message,
                status_code: None,
                ..
            } => {
                let lowered = message.to_lowercase();
                lowered.contains("rate limit") || lowered.contains("timeout")
            }
            _ => false,
        }
    }

    /// Process exit code for this error.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 1    | missing credentials or required input |
    /// | 2    | missing repository context |
    /// | 3    | sanitizer could not process a file |
    /// | 10   | GitHub request failed |
    /// | 11   | malformed or empty API response |
    /// | 99   | anything else |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCredentials { .. } | Self::Validation { .. } => 1,
            Self::MissingRepository { .. } => 2,
            Self::Sanitize { .. } => 3,
            Self::GitHub { .. } | Self::Network { .. } => 10,
            Self::MalformedResponse { .. } | Self::NoContributionData => 11,
            _ => 99,
        }
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to BadgeError.
///
/// Transport failures become [`BadgeError::Network`] and are retried; a
/// request that could not be built, a redirect loop or an undecodable body
/// will fail the same way again and maps to a non-transient error.
impl From<reqwest::Error> for BadgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::network_with_source(format!("HTTP error: {}", status_code), err)
        } else if err.is_request() || err.is_body() {
            Self::network_with_source("Network request failed", err)
        } else if err.is_builder() {
            Self::with_source("Invalid HTTP request", err)
        } else if err.is_redirect() {
            Self::with_source("Too many redirects", err)
        } else {
            Self::with_source("HTTP request failed", err)
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to BadgeError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for BadgeError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("PNG drawing failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = BadgeError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = BadgeError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let github_error = BadgeError::github_with_status("Bad gateway", 502);
        assert!(github_error.to_string().contains("GitHub API error"));
        assert!(github_error.to_string().contains("Bad gateway"));

        let waka_error = BadgeError::wakatime_with_status("Unauthorized", 401);
        assert!(waka_error.to_string().contains("WakaTime API error"));

        let validation_error = BadgeError::validation_field("Invalid input", "user");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = BadgeError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let config_source_error = BadgeError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(config_source_error.to_string().contains("Configuration error"));
        assert!(config_source_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let badge_error: BadgeError = io_error.into();

        assert!(badge_error.to_string().contains("I/O error"));
        assert!(badge_error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let badge_error: BadgeError = serde_error.into();

        assert!(badge_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_display_formatting() {
        assert_eq!(format!("{}", BadgeError::new("test error")), "test error");
        assert_eq!(
            format!("{}", BadgeError::config("missing field")),
            "Configuration error: missing field"
        );
        assert_eq!(
            format!("{}", BadgeError::NoContributionData),
            "No contribution data found in the contribution calendar"
        );
    }

    #[test]
    fn test_transient_classification() {
        assert!(BadgeError::network("connection reset").is_transient());
        assert!(BadgeError::github_with_status("Bad gateway", 502).is_transient());
        assert!(BadgeError::wakatime_with_status("Unavailable", 503).is_transient());
        assert!(BadgeError::github("API rate limit exceeded for user").is_transient());
        assert!(BadgeError::github("Timeout on validation of query").is_transient());

        assert!(!BadgeError::github_with_status("Bad credentials", 401).is_transient());
        assert!(!BadgeError::github("Could not resolve to a User").is_transient());
        assert!(!BadgeError::malformed("no calendar").is_transient());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BadgeError::missing_credentials("GITHUB_TOKEN").exit_code(), 1);
        assert_eq!(BadgeError::validation_field("required", "user").exit_code(), 1);
        assert_eq!(BadgeError::missing_repository("GITHUB_REPOSITORY").exit_code(), 2);
        assert_eq!(
            BadgeError::sanitize("a.svg", io::Error::new(io::ErrorKind::NotFound, "gone"))
                .exit_code(),
            3
        );
        assert_eq!(BadgeError::github_with_status("down", 500).exit_code(), 10);
        assert_eq!(BadgeError::malformed("no user").exit_code(), 11);
        assert_eq!(BadgeError::NoContributionData.exit_code(), 11);
        assert_eq!(BadgeError::render("boom").exit_code(), 99);
    }

    #[test]
    fn test_unbuildable_request_is_not_retried() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        assert!(err.is_builder());
        let error = BadgeError::from(err);
        assert!(matches!(error, BadgeError::Generic { .. }));
        assert!(!error.is_transient());
        assert!(error.source().is_some());
    }

    #[tokio::test]
    async fn test_refused_connection_is_transient() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        let error = BadgeError::from(err);
        assert!(matches!(error, BadgeError::Network { .. }));
        assert!(error.is_transient());
        assert_eq!(error.exit_code(), 10);
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = BadgeError::config_with_source("Middle layer", root_error);
        let top_error = BadgeError::with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
    }
}
