//! GitHub GraphQL client for contribution calendars.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::{
    error::{BadgeError, Result},
    retry::RetryPolicy,
    types::ContributionCalendar,
};

/// Public GitHub GraphQL endpoint
pub const DEFAULT_GITHUB_ENDPOINT: &str = "https://api.github.com/graphql";

const CALENDAR_QUERY: &str = r#"
query($login: String!, $from: DateTime, $to: DateTime) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// Configuration for the GitHub client
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Personal access or workflow token
    pub token: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retry schedule for transient failures
    pub retry: RetryPolicy,
    /// Value sent in the `User-Agent` header
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GITHUB_ENDPOINT.to_string(),
            token: String::new(),
            timeout_secs: 30,
            retry: RetryPolicy::github_default(),
            user_agent: concat!("profile-badges/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GitHubConfig {
    /// Create a configuration with the given token and default settings
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// Point the client at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
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

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: Option<ContributionsCollection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: Option<ContributionCalendar>,
}

#[derive(Debug, Serialize)]
struct CalendarVariables<'a> {
    login: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
}

/// Client for the GitHub GraphQL API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new client. Fails when the token is empty.
    pub fn new(config: GitHubConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(BadgeError::missing_credentials(
                "a GitHub token is required (PH_TOKEN, GH_TOKEN or GITHUB_TOKEN)",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| BadgeError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// Fetch the contribution calendar of `login`.
    ///
    /// Without a range GitHub returns its default trailing year.
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    pub async fn contribution_calendar(
        &self,
        login: &str,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<ContributionCalendar> {
        info!("Fetching contribution calendar");

        let variables = CalendarVariables {
            login,
            from: range.map(|(from, _)| from.to_rfc3339()),
            to: range.map(|(_, to)| to.to_rfc3339()),
        };
        let body = json!({ "query": CALENDAR_QUERY, "variables": variables });

        let response: GraphQlResponse<UserData> = self
            .config
            .retry
            .run(
                "github graphql",
                || self.post(&body),
                BadgeError::is_transient,
            )
            .await?;

        let calendar = response
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| {
                BadgeError::malformed(format!("no user {login:?} in GraphQL response"))
            })?
            .contributions_collection
            .and_then(|c| c.contribution_calendar)
            .ok_or_else(|| {
                BadgeError::malformed("cannot find contributionCalendar in GraphQL response")
            })?;

        debug!(
            weeks = calendar.weeks.len(),
            total = calendar.total_contributions,
            "Received contribution calendar"
        );
        Ok(calendar)
    }

    /// Fetch the calendar covering January 1st through December 31st of `year`.
    pub async fn contribution_calendar_for_year(
        &self,
        login: &str,
        year: i32,
    ) -> Result<ContributionCalendar> {
        let range = year_range(year)
            .ok_or_else(|| BadgeError::validation_field(format!("invalid year {year}"), "year"))?;
        self.contribution_calendar(login, Some(range)).await
    }

    async fn post(&self, body: &serde_json::Value) -> Result<GraphQlResponse<UserData>> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("bearer {}", self.config.token))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BadgeError::github_with_status(
                format!("GraphQL request returned {status}: {}", text.trim()),
                status.as_u16(),
            ));
        }

        let parsed: GraphQlResponse<UserData> = response
            .json()
            .await
            .map_err(|e| BadgeError::malformed(format!("invalid GraphQL response body: {e}")))?;

        // GitHub answers 200 with an `errors` array for query-level failures;
        // a null user comes back the same way and is reported as malformed.
        let user_missing = parsed.data.as_ref().map_or(true, |d| d.user.is_none());
        if !parsed.errors.is_empty() && user_missing {
            let message = parsed
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            let lowered = message.to_lowercase();
            if lowered.contains("rate limit") || lowered.contains("timeout") {
                return Err(BadgeError::github(message));
            }
            return Err(BadgeError::malformed(message));
        }

        Ok(parsed)
    }
}

/// UTC bounds of a calendar year, `None` for years chrono cannot represent.
pub fn year_range(year: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?.and_hms_opt(23, 59, 59)?;
    Some((Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GitHubConfig::new("tok");
        assert_eq!(config.endpoint, DEFAULT_GITHUB_ENDPOINT);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.retry.max_attempts, 4);
        assert!(config.user_agent.starts_with("profile-badges/"));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = GitHubClient::new(GitHubConfig::new("  ")).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_year_range() {
        let (from, to) = year_range(2024).unwrap();
        assert_eq!(from.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2024-12-31T23:59:59+00:00");
    }

    #[test]
    fn test_variables_skip_missing_range() {
        let vars = CalendarVariables {
            login: "octocat",
            from: None,
            to: None,
        };
        assert_eq!(serde_json::to_value(&vars).unwrap(), json!({"login": "octocat"}));
    }
}
