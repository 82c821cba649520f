//! # Badges Common
//!
//! Shared types, API clients, error handling and logging for the profile
//! badge generator.
//!
//! Every other crate in the workspace builds on the [`BadgeError`] type and the
//! clients defined here: [`GitHubClient`] for the contribution calendar,
//! [`WakaTimeClient`] for coding statistics and [`ProfileViewsClient`] for the
//! profile-views counter badge.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod github;
pub mod logging;
pub mod retry;
pub mod types;
pub mod utils;
pub mod views;
pub mod wakatime;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{BadgeError, Result};
pub use github::{year_range, GitHubClient, GitHubConfig, DEFAULT_GITHUB_ENDPOINT};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use retry::{Backoff, RetryPolicy};
pub use types::*;
pub use utils::*;
pub use views::{extract_views, ProfileViewsClient, ProfileViewsConfig, DEFAULT_VIEWS_BASE_URL};
pub use wakatime::{
    StatsRange, WakaLanguage, WakaStatsData, WakaStatsResponse, WakaTimeClient, WakaTimeConfig,
    DEFAULT_WAKATIME_BASE_URL,
};
