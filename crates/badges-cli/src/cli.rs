//! Command line surface of the `badges` binary.

use anyhow::Context as _;
use badges_common::{BadgeError, LogFormat, LoggingConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::{
    commands::{
        ConfigArgs, LineArgs, MonthlyArgs, SanitizeArgs, StreakArgs, ViewsArgs, WakaCardArgs,
        WakaPngArgs, WakaSvgArgs,
    },
    context::AppContext,
};

/// Exit code used for failures that carry no [`BadgeError`]
pub const UNEXPECTED_EXIT_CODE: i32 = 99;

#[derive(Debug, Parser)]
#[command(name = "badges")]
#[command(about = "Generate GitHub profile badges: streaks, contribution charts and WakaTime cards")]
#[command(version)]
pub struct Badges {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path (defaults to BADGES_CONFIG_PATH, then ./badges.yaml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "badges_common=trace" (overrides RUST_LOG)
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log line format: compact, pretty or json
    #[arg(long, global = true, value_name = "FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Update the contribution streak and render the streak card
    Streak(StreakArgs),

    /// Render the month-by-month contribution heatmap for a year
    Monthly(MonthlyArgs),

    /// Render the daily contribution line chart for a year
    Line(LineArgs),

    /// Render the WakaTime stats card from live all-time stats
    WakaSvg(WakaSvgArgs),

    /// Render the WakaTime hours card (live, then cache, then placeholder)
    WakaCard(WakaCardArgs),

    /// Render the WakaTime PNG card (live, then cache, then placeholder)
    WakaPng(WakaPngArgs),

    /// Strip active content and remote references from SVG files in place
    Sanitize(SanitizeArgs),

    /// Record the profile-views count and save the counter badge
    Views(ViewsArgs),

    /// Validate and print the effective configuration
    Config(ConfigArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Streak(_) => "streak",
            Self::Monthly(_) => "monthly",
            Self::Line(_) => "line",
            Self::WakaSvg(_) => "waka-svg",
            Self::WakaCard(_) => "waka-card",
            Self::WakaPng(_) => "waka-png",
            Self::Sanitize(_) => "sanitize",
            Self::Views(_) => "views",
            Self::Config(_) => "config",
        }
    }
}

impl Badges {
    /// Logging setup: `--log-level`, else `RUST_LOG`, else the configured level.
    pub fn logging_config(&self, configured_level: Option<&str>) -> LoggingConfig {
        let base = match self.log_level.as_deref().filter(|l| !l.trim().is_empty()) {
            Some(level) => LoggingConfig {
                level: level.to_string(),
                ..LoggingConfig::default()
            },
            None => LoggingConfig::from_env_or(configured_level.unwrap_or("info")),
        };
        LoggingConfig {
            format: self.log_format,
            file_path: self.log_file.as_ref().map(|p| p.display().to_string()),
            ..base
        }
    }

    /// Run the selected subcommand
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let result = match &self.command {
            Command::Streak(command) => command.run(ctx).await,
            Command::Monthly(command) => command.run(ctx).await,
            Command::Line(command) => command.run(ctx).await,
            Command::WakaSvg(command) => command.run(ctx).await,
            Command::WakaCard(command) => command.run(ctx).await,
            Command::WakaPng(command) => command.run(ctx).await,
            Command::Sanitize(command) => command.run(),
            Command::Views(command) => command.run(ctx).await,
            Command::Config(command) => command.run(ctx),
        };
        result.with_context(|| format!("{} failed", self.command.name()))
    }
}

/// Process exit code for an error returned by [`Badges::run`]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BadgeError>()
        .map_or(UNEXPECTED_EXIT_CODE, BadgeError::exit_code)
}
