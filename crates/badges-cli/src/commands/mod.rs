//! One module per subcommand.

mod config;
mod line;
mod monthly;
mod sanitize;
mod streak;
mod views;
mod waka;

pub use config::ConfigArgs;
pub use line::LineArgs;
pub use monthly::MonthlyArgs;
pub use sanitize::SanitizeArgs;
pub use streak::StreakArgs;
pub use views::ViewsArgs;
pub use waka::{WakaCardArgs, WakaPngArgs, WakaSvgArgs};

use badges_common::Result;
use badges_graphs::YearContributions;
use chrono::{Datelike, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::context::AppContext;

/// The flag when given, else the configured default
fn path_or(flag: Option<&Path>, configured: &str) -> PathBuf {
    flag.map_or_else(|| PathBuf::from(configured), Path::to_path_buf)
}

/// Fetch one calendar year for the chart commands and log its totals.
async fn fetch_year(ctx: &AppContext, user: Option<&str>, year: Option<i32>) -> Result<YearContributions> {
    let client = ctx.github_client()?;
    let login = ctx.required_login(user)?;
    let year = year.unwrap_or_else(|| Utc::now().year());

    let calendar = client.contribution_calendar_for_year(&login, year).await?;
    let data = YearContributions::new(login, year, &calendar.days());

    let monthly = data
        .monthly_totals()
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    info!(login = %data.login, year, monthly = %monthly, total = data.total(), "Contribution totals");
    Ok(data)
}
