use badges_common::{Result, StatsRange};
use badges_graphs::{
    normalize, resolve_stats, BadgeRenderer, WakaHoursCard, WakaPngCard, WakaStatsCard, WakaSummary,
};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use super::path_or;
use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct WakaSvgArgs {
    /// Output SVG path
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// WakaTime profile linked from the card
    #[arg(long)]
    pub username: Option<String>,
}

impl WakaSvgArgs {
    /// Live all-time stats only; any API failure fails the command.
    pub async fn run(&self, ctx: &AppContext) -> Result<()> {
        let client = ctx.require_wakatime_client()?;
        let out = path_or(self.out.as_deref(), &ctx.config().output.waka_svg);

        let raw = client.stats(StatsRange::AllTime).await?;
        let summary = with_username(ctx, normalize(&raw), self.username.as_deref());

        WakaStatsCard::new(ctx.card_style()).render_to_file(&summary, &out)?;
        info!(hours = %summary.hours, languages = summary.languages.len(), "WakaTime card written");
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
pub struct WakaCardArgs {
    /// Output SVG path
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// WakaTime profile linked from the card
    #[arg(long)]
    pub username: Option<String>,

    /// Cached stats used when the API is unavailable
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,
}

impl WakaCardArgs {
    pub async fn run(&self, ctx: &AppContext) -> Result<()> {
        let out = path_or(self.out.as_deref(), &ctx.config().output.waka_svg);
        let summary = resolved_summary(ctx, self.cache.as_deref(), self.username.as_deref()).await?;
        WakaHoursCard::new(ctx.card_style()).render_to_file(&summary, &out)
    }
}

#[derive(Debug, Clone, Args)]
pub struct WakaPngArgs {
    /// Output PNG path
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Cached stats used when the API is unavailable
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,
}

impl WakaPngArgs {
    pub async fn run(&self, ctx: &AppContext) -> Result<()> {
        let out = path_or(self.out.as_deref(), &ctx.config().output.waka_png);
        let summary = resolved_summary(ctx, self.cache.as_deref(), None).await?;
        WakaPngCard::new(ctx.card_style()).render_to_file(&summary, &out)
    }
}

/// Run the live → cache → placeholder chain and normalize the result.
async fn resolved_summary(ctx: &AppContext, cache: Option<&Path>, username: Option<&str>) -> Result<WakaSummary> {
    let client = ctx.wakatime_client()?;
    let cache = cache.map_or_else(|| ctx.waka_cache_path(), Path::to_path_buf);

    let resolved = resolve_stats(client.as_ref(), &cache).await;
    let summary = with_username(ctx, resolved.summary(), username);
    info!(
        source = %resolved.source,
        hours = %summary.hours,
        languages = summary.languages.len(),
        "Normalized WakaTime stats"
    );
    Ok(summary)
}

fn with_username(ctx: &AppContext, mut summary: WakaSummary, flag: Option<&str>) -> WakaSummary {
    summary.username = ctx.waka_username(flag, summary.username.as_deref());
    summary
}
