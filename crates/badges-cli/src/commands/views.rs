use badges_common::{extract_views, write_file, Result};
use badges_graphs::{append_history, ViewsSnapshot};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::path_or;
use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct ViewsArgs {
    /// GitHub login (defaults to the owner of GITHUB_REPOSITORY)
    #[arg(long)]
    pub username: Option<String>,

    /// Latest snapshot JSON
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// History JSON array
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Where to save the fetched badge SVG
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,
}

impl ViewsArgs {
    /// Fetching the badge counts as a view.
    pub async fn run(&self, ctx: &AppContext) -> Result<()> {
        let username = ctx.streak_login(self.username.as_deref())?;
        let settings = &ctx.config().views;
        let snapshot_path = path_or(self.snapshot.as_deref(), &settings.snapshot_path);
        let history_path = path_or(self.history.as_deref(), &settings.history_path);
        let svg_path = path_or(self.svg.as_deref(), &settings.svg_path);

        let svg = ctx.views_client()?.fetch_svg(&username).await?;
        let views = extract_views(&svg)?;
        let date = Utc::now().date_naive();

        ViewsSnapshot { views, date }.save(&snapshot_path)?;
        let history = append_history(&history_path, date, views)?;
        write_file(&svg_path, &svg)?;

        info!(%username, views, %date, entries = history.len(), "Profile views recorded");
        Ok(())
    }
}
