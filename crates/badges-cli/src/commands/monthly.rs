use badges_common::Result;
use badges_graphs::{BadgeRenderer, MonthlyHeatmap};
use clap::Args;
use std::path::PathBuf;

use super::{fetch_year, path_or};
use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct MonthlyArgs {
    /// GitHub login
    #[arg(long)]
    pub user: Option<String>,

    /// Calendar year (defaults to the current one)
    #[arg(long)]
    pub year: Option<i32>,

    /// Output SVG path
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

impl MonthlyArgs {
    pub async fn run(&self, ctx: &AppContext) -> Result<()> {
        let out = path_or(self.out.as_deref(), &ctx.config().output.monthly_svg);
        let data = fetch_year(ctx, self.user.as_deref(), self.year).await?;
        MonthlyHeatmap::new(ctx.heatmap_style()).render_to_file(&data, &out)
    }
}
