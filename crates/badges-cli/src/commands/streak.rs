use badges_common::Result;
use badges_graphs::{continue_streak, BadgeRenderer, StreakCard, StreakState};
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

use super::path_or;
use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct StreakArgs {
    /// GitHub login (defaults to the owner of GITHUB_REPOSITORY)
    #[arg(long)]
    pub user: Option<String>,

    /// Saved streak state file
    #[arg(long, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Output SVG path
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

impl StreakArgs {
    pub async fn run(&self, ctx: &AppContext) -> Result<()> {
        let client = ctx.github_client()?;
        let login = ctx.streak_login(self.user.as_deref())?;
        let output = &ctx.config().output;
        let state_path = path_or(self.state.as_deref(), &output.streak_state);
        let out = path_or(self.out.as_deref(), &output.streak_svg);

        let days = client.contribution_calendar(&login, None).await?.days();
        let recent = days
            .iter()
            .skip(days.len().saturating_sub(14))
            .map(|d| format!("{}:{}", d.date, d.count))
            .collect::<Vec<_>>()
            .join(", ");
        debug!(%recent, "Last 14 days");

        let saved = StreakState::load(&state_path);
        let state = continue_streak(saved.as_ref(), &days)?;

        StreakCard::new(ctx.card_style()).render_to_file(&state.streak, &out)?;
        state.save(&state_path)?;
        info!(%login, streak = state.streak, last_day = %state.date, "Streak updated");
        Ok(())
    }
}
