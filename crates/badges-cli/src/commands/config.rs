use badges_common::Result;
use clap::Args;
use tracing::info;

use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Only validate; print nothing
    #[arg(long)]
    pub check: bool,
}

impl ConfigArgs {
    /// Validate the effective configuration and print it as YAML on stdout.
    /// Tokens and API keys are never printed.
    pub fn run(&self, ctx: &AppContext) -> Result<()> {
        let config = ctx.config();
        config.validate_all()?;
        if !self.check {
            print!("{}", config.to_yaml()?);
        }
        info!("Configuration is valid");
        Ok(())
    }
}
