//! Main entry point for the `badges` binary.

use badges_cli::{cli::exit_code, AppContext, Badges};
use badges_common::init_logging;
use badges_config::ConfigLoader;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Badges::parse();

    // Loaded before logging so the configured level can apply; a load error
    // is reported once the subscriber is up.
    let loaded = ConfigLoader::load(cli.config.as_deref());
    let logging = cli.logging_config(loaded.as_ref().ok().map(|c| c.log_level.as_str()));
    if let Err(e) = init_logging(logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let result = match loaded {
        Ok(config) => {
            info!(version = env!("CARGO_PKG_VERSION"), "Starting badges");
            cli.run(&AppContext::new(config)).await
        }
        Err(e) => Err(anyhow::Error::new(e).context("failed to load configuration")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(u8::try_from(exit_code(&err)).unwrap_or(u8::MAX))
        }
    }
}
