use badges_common::Result;
use badges_graphs::sanitize_file;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Args)]
pub struct SanitizeArgs {
    /// SVG files to scrub in place
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl SanitizeArgs {
    /// Stops at the first file that cannot be read or written.
    pub fn run(&self) -> Result<()> {
        let mut changed = 0;
        for file in &self.files {
            if sanitize_file(file)? {
                changed += 1;
            }
        }
        info!(files = self.files.len(), changed, "Sanitize complete");
        Ok(())
    }
}
