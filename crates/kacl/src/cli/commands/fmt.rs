//! Fmt command - normalize a changelog file through parse and rebuild

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use kacl_core::{Changelog, CHANGELOG_FILE};

use crate::cli::{output, Cli};

/// Normalize a changelog file
#[derive(Debug, Args)]
pub struct FmtCommand {
    /// Changelog file
    #[arg(default_value = CHANGELOG_FILE)]
    pub file: PathBuf,

    /// Verify formatting without applying changes (for CI / hooks)
    #[arg(long)]
    pub check: bool,
}

impl FmtCommand {
    /// Execute the fmt command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(check = self.check, file = %self.file.display(), "executing fmt command");

        let content = std::fs::read_to_string(&self.file)?;
        let normalized = Changelog::parse(&content).build()?;

        if normalized == content {
            if !cli.quiet {
                output::success("changelog already normalized");
            }
            return Ok(());
        }

        if self.check {
            anyhow::bail!("{} is not normalized", self.file.display());
        }

        std::fs::write(&self.file, normalized)?;
        if !cli.quiet {
            println!(
                "{} Normalized {}",
                style("✓").green().bold(),
                style(self.file.display()).cyan()
            );
        }

        Ok(())
    }
}
