//! Add command - append an entry to the unreleased release

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use kacl_core::{Category, Changelog, CHANGELOG_FILE};

use crate::cli::Cli;

/// Add an entry to the unreleased release
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Entry text
    pub description: String,

    /// Category for the entry
    #[arg(short, long, value_enum, default_value_t = CategoryArg::Changed)]
    pub category: CategoryArg,

    /// Changelog file
    #[arg(short, long, default_value = CHANGELOG_FILE)]
    pub file: PathBuf,
}

/// Clap-facing category argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CategoryArg {
    Added,
    Changed,
    Removed,
    Deprecated,
    Fixed,
    Security,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Added => Category::Added,
            CategoryArg::Changed => Category::Changed,
            CategoryArg::Removed => Category::Removed,
            CategoryArg::Deprecated => Category::Deprecated,
            CategoryArg::Fixed => Category::Fixed,
            CategoryArg::Security => Category::Security,
        }
    }
}

impl AddCommand {
    /// Execute the add command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(category = ?self.category, file = %self.file.display(), "executing add command");

        let mut changelog = Changelog::read(&self.file)?;
        let category = Category::from(self.category);
        changelog.add_unreleased(category, self.description.as_str());
        changelog.write(&self.file)?;

        if !cli.quiet {
            println!(
                "{} Added {} entry to {}",
                style("✓").green().bold(),
                style(category.as_str()).bold(),
                style(self.file.display()).cyan()
            );
        }

        Ok(())
    }
}
