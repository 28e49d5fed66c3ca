//! Show command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use kacl_core::{Category, Changelog, Release, CHANGELOG_FILE};

use crate::cli::{output, Cli, OutputFormat};

/// Show the parsed changelog
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Changelog file
    #[arg(default_value = CHANGELOG_FILE)]
    pub file: PathBuf,

    /// Only show a single release (version, or "unreleased")
    #[arg(long)]
    pub release: Option<String>,
}

impl ShowCommand {
    /// Execute the show command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(file = %self.file.display(), "executing show command");
        let changelog = Changelog::read(&self.file)?;

        if let Some(version) = &self.release {
            let release = changelog.release(version).ok_or_else(|| {
                anyhow::anyhow!("No release {} in {}", version, self.file.display())
            })?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(release)?),
                OutputFormat::Text => print_release(release),
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&changelog)?),
            OutputFormat::Text => {
                if changelog.releases.is_empty() {
                    output::warning("no releases found");
                    return Ok(());
                }
                for release in &changelog.releases {
                    print_release(release);
                }
            }
        }

        Ok(())
    }
}

fn print_release(release: &Release) {
    let date = release
        .date
        .map(|date| format!(" - {}", date))
        .unwrap_or_default();
    println!(
        "{}{}",
        style(release.version.to_string()).green().bold(),
        style(date).dim()
    );

    for category in Category::CANONICAL {
        if let Some(entries) = release.sections.get(category) {
            if !entries.is_empty() {
                println!(
                    "  {}: {}",
                    style(category.as_str()).dim(),
                    entries.len()
                );
            }
        }
    }
}
