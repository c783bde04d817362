//! Run the layouts pass over a site and write the result.
//!
//! ```bash
//! layout-chain build
//! layout-chain build --source content --destination public
//! layout-chain build --pattern "**/*.md" --pattern "!drafts/**" --default page.html
//! ```
//!
//! Layouts that live inside the source directory are rendered like everything
//! else but never written to the destination.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::SiteArgs;
use crate::constants::DEFAULT_DESTINATION_DIRECTORY;
use crate::locator::{LayoutLocator, LayoutSource};
use crate::plugin::LayoutsPlugin;

/// Command to build a site.
#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(flatten)]
    site: SiteArgs,

    /// Output directory
    #[arg(short = 'd', long, default_value = DEFAULT_DESTINATION_DIRECTORY)]
    destination: PathBuf,

    /// Glob selecting content files; repeatable, `!` negates
    ///
    /// Replaces the `pattern` from the config file.
    #[arg(short = 'p', long = "pattern")]
    patterns: Vec<String>,

    /// Layout for files that do not name one
    #[arg(long)]
    default: Option<String>,

    /// List every skipped file with the reason
    #[arg(long)]
    show_skipped: bool,
}

impl BuildCommand {
    /// Execute the build command.
    pub async fn execute(self) -> Result<()> {
        let config = self.site.load_config()?;
        let mut options = self.site.options(&config)?;
        if !self.patterns.is_empty() {
            options = options.with_pattern(&self.patterns)?;
        }
        if let Some(default) = self.default {
            options = options.with_default(default);
        }

        let mut site = self.site.read_site(&config).await?;
        let plugin = LayoutsPlugin::new(options);
        let summary = plugin.run(&mut site).await?;

        let exclude = match LayoutLocator::new(plugin.options(), plugin.registry()).layout_source(&site) {
            LayoutSource::InSource {
                prefix,
            } => Some(prefix),
            LayoutSource::External {
                ..
            } => None,
        };
        let written = site.write(&self.destination, exclude.as_deref()).await?;

        println!(
            "{} Rendered {} files with {} layouts ({} skipped), wrote {} files to {}",
            "✓".green(),
            summary.files_rendered,
            summary.layouts,
            summary.skipped.len(),
            written,
            self.destination.display()
        );

        if self.show_skipped {
            for (name, reason) in &summary.skipped {
                println!("  {} {} ({})", "-".dimmed(), name, reason.to_string().dimmed());
            }
        }

        Ok(())
    }
}
