//! Arguments and helpers shared by every command that works on a site.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{CONFIG_FILE_NAME, ConfigFile, LayoutsOptions, parse_config};
use crate::constants::DEFAULT_SOURCE_DIRECTORY;
use crate::site::Site;

/// Where the site lives and how it is configured.
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// Build root; every other path is relative to it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Source directory to read files from
    #[arg(short = 's', long, default_value = DEFAULT_SOURCE_DIRECTORY)]
    pub source: PathBuf,

    /// Config file (defaults to `layout-chain.toml` in the build root, if present)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Layout directory, overriding the config file
    #[arg(long)]
    pub directory: Option<PathBuf>,
}

impl SiteArgs {
    /// Load the config file, or defaults when none is given and none exists.
    pub fn load_config(&self) -> Result<ConfigFile> {
        match &self.config {
            Some(path) => parse_config(&self.root.join(path)),
            None => {
                let path = self.root.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    parse_config(&path)
                } else {
                    debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, self.root.display());
                    Ok(ConfigFile::default())
                }
            }
        }
    }

    /// Options from the config file with command-line overrides applied.
    pub fn options(&self, config: &ConfigFile) -> Result<LayoutsOptions> {
        let mut options = config.layouts_options()?;
        if let Some(directory) = &self.directory {
            options = options.with_directory(directory.clone());
        }
        Ok(options)
    }

    /// Read the site's source files and attach the configured metadata.
    pub async fn read_site(&self, config: &ConfigFile) -> Result<Site> {
        let site = Site::read(&self.root, &self.source)
            .await
            .with_context(|| format!("Failed to read source directory '{}'", self.source.display()))?;
        Ok(site.with_metadata(config.metadata.clone()))
    }
}
