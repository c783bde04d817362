//! Command-line interface for layout-chain.
//!
//! # Commands
//!
//! - `build` - Read a site, resolve nested layouts, render content, write the output
//! - `tree` - Show the layout inheritance forest without rendering
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output, including why each file was skipped
//! - `--quiet` - Suppress all log output except errors
//!
//! Without either flag the `RUST_LOG` environment variable is honored, falling
//! back to warnings only. Logs go to stderr; command output goes to stdout.
//!
//! # Examples
//!
//! ```bash
//! layout-chain build
//! layout-chain --verbose build --source content --destination public
//! layout-chain tree --directory src/layouts
//! ```

mod build;
mod common;
mod tree;

pub use build::BuildCommand;
pub use common::SiteArgs;
pub use tree::TreeCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive. `None` defers to `RUST_LOG`, then `warn`.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Calling this more than once is harmless: later calls are ignored.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Nested layout resolution for static sites.
#[derive(Parser, Debug)]
#[command(
    name = "layout-chain",
    about = "Render static-site content through nested, inheriting layouts",
    version,
    long_about = "layout-chain renders content files through layouts that may themselves extend other layouts, \
                  resolving the whole inheritance forest before any content is rendered."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a site's content through its layouts and write the result.
    Build(BuildCommand),

    /// Show the layout inheritance forest.
    Tree(TreeCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from the global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    ///
    /// ```
    /// use clap::Parser;
    /// use layout_chain::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["layout-chain", "--verbose", "tree"]);
    /// assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
        }
    }

    /// Execute the CLI with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Build(cmd) => cmd.execute().await,
            Commands::Tree(cmd) => cmd.execute().await,
        }
    }
}
