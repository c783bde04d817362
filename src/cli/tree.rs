//! Display the layout inheritance forest without rendering anything.
//!
//! ```bash
//! layout-chain tree
//! layout-chain tree --directory src/layouts
//! layout-chain tree --format json
//! ```
//!
//! Cycles and references to missing layouts are reported as errors, exactly
//! as `build` would report them.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use super::common::SiteArgs;
use crate::plugin::LayoutsPlugin;

/// Command to display the layout forest.
#[derive(Args, Debug)]
pub struct TreeCommand {
    #[command(flatten)]
    site: SiteArgs,

    /// Output format (tree, json)
    ///
    /// `json` prints the render levels: roots first, then each level of children.
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,
}

impl TreeCommand {
    /// Execute the tree command.
    pub async fn execute(self) -> Result<()> {
        if !matches!(self.format.as_str(), "tree" | "json") {
            bail!("Invalid format '{}'. Valid formats are: tree, json", self.format);
        }

        let config = self.site.load_config()?;
        let options = self.site.options(&config)?;
        let site = self.site.read_site(&config).await?;

        let plugin = LayoutsPlugin::new(options);
        let (_, forest) = plugin.resolve(&site).await?;

        if self.format == "json" {
            println!("{}", serde_json::to_string_pretty(&forest.levels())?);
            return Ok(());
        }

        if forest.is_empty() {
            println!("No layouts found.");
            return Ok(());
        }

        println!("{}", plugin.options().directory.display().to_string().cyan().bold());
        print!("{}", forest.to_tree_string());
        println!();
        println!("{} layouts, {} roots", forest.len(), forest.roots().len());

        Ok(())
    }
}
