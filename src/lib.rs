//! layout-chain - nested layouts for static-site builds
//!
//! A build pass that renders content files through layouts, where a layout may
//! itself extend another layout by naming a parent in its own front matter. The
//! whole inheritance forest is resolved and rendered before any content file is
//! touched, so every content file is rendered against a fully flattened layout.
//!
//! # Architecture Overview
//!
//! One pass runs these steps, in order:
//! - select the content files eligible for rendering
//! - locate the layout collection (inside the source tree or in its own directory)
//! - build the layout forest, rejecting cycles and dangling parents
//! - render the forest level by level, each level concurrently
//! - strip the `layout` property from every layout
//! - render each content file with its layout
//!
//! Any failure aborts the pass; content files are only mutated in the last step.
//!
//! # Core Modules
//!
//! ## Engine
//! - [`plugin`] - [`LayoutsPlugin`](plugin::LayoutsPlugin), the whole pass as one step
//! - [`locator`] - Layout collection and content eligibility
//! - [`resolver`] - The layout inheritance forest and cycle detection
//! - [`render`] - Context merging and levelized rendering
//! - [`transformer`] - Template engines keyed by layout extension
//!
//! ## Data and Configuration
//! - [`core`] - File records, error types and user-facing error formatting
//! - [`config`] - Options and the `layout-chain.toml` config file
//! - [`pattern`] - Ordered glob patterns with `!` negation
//! - [`markdown`] - YAML front-matter extraction
//! - [`site`] - Reading and writing a site on disk
//!
//! ## Supporting Modules
//! - [`cli`] - The `layout-chain` command-line interface
//! - [`constants`] - Default directories and context keys
//! - [`utils`] - `/`-separated path helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use layout_chain::config::LayoutsOptions;
//! use layout_chain::plugin::LayoutsPlugin;
//! use layout_chain::site::Site;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut site = Site::read(".", "src").await?;
//! let plugin = LayoutsPlugin::new(LayoutsOptions::new().with_pattern(["**/*.md"])?);
//! let summary = plugin.run(&mut site).await?;
//! println!("rendered {} files", summary.files_rendered);
//! site.write("build", None).await?;
//! # Ok(())
//! # }
//! ```

// Engine
pub mod locator;
pub mod plugin;
pub mod render;
pub mod resolver;
pub mod transformer;

// Data and configuration
pub mod config;
pub mod core;
pub mod markdown;
pub mod pattern;
pub mod site;

// Supporting modules
pub mod cli;
pub mod constants;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
