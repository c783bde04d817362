//! Test utilities for layout-chain
//!
//! Helpers for unit and integration tests:
//! - [`TestSite`] - a site laid out in a temporary directory
//! - [`SiteFixture`] - canned layout/content trees
//! - [`init_test_logging`] - one-time tracing setup honoring `RUST_LOG`
//!
//! # Example
//!
//! ```rust,no_run
//! use layout_chain::test_utils::{SiteFixture, TestSite};
//!
//! let site = TestSite::from_fixture(&SiteFixture::grandparent_chain()).unwrap();
//! assert!(site.file_exists("layouts/grandparent.html"));
//! ```

pub mod environment;
pub mod fixtures;

pub use environment::TestSite;
pub use fixtures::SiteFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, no subscriber is installed.
///
/// ```bash
/// RUST_LOG=layout_chain=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
