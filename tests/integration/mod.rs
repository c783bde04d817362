//! Integration test suite for layout-chain
//!
//! End-to-end tests that lay a site out on disk, run the layouts pass through
//! the library and through the `layout-chain` binary, and check the output.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: the layouts pass through the library API
//! - **cli**: the `build` and `tree` commands
//! - **config**: config file loading and command-line overrides

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod config;
mod pipeline;
