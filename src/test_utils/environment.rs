//! A site laid out in a temporary directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::SiteFixture;

/// Temporary build root; removed when dropped.
pub struct TestSite {
    pub temp_dir: TempDir,
}

impl TestSite {
    /// Create an empty build root.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Create a build root populated from `fixture`.
    pub fn from_fixture(fixture: &SiteFixture) -> Result<Self> {
        let site = Self::new()?;
        for (path, content) in &fixture.files {
            site.create_file(path, content)?;
        }
        Ok(site)
    }

    /// The build root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the build root, creating parent directories.
    pub fn create_file(&self, path: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&full_path, content)
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;
        Ok(full_path)
    }

    /// Read a file relative to the build root.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path).with_context(|| format!("Failed to read file: {}", full_path.display()))
    }

    /// Whether a file exists relative to the build root.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.root().join(path).exists()
    }
}
