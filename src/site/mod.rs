//! The host side of a build: where files come from and where they go.
//!
//! A [`Site`] holds what the layouts pass consumes from its host pipeline:
//!
//! - the build root and the source directory (relative to the root)
//! - site-wide metadata
//! - the mutable [`Files`] map read from the source directory
//!
//! It can also read an arbitrary directory into an independent [`Files`] map,
//! which is how layouts living outside the source directory are loaded.
//!
//! All disk access runs on Tokio's blocking pool.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::core::Files;
use crate::markdown::FrontmatterParser;
use crate::utils::{is_under, to_forward_slash};

/// Files plus the paths and metadata of one build.
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    source: PathBuf,
    /// Site-wide metadata, the lowest-precedence layer of every render context.
    pub metadata: Map<String, Value>,
    /// Files read from the source directory, keyed by `/`-separated relative path.
    pub files: Files,
}

impl Site {
    /// Create an empty site. `source` is interpreted relative to `root`.
    pub fn new(root: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source: source.into(),
            metadata: Map::new(),
            files: Files::new(),
        }
    }

    /// Builder: replace the file map.
    #[must_use]
    pub fn with_files(mut self, files: Files) -> Self {
        self.files = files;
        self
    }

    /// Builder: replace the site metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Read every file under `root/source` into a new site.
    pub async fn read(root: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Result<Self> {
        let mut site = Self::new(root, source);
        let source_dir = site.source_path();
        site.files = read_directory(&source_dir).await?;
        info!("Read {} files from {}", site.files.len(), source_dir.display());
        Ok(site)
    }

    /// The build root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (or root-relative) path of the source directory.
    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.source)
    }

    /// Resolve a path relative to the build root.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Run an independent read of `directory` (relative to the build root).
    ///
    /// The result does not touch [`Site::files`].
    pub async fn read_directory(&self, directory: impl AsRef<Path>) -> Result<Files> {
        read_directory(&self.path(directory)).await
    }

    /// Write every file to `destination` (relative to the build root), skipping
    /// files under the `/`-separated `exclude` directory. Returns the number written.
    pub async fn write(&self, destination: impl AsRef<Path>, exclude: Option<&str>) -> Result<usize> {
        let destination = self.path(destination);
        let mut written = 0;

        for (name, record) in &self.files {
            if exclude.is_some_and(|dir| is_under(name, dir)) {
                debug!("Not writing '{}': inside excluded directory", name);
                continue;
            }

            let target = destination.join(name);
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            tokio::fs::write(&target, &record.contents)
                .await
                .with_context(|| format!("Failed to write file: {}", target.display()))?;
            written += 1;
        }

        info!("Wrote {} files to {}", written, destination.display());
        Ok(written)
    }
}

/// Read all regular files below `dir`, parsing front matter.
///
/// Keys are `/`-separated paths relative to `dir`. A missing directory is an error.
pub async fn read_directory(dir: &Path) -> Result<Files> {
    let dir = dir.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<Files> {
        if !dir.is_dir() {
            anyhow::bail!("Directory not found: {}", dir.display());
        }

        let parser = FrontmatterParser::new();
        let mut files = Files::new();

        for entry in WalkDir::new(&dir).follow_links(false).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk directory: {}", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&dir).with_context(|| {
                format!("'{}' is not inside '{}'", entry.path().display(), dir.display())
            })?;
            let name = to_forward_slash(relative);
            let bytes = std::fs::read(entry.path())
                .with_context(|| format!("Failed to read file: {}", entry.path().display()))?;

            debug!("Read '{}' ({} bytes)", name, bytes.len());
            let record = parser.parse(&name, bytes);
            files.insert(name, record);
        }

        Ok(files)
    })
    .await
    .context("Directory read task failed to complete")?
}
