//! Layout location and content eligibility.
//!
//! The [`LayoutLocator`] answers two symmetric questions for one pass:
//!
//! 1. **Which records are layouts?** If the configured layout directory lies
//!    inside the site's source directory, the layouts are already in
//!    [`Site::files`]: every entry under that directory is taken and re-keyed by
//!    base name. Otherwise the directory is read independently from disk.
//! 2. **Which files are content?** A file is eligible when it matches the
//!    pattern, is not a layout, resolves to a layout name with an extension, has
//!    a UTF-8 payload, and a transformer exists for that extension. Anything
//!    else is skipped with an [`Ineligible`] reason and a `debug!` trace.
//!
//! Two layouts reducing to the same base name are rejected with
//! [`LayoutError::DuplicateLayout`] instead of letting iteration order decide.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::LayoutsOptions;
use crate::core::{FileRecord, Files, LayoutError, LayoutRef, LayoutResult, layout_extension};
use crate::site::Site;
use crate::transformer::TransformerRegistry;
use crate::utils::{base_name, is_under, relative_within};

/// Why a file was left out of the content set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligible {
    /// The file does not match the configured pattern.
    NotMatched,
    /// The file lives in the layout directory.
    InLayoutDirectory,
    /// Neither the file nor the configuration names a layout.
    NoLayout,
    /// The file opts out with `layout: false`.
    LayoutDisabled,
    /// The layout name has no extension to pick a transformer with.
    MissingExtension {
        /// The offending layout name
        layout: String,
    },
    /// The payload is not valid UTF-8.
    NotText,
    /// No transformer handles the layout's extension.
    NoTransformer {
        /// The unhandled extension
        extension: String,
    },
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMatched => write!(f, "does not match pattern"),
            Self::InLayoutDirectory => write!(f, "is a layout"),
            Self::NoLayout => write!(f, "no layout set"),
            Self::LayoutDisabled => write!(f, "layout disabled"),
            Self::MissingExtension {
                layout,
            } => write!(f, "layout '{layout}' has no extension"),
            Self::NotText => write!(f, "payload is not UTF-8 text"),
            Self::NoTransformer {
                extension,
            } => write!(f, "no transformer for '.{extension}'"),
        }
    }
}

/// Where the layout collection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutSource {
    /// Layouts are part of the site's files, under this `/`-separated prefix.
    InSource {
        /// Layout directory relative to the source directory
        prefix: String,
    },
    /// Layouts must be read from this directory (relative to the build root).
    External {
        /// Layout directory relative to the build root
        directory: PathBuf,
    },
}

/// The layouts of one pass, keyed by base name.
#[derive(Debug, Clone)]
pub struct LayoutCollection {
    /// Layout records keyed by base name.
    pub layouts: Files,
    /// Where they were found.
    pub source: LayoutSource,
    /// Base name → original key in the site's files (in-source layouts only).
    pub origins: BTreeMap<String, String>,
}

/// A content file selected for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleFile {
    /// Key in the site's files.
    pub name: String,
    /// Layout it renders with (explicit or default).
    pub layout: String,
}

/// Partition of the site's files into content and skipped files.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Files to render, in key order.
    pub eligible: Vec<EligibleFile>,
    /// Files left alone, with the reason.
    pub skipped: Vec<(String, Ineligible)>,
}

/// Finds layouts and eligible content for one pass.
pub struct LayoutLocator<'a> {
    options: &'a LayoutsOptions,
    registry: &'a TransformerRegistry,
}

impl<'a> LayoutLocator<'a> {
    /// Create a locator over validated options and a transformer registry.
    pub fn new(options: &'a LayoutsOptions, registry: &'a TransformerRegistry) -> Self {
        Self {
            options,
            registry,
        }
    }

    /// Decide whether the layout directory is inside the site's source directory.
    ///
    /// The directory is taken relative to the build root; it is in-source when it
    /// can be reached from the source directory without an upward step.
    pub fn layout_source(&self, site: &Site) -> LayoutSource {
        let directory = site.path(&self.options.directory);
        match relative_within(&site.source_path(), &directory) {
            Some(prefix) => LayoutSource::InSource {
                prefix,
            },
            None => LayoutSource::External {
                directory: self.options.directory.clone(),
            },
        }
    }

    /// Build the layout collection.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::DuplicateLayout`] if two layouts share a base name
    /// - [`LayoutError::FileSystemError`] if an external layout directory cannot be read
    pub async fn locate(&self, site: &Site) -> LayoutResult<LayoutCollection> {
        let source = self.layout_source(site);

        let (layouts, origins) = match &source {
            LayoutSource::InSource {
                prefix,
            } => {
                debug!("Layouts live in the source tree under '{}'", prefix);
                let entries = site
                    .files
                    .iter()
                    .filter(|(name, _)| is_under(name, prefix))
                    .map(|(name, record)| (name.clone(), record.clone()));
                key_by_base_name(entries)?
            }
            LayoutSource::External {
                directory,
            } => {
                let path = site.path(directory);
                if !tokio::fs::metadata(&path).await.map(|m| m.is_dir()).unwrap_or(false) {
                    warn!("Layout directory {} does not exist; no layouts available", path.display());
                    (Files::new(), BTreeMap::new())
                } else {
                    debug!("Reading layouts from {}", path.display());
                    let files = site.read_directory(directory).await.map_err(|e| {
                        LayoutError::FileSystemError {
                            operation: format!("read layout directory: {e:#}"),
                            path: path.display().to_string(),
                        }
                    })?;
                    let (layouts, _) = key_by_base_name(files.into_iter())?;
                    (layouts, BTreeMap::new())
                }
            }
        };

        info!("Found {} layouts", layouts.len());
        Ok(LayoutCollection {
            layouts,
            source,
            origins,
        })
    }

    /// Partition the site's files into eligible content and skipped files.
    pub fn select(&self, site: &Site) -> Selection {
        let source = self.layout_source(site);
        let mut selection = Selection::default();

        for (name, record) in &site.files {
            match self.check(name, record, &source) {
                Ok(layout) => {
                    debug!("'{}' will render with layout '{}'", name, layout);
                    selection.eligible.push(EligibleFile {
                        name: name.clone(),
                        layout,
                    });
                }
                Err(reason) => {
                    debug!("Skipping '{}': {}", name, reason);
                    selection.skipped.push((name.clone(), reason));
                }
            }
        }

        info!(
            "{} eligible files, {} skipped",
            selection.eligible.len(),
            selection.skipped.len()
        );
        selection
    }

    /// Check one file, returning the layout it renders with.
    pub fn check(&self, name: &str, record: &FileRecord, source: &LayoutSource) -> Result<String, Ineligible> {
        if let LayoutSource::InSource {
            prefix,
        } = source
        {
            if is_under(name, prefix) {
                return Err(Ineligible::InLayoutDirectory);
            }
        }

        if !self.options.pattern.matches(name) {
            return Err(Ineligible::NotMatched);
        }

        let layout = match record.resolved_layout(self.options.default.as_deref()) {
            Some(layout) => layout,
            None if record.layout == Some(LayoutRef::Disabled) => return Err(Ineligible::LayoutDisabled),
            None => return Err(Ineligible::NoLayout),
        };

        let Some(extension) = layout_extension(layout) else {
            return Err(Ineligible::MissingExtension {
                layout: layout.to_string(),
            });
        };

        if record.text().is_none() {
            return Err(Ineligible::NotText);
        }

        if self.registry.resolve(extension).is_none() {
            return Err(Ineligible::NoTransformer {
                extension: extension.to_string(),
            });
        }

        Ok(layout.to_string())
    }
}

/// Re-key records by base name, rejecting collisions.
fn key_by_base_name(
    entries: impl Iterator<Item = (String, FileRecord)>,
) -> LayoutResult<(Files, BTreeMap<String, String>)> {
    let mut layouts = Files::new();
    let mut origins: BTreeMap<String, String> = BTreeMap::new();

    for (path, record) in entries {
        let name = base_name(&path).to_string();
        if let Some(first) = origins.get(&name) {
            return Err(LayoutError::DuplicateLayout {
                name,
                first: first.clone(),
                second: path,
            });
        }
        origins.insert(name.clone(), path);
        layouts.insert(name, record);
    }

    Ok((layouts, origins))
}
