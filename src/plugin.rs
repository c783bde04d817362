//! The layouts pass as a single build-pipeline step.
//!
//! [`LayoutsPlugin::run`] performs, in order:
//!
//! 1. select eligible content files (fails with [`LayoutError::NoEligibleFiles`]
//!    before anything is rendered)
//! 2. locate the layout collection
//! 3. build the inheritance forest (cycles and dangling parents fail here)
//! 4. render the forest level by level
//! 5. strip the `layout` property from every layout, writing in-source layouts
//!    back into the site under their original paths
//! 6. render every eligible content file against the resolved layouts
//!
//! Any error aborts the pass. Content files are only touched in the last step,
//! so a failure before it leaves their payloads unchanged.

use serde_json::Value;
use tracing::{debug, info};

use crate::config::LayoutsOptions;
use crate::core::{LayoutError, LayoutResult};
use crate::locator::{Ineligible, LayoutCollection, LayoutLocator, LayoutSource};
use crate::render::{Renderer, strip_layout_refs};
use crate::resolver::{LayoutForest, build_forest};
use crate::site::Site;
use crate::transformer::TransformerRegistry;

/// What one pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Layouts found.
    pub layouts: usize,
    /// Layouts rendered into their parents.
    pub layouts_rendered: usize,
    /// Content files rendered.
    pub files_rendered: usize,
    /// Files left alone, with the reason.
    pub skipped: Vec<(String, Ineligible)>,
}

/// Hierarchical layouts as a build-pipeline step.
///
/// Owns its options and the transformer registry, so the extension → transformer
/// cache is scoped to the plugin instance.
#[derive(Debug)]
pub struct LayoutsPlugin {
    options: LayoutsOptions,
    registry: TransformerRegistry,
}

impl LayoutsPlugin {
    /// Create a plugin with the default transformers.
    pub fn new(options: LayoutsOptions) -> Self {
        Self::with_registry(options, TransformerRegistry::with_defaults())
    }

    /// Create a plugin with a custom transformer registry.
    pub fn with_registry(options: LayoutsOptions, registry: TransformerRegistry) -> Self {
        Self {
            options,
            registry,
        }
    }

    /// Create a plugin from a raw options value.
    ///
    /// # Errors
    ///
    /// Fails with [`LayoutError::InvalidPattern`] or [`LayoutError::ConfigError`]
    /// if the options are malformed.
    pub fn from_value(value: &Value) -> LayoutResult<Self> {
        Ok(Self::new(LayoutsOptions::from_value(value)?))
    }

    /// The validated options.
    pub fn options(&self) -> &LayoutsOptions {
        &self.options
    }

    /// The transformer registry.
    pub fn registry(&self) -> &TransformerRegistry {
        &self.registry
    }

    /// Locate the layouts of `site` and resolve their inheritance forest without rendering.
    pub async fn resolve(&self, site: &Site) -> LayoutResult<(LayoutCollection, LayoutForest)> {
        let collection = LayoutLocator::new(&self.options, &self.registry).locate(site).await?;
        let forest = build_forest(&collection.layouts)?;
        Ok((collection, forest))
    }

    /// Run the layouts pass over `site`, mutating its files in place.
    pub async fn run(&self, site: &mut Site) -> LayoutResult<RunSummary> {
        let locator = LayoutLocator::new(&self.options, &self.registry);

        let selection = locator.select(site);
        if selection.eligible.is_empty() {
            return Err(LayoutError::NoEligibleFiles);
        }

        let (mut collection, forest) = self.resolve(site).await?;

        let renderer = Renderer::new(&self.registry, self.options.engine_options.clone(), &site.metadata);
        let layouts_rendered = renderer.render_layouts(&mut collection.layouts, &forest).await?;
        let files_rendered = renderer.render_files(&mut site.files, &selection.eligible, &collection.layouts).await?;
        strip_layout_refs(&mut collection.layouts);

        if let LayoutSource::InSource {
            ..
        } = collection.source
        {
            for (name, record) in &collection.layouts {
                if let Some(origin) = collection.origins.get(name) {
                    debug!("Writing resolved layout '{}' back to '{}'", name, origin);
                    site.files.insert(origin.clone(), record.clone());
                }
            }
        }

        info!(
            "Layouts pass complete: {} layouts ({} rendered), {} files rendered, {} skipped",
            collection.layouts.len(),
            layouts_rendered,
            files_rendered,
            selection.skipped.len()
        );

        Ok(RunSummary {
            layouts: collection.layouts.len(),
            layouts_rendered,
            files_rendered,
            skipped: selection.skipped,
        })
    }
}
