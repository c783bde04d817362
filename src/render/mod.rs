//! Ordered rendering of layouts and content.
//!
//! Rendering one node means taking the text of the layout it names as a
//! template and executing it with a context built by [`merge_context`]: site
//! metadata, the data of every layout in the chain, the node's own data, and
//! `contents` set to the node's current text.
//!
//! Layouts are rendered level by level down the [`LayoutForest`]. All renders of
//! a level read a snapshot of the layout collection taken before the level
//! starts, run concurrently, and are written back only once every one of them
//! has finished. A layout is therefore never embedded into a child before its
//! own ancestors have been embedded into it. Roots have nothing to extend and
//! keep their text as-is.
//!
//! Content files are rendered after the whole forest, against the fully
//! resolved layouts.

pub mod context;

pub use context::{ancestor_chain, merge_context};

use futures::future::try_join_all;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{FileRecord, Files, LayoutError, LayoutResult, layout_extension};
use crate::locator::EligibleFile;
use crate::resolver::LayoutForest;
use crate::transformer::{RenderHandle, TransformerRegistry};

/// One prepared render: everything needed to run it without borrowing the collection.
struct RenderJob {
    name: String,
    layout: String,
    handle: RenderHandle,
    template: String,
    context: Value,
}

/// Renders layouts and content files with the transformers of a registry.
pub struct Renderer<'a> {
    registry: &'a TransformerRegistry,
    engine_options: Arc<Value>,
    metadata: &'a Map<String, Value>,
}

impl<'a> Renderer<'a> {
    /// Create a renderer.
    ///
    /// `engine_options` is passed verbatim to every transformer call.
    pub fn new(registry: &'a TransformerRegistry, engine_options: Value, metadata: &'a Map<String, Value>) -> Self {
        Self {
            registry,
            engine_options: Arc::new(engine_options),
            metadata,
        }
    }

    /// Render every non-root layout of `forest` into its parent, level by level.
    ///
    /// Returns the number of layouts rendered.
    pub async fn render_layouts(&self, layouts: &mut Files, forest: &LayoutForest) -> LayoutResult<usize> {
        let mut rendered = 0;

        for (depth, level) in forest.levels().into_iter().enumerate().skip(1) {
            let jobs = level
                .iter()
                .map(|name| {
                    let record = layouts.get(name).ok_or_else(|| LayoutError::MissingLayout {
                        name: name.clone(),
                        referenced_by: name.clone(),
                        suggestion: None,
                    })?;
                    let parent = forest.parent(name).unwrap_or_default();
                    self.prepare(name, record, parent, layouts)
                })
                .collect::<LayoutResult<Vec<_>>>()?;

            debug!("Rendering {} layouts at depth {}", jobs.len(), depth);
            for (name, output) in self.run(jobs).await? {
                if let Some(record) = layouts.get_mut(&name) {
                    record.contents = output.into_bytes();
                }
                rendered += 1;
            }
        }

        info!("Rendered {} layouts", rendered);
        Ok(rendered)
    }

    /// Render content files against fully resolved `layouts`, in place.
    ///
    /// `layouts` must still carry their `layout` references: the context of a
    /// file includes the data of every ancestor of its layout. Call
    /// [`strip_layout_refs`] afterwards.
    ///
    /// Returns the number of files rendered.
    pub async fn render_files(&self, files: &mut Files, eligible: &[EligibleFile], layouts: &Files) -> LayoutResult<usize> {
        let jobs = eligible
            .iter()
            .filter_map(|file| files.get(&file.name).map(|record| (file, record)))
            .map(|(file, record)| self.prepare(&file.name, record, &file.layout, layouts))
            .collect::<LayoutResult<Vec<_>>>()?;

        let mut rendered = 0;
        for (name, output) in self.run(jobs).await? {
            if let Some(record) = files.get_mut(&name) {
                record.contents = output.into_bytes();
            }
            rendered += 1;
        }

        info!("Rendered {} files", rendered);
        Ok(rendered)
    }

    fn prepare(&self, name: &str, record: &FileRecord, layout: &str, layouts: &Files) -> LayoutResult<RenderJob> {
        let chain = ancestor_chain(layout, layouts, name)?;

        let template = layouts
            .get(layout)
            .and_then(FileRecord::text)
            .ok_or_else(|| LayoutError::RenderFailed {
                file: name.to_string(),
                layout: layout.to_string(),
                reason: "layout is not valid UTF-8 text".to_string(),
            })?
            .to_string();

        let extension = layout_extension(layout).unwrap_or_default();
        let handle = self.registry.resolve(extension).ok_or_else(|| LayoutError::NoTransformer {
            extension: extension.to_string(),
            layout: layout.to_string(),
        })?;

        let contents = record.text().ok_or_else(|| LayoutError::RenderFailed {
            file: name.to_string(),
            layout: layout.to_string(),
            reason: "payload is not valid UTF-8 text".to_string(),
        })?;

        let ancestors: Vec<&Map<String, Value>> =
            chain.iter().filter_map(|ancestor| layouts.get(*ancestor)).map(|r| &r.data).collect();
        let context = merge_context(self.metadata, &ancestors, &record.data, contents);

        Ok(RenderJob {
            name: name.to_string(),
            layout: layout.to_string(),
            handle,
            template,
            context,
        })
    }

    /// Run a batch of independent renders concurrently.
    async fn run(&self, jobs: Vec<RenderJob>) -> LayoutResult<Vec<(String, String)>> {
        try_join_all(jobs.into_iter().map(|job| {
            let options = Arc::clone(&self.engine_options);
            async move {
                debug!("Rendering '{}' with '{}' ({})", job.name, job.layout, job.handle.name());
                let output = job.handle.render(job.template, options, job.context).await.map_err(|e| {
                    LayoutError::RenderFailed {
                        file: job.name.clone(),
                        layout: job.layout.clone(),
                        reason: format!("{e:#}"),
                    }
                })?;
                Ok::<_, LayoutError>((job.name, output))
            }
        }))
        .await
    }
}

/// Clear the `layout` property of every layout record.
pub fn strip_layout_refs(layouts: &mut Files) {
    for record in layouts.values_mut() {
        record.layout = None;
    }
}
