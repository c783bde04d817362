//! Transformer resolution: from a layout extension to a render function.
//!
//! A [`Transformer`] is an external template engine that turns
//! `(template, engine options, context)` into output text. The
//! [`TransformerRegistry`] maps file extensions to [`RenderHandle`]s:
//!
//! - the first registered transformer whose [`Transformer::input_formats`]
//!   contains the extension wins
//! - successful lookups are cached per extension; the cache is append-only and
//!   safe under concurrent lookups
//! - an unknown extension yields `None`, never an error; callers decide whether
//!   that means "skip this file" or "fail the pass"
//!
//! The registry is an ordinary value owned by whoever runs the pass (usually
//! [`crate::plugin::LayoutsPlugin`]), so two passes never share hidden state.
//!
//! # Examples
//!
//! ```rust
//! use layout_chain::transformer::TransformerRegistry;
//!
//! let registry = TransformerRegistry::with_defaults();
//! assert!(registry.resolve("html").is_some());
//! assert!(registry.resolve(".NJK").is_some());
//! assert!(registry.resolve("hbs").is_none());
//! ```

pub mod tera_engine;

pub use tera_engine::TeraTransformer;

use anyhow::{Context, Result};
use dashmap::DashMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A template engine.
///
/// Implementations must be thread-safe: renders of independent files run
/// concurrently on the blocking thread pool.
pub trait Transformer: Send + Sync {
    /// Human-readable engine name, used in logs.
    fn name(&self) -> &str;

    /// Extensions (without the dot, lowercase) this engine accepts.
    fn input_formats(&self) -> Vec<String>;

    /// Render `template` with `context`.
    ///
    /// `options` are the pass-wide engine options, forwarded verbatim.
    fn render(&self, template: &str, options: &Value, context: &Value) -> Result<String>;
}

/// Cheap, cloneable handle to the transformer chosen for one extension.
#[derive(Clone)]
pub struct RenderHandle {
    extension: String,
    transformer: Arc<dyn Transformer>,
}

impl RenderHandle {
    /// Name of the underlying engine.
    pub fn name(&self) -> &str {
        self.transformer.name()
    }

    /// The extension this handle was resolved for.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Render on the blocking pool so template execution never stalls the runtime.
    pub async fn render(&self, template: String, options: Arc<Value>, context: Value) -> Result<String> {
        let transformer = Arc::clone(&self.transformer);
        tokio::task::spawn_blocking(move || transformer.render(&template, &options, &context))
            .await
            .context("Render task failed to complete")?
    }
}

impl fmt::Debug for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHandle")
            .field("extension", &self.extension)
            .field("transformer", &self.transformer.name())
            .finish()
    }
}

/// Registered transformers plus the extension → handle cache.
#[derive(Default)]
pub struct TransformerRegistry {
    transformers: Vec<Arc<dyn Transformer>>,
    cache: DashMap<String, RenderHandle>,
}

impl TransformerRegistry {
    /// An empty registry; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in [`TeraTransformer`].
    pub fn with_defaults() -> Self {
        Self::new().with_transformer(TeraTransformer::new())
    }

    /// Builder: append a transformer. Earlier registrations take precedence.
    #[must_use]
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.register(transformer);
        self
    }

    /// Append a transformer. Earlier registrations take precedence.
    pub fn register(&mut self, transformer: impl Transformer + 'static) {
        debug!(
            "Registering transformer '{}' for {:?}",
            transformer.name(),
            transformer.input_formats()
        );
        self.transformers.push(Arc::new(transformer));
    }

    /// Find the handle for `extension` (leading dot and case are ignored).
    pub fn resolve(&self, extension: &str) -> Option<RenderHandle> {
        let key = extension.trim_start_matches('.').to_ascii_lowercase();
        if key.is_empty() {
            return None;
        }

        if let Some(handle) = self.cache.get(&key) {
            trace!("Transformer cache hit for '{}'", key);
            return Some(handle.value().clone());
        }

        let transformer = self
            .transformers
            .iter()
            .find(|t| t.input_formats().iter().any(|format| format.eq_ignore_ascii_case(&key)))?;

        let handle = RenderHandle {
            extension: key.clone(),
            transformer: Arc::clone(transformer),
        };
        // Another task may have raced us here; both computed the same handle.
        let handle = self.cache.entry(key).or_insert(handle).value().clone();
        debug!("Resolved '{}' to transformer '{}'", handle.extension(), handle.name());
        Some(handle)
    }

    /// Number of registered transformers.
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    /// Whether no transformer is registered.
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Number of extensions resolved so far.
    pub fn cached_extensions(&self) -> usize {
        self.cache.len()
    }
}

impl fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerRegistry")
            .field("transformers", &self.transformers.iter().map(|t| t.name().to_string()).collect::<Vec<_>>())
            .field("cached_extensions", &self.cache.len())
            .finish()
    }
}
