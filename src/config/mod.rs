//! Configuration for the layouts pass.
//!
//! Options can be built programmatically or loaded from a config file
//! (`layout-chain.toml`, or a `.yaml`/`.yml` equivalent):
//!
//! ```toml
//! [layouts]
//! pattern = ["**/*.md", "!drafts/**"]   # string or list of strings
//! directory = "layouts"                 # relative to the build root
//! default = "page.html"                 # used when a file names no layout
//!
//! [layouts.engineOptions]               # forwarded verbatim to every render
//! autoescape = false
//!
//! [metadata]                            # site-wide data, lowest merge precedence
//! site_name = "Example"
//! ```
//!
//! The `[layouts]` table is kept as an untyped value and validated by
//! [`LayoutsOptions::from_value`], so that a `pattern` of the wrong type is
//! reported as [`LayoutError::InvalidPattern`] rather than a generic parse error.

mod parser;

pub use parser::parse_config;

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::constants::DEFAULT_LAYOUT_DIRECTORY;
use crate::core::{LayoutError, LayoutResult};
use crate::pattern::PatternSet;

/// Default config file name looked up in the build root.
pub const CONFIG_FILE_NAME: &str = "layout-chain.toml";

/// On-disk configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Raw `[layouts]` table; see [`LayoutsOptions::from_value`].
    #[serde(default)]
    pub layouts: Option<Value>,
    /// Site-wide metadata merged under every render context.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ConfigFile {
    /// Build validated options from the `[layouts]` table (defaults when absent).
    pub fn layouts_options(&self) -> LayoutResult<LayoutsOptions> {
        match &self.layouts {
            Some(value) => LayoutsOptions::from_value(value),
            None => Ok(LayoutsOptions::default()),
        }
    }
}

/// Validated options for one layouts pass.
#[derive(Debug, Clone)]
pub struct LayoutsOptions {
    /// Selection of candidate content files.
    pub pattern: PatternSet,
    /// Layout directory relative to the build root.
    pub directory: PathBuf,
    /// Layout used when a content file names none.
    pub default: Option<String>,
    /// Opaque options forwarded to every transformer call.
    pub engine_options: Value,
}

impl Default for LayoutsOptions {
    fn default() -> Self {
        Self {
            pattern: PatternSet::everything(),
            directory: PathBuf::from(DEFAULT_LAYOUT_DIRECTORY),
            default: None,
            engine_options: Value::Object(Map::new()),
        }
    }
}

impl LayoutsOptions {
    /// Create options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate options from an untyped value.
    ///
    /// Accepts `engineOptions` and `engine_options` as the same key. `null` yields defaults.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidPattern`] if `pattern` is not a string or list of strings,
    ///   or contains invalid glob syntax
    /// - [`LayoutError::ConfigError`] if the value is not a table or another key has the wrong type
    pub fn from_value(value: &Value) -> LayoutResult<Self> {
        let table = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(table) => table,
            other => {
                return Err(LayoutError::ConfigError {
                    message: format!("layouts options must be a table, found {}", type_name(other)),
                });
            }
        };

        let mut options = Self::default();

        match table.get("pattern") {
            None | Some(Value::Null) => {}
            Some(Value::String(pattern)) => options.pattern = PatternSet::new([pattern])?,
            Some(Value::Array(items)) => {
                let patterns = items
                    .iter()
                    .map(|item| {
                        item.as_str().ok_or_else(|| LayoutError::InvalidPattern {
                            reason: format!(
                                "expected a list of strings, found an element of type {}",
                                type_name(item)
                            ),
                        })
                    })
                    .collect::<LayoutResult<Vec<_>>>()?;
                options.pattern = PatternSet::new(patterns)?;
            }
            Some(other) => {
                return Err(LayoutError::InvalidPattern {
                    reason: format!("expected a string or a list of strings, found {}", type_name(other)),
                });
            }
        }

        match table.get("directory") {
            None | Some(Value::Null) => {}
            Some(Value::String(directory)) => options.directory = PathBuf::from(directory),
            Some(other) => {
                return Err(LayoutError::ConfigError {
                    message: format!("`directory` must be a string, found {}", type_name(other)),
                });
            }
        }

        match table.get("default") {
            None | Some(Value::Null) => {}
            Some(Value::String(default)) => options.default = Some(default.clone()),
            Some(other) => {
                return Err(LayoutError::ConfigError {
                    message: format!("`default` must be a string, found {}", type_name(other)),
                });
            }
        }

        if let Some(engine_options) = table.get("engineOptions").or_else(|| table.get("engine_options")) {
            options.engine_options = engine_options.clone();
        }

        Ok(options)
    }

    /// Builder: replace the selection patterns.
    pub fn with_pattern<I, S>(mut self, patterns: I) -> LayoutResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pattern = PatternSet::new(patterns)?;
        Ok(self)
    }

    /// Builder: set the layout directory.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Builder: set the default layout.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Builder: set the engine options.
    #[must_use]
    pub fn with_engine_options(mut self, engine_options: Value) -> Self {
        self.engine_options = engine_options;
        self
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}
