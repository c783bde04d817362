//! File records shared by the host site, the layout collection and the renderer.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Mapping from file name (a `/`-separated relative path or a base name) to its record.
///
/// A `BTreeMap` keeps iteration deterministic, which makes traversal order,
/// logs and error messages reproducible across runs.
pub type Files = BTreeMap<String, FileRecord>;

/// Reference from a record to its parent layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutRef {
    /// Render with the named layout (e.g. `base.html`).
    Named(String),
    /// Explicitly opted out (`layout: false`); the configured default does not apply.
    Disabled,
}

impl LayoutRef {
    /// Interpret a front-matter value as a layout reference.
    ///
    /// Strings become [`LayoutRef::Named`], `false` becomes [`LayoutRef::Disabled`],
    /// anything else (including `null` and `true`) means "not set".
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::Named(name.clone())),
            Value::Bool(false) => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// One unit of content or one layout.
///
/// The record carries no traversal state: visit markers and child lists live in
/// [`crate::resolver::LayoutForest`] for the duration of a single pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileRecord {
    /// Raw payload. Only UTF-8 payloads are eligible for rendering.
    pub contents: Vec<u8>,
    /// Optional reference to the parent layout.
    pub layout: Option<LayoutRef>,
    /// Front-matter metadata merged into the render context.
    pub data: Map<String, Value>,
}

impl FileRecord {
    /// Create a record with the given payload and no layout or data.
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: contents.into(),
            ..Self::default()
        }
    }

    /// Builder: set a named layout reference.
    #[must_use]
    pub fn with_layout(mut self, name: impl Into<String>) -> Self {
        self.layout = Some(LayoutRef::Named(name.into()));
        self
    }

    /// Builder: disable layouts for this record.
    #[must_use]
    pub fn without_layout(mut self) -> Self {
        self.layout = Some(LayoutRef::Disabled);
        self
    }

    /// Builder: insert one metadata entry.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// The payload as text, if it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }

    /// The explicitly named, non-empty parent layout.
    ///
    /// Layout records only ever use this; the configured default applies to
    /// content files alone.
    pub fn layout_name(&self) -> Option<&str> {
        match &self.layout {
            Some(LayoutRef::Named(name)) if !name.is_empty() => Some(name),
            _ => None,
        }
    }

    /// The layout this record renders with, given the configured default.
    ///
    /// An explicit name wins, an explicit [`LayoutRef::Disabled`] short-circuits to
    /// `None`, and otherwise the default (if non-empty) applies.
    pub fn resolved_layout<'a>(&'a self, default: Option<&'a str>) -> Option<&'a str> {
        match &self.layout {
            Some(LayoutRef::Disabled) => None,
            Some(LayoutRef::Named(name)) if !name.is_empty() => Some(name),
            _ => default.filter(|name| !name.is_empty()),
        }
    }
}
