//! Built-in Tera transformer.
//!
//! Renders layouts with [Tera](https://keats.github.io/tera/). A fresh one-off
//! template is compiled per render; layouts are small and each renders once per
//! pass, so there is nothing worth caching.
//!
//! Engine options understood:
//!
//! | key          | type | default | effect                                 |
//! |--------------|------|---------|----------------------------------------|
//! | `autoescape` | bool | `false` | HTML-escape every `{{ }}` expression   |
//!
//! With autoescaping on, embed the child payload with `{{ contents | safe }}`.

use anyhow::{Result, anyhow};
use serde_json::Value;
use tera::{Context as TeraContext, Tera};

use super::Transformer;

/// Extensions handled by [`TeraTransformer::new`].
pub const DEFAULT_TERA_FORMATS: &[&str] = &["tera", "html", "htm", "j2", "jinja", "njk"];

/// Tera-backed [`Transformer`].
#[derive(Debug, Clone)]
pub struct TeraTransformer {
    formats: Vec<String>,
}

impl Default for TeraTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl TeraTransformer {
    /// Handle the [`DEFAULT_TERA_FORMATS`].
    pub fn new() -> Self {
        Self::with_formats(DEFAULT_TERA_FORMATS.iter().copied())
    }

    /// Handle exactly the given extensions.
    pub fn with_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            formats: formats
                .into_iter()
                .map(|f| f.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Flatten a Tera error chain into one readable message.
    ///
    /// Tera names one-off templates `__tera_one_off`; that internal name is
    /// replaced so users see "template" instead.
    pub fn format_tera_error(error: &tera::Error) -> String {
        use std::error::Error;

        let mut all_messages = vec![error.to_string()];
        let mut current_error: Option<&dyn Error> = error.source();
        while let Some(err) = current_error {
            all_messages.push(err.to_string());
            current_error = err.source();
        }

        let messages: Vec<String> = all_messages
            .into_iter()
            .map(|msg| {
                msg.replace("while rendering '__tera_one_off'", "")
                    .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                    .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                    .replace("'__tera_one_off'", "template")
                    .trim()
                    .to_string()
            })
            .filter(|msg| {
                !msg.is_empty() && msg != "Template rendering failed" && msg != "Template syntax error"
            })
            .collect();

        if messages.is_empty() {
            "Template syntax error".to_string()
        } else {
            messages.join(" → ")
        }
    }
}

impl Transformer for TeraTransformer {
    fn name(&self) -> &str {
        "tera"
    }

    fn input_formats(&self) -> Vec<String> {
        self.formats.clone()
    }

    fn render(&self, template: &str, options: &Value, context: &Value) -> Result<String> {
        let autoescape = options.get("autoescape").and_then(Value::as_bool).unwrap_or(false);

        let context = TeraContext::from_value(context.clone())
            .map_err(|e| anyhow!("Invalid render context: {}", Self::format_tera_error(&e)))?;

        tracing::trace!("Rendering {} byte template with tera (autoescape={})", template.len(), autoescape);

        Tera::one_off(template, &context, autoescape).map_err(|e| anyhow!(Self::format_tera_error(&e)))
    }
}
