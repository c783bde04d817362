//! Front-matter extraction for site files.
//!
//! Files may start with a YAML block delimited by `---`. The block becomes the
//! record's metadata, except for the `layout` key which becomes the record's
//! [`LayoutRef`]. The remainder becomes the record's payload.
//!
//! ```markdown
//! ---
//! layout: post.html
//! title: Hello
//! ---
//! Body text
//! ```
//!
//! Malformed YAML is not fatal: the file is kept verbatim without metadata and a
//! warning is logged. Payloads that are not UTF-8 are passed through untouched.

use gray_matter::{Matter, engine::YAML};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::constants::LAYOUT_KEY;
use crate::core::{FileRecord, LayoutRef};

/// YAML front-matter parser producing [`FileRecord`]s.
pub struct FrontmatterParser {
    yaml_matter: Matter<YAML>,
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontmatterParser {
    /// Create a new front-matter parser.
    pub fn new() -> Self {
        Self {
            yaml_matter: Matter::new(),
        }
    }

    /// Build a record from raw file bytes.
    ///
    /// `name` is only used for diagnostics.
    pub fn parse(&self, name: &str, bytes: Vec<u8>) -> FileRecord {
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                trace!("'{}' is not UTF-8, keeping raw payload", name);
                return FileRecord::new(err.into_bytes());
            }
        };

        let parsed = match self.yaml_matter.parse::<Value>(&text) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("Unable to parse front matter of '{}': {}; using file without metadata", name, err);
                return FileRecord::new(text);
            }
        };

        let mut data = match parsed.data {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => Map::new(),
            Some(other) => {
                warn!("Front matter of '{}' is not a mapping ({}); ignoring it", name, other);
                Map::new()
            }
        };

        let layout = data.remove(LAYOUT_KEY).as_ref().and_then(LayoutRef::from_value);

        // The body starts on the line after the closing delimiter.
        let content = if !text.starts_with("---") {
            parsed.content
        } else {
            let body = parsed.content.as_str();
            body.strip_prefix("\r\n").or_else(|| body.strip_prefix('\n')).unwrap_or(body).to_string()
        };

        FileRecord {
            contents: content.into_bytes(),
            layout,
            data,
        }
    }
}
