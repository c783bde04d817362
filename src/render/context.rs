//! Render context assembly.
//!
//! A render context is one flat JSON object built from layers, later layers
//! overriding earlier ones key by key:
//!
//! 1. site-wide metadata
//! 2. the data of each layout in the chain, oldest ancestor first
//! 3. the data of the node being rendered
//! 4. `contents`, set to the node's current text
//!
//! Values are replaced, never deep-merged.

use serde_json::{Map, Value};

use crate::constants::CONTENTS_KEY;
use crate::core::{Files, LayoutError, LayoutResult};
use crate::resolver::suggest_layout;

/// Merge the context layers for one render.
pub fn merge_context(
    metadata: &Map<String, Value>,
    ancestors: &[&Map<String, Value>],
    own: &Map<String, Value>,
    contents: &str,
) -> Value {
    let mut context = metadata.clone();
    for layer in ancestors.iter().copied().chain(std::iter::once(own)) {
        for (key, value) in layer {
            context.insert(key.clone(), value.clone());
        }
    }
    context.insert(CONTENTS_KEY.to_string(), Value::String(contents.to_string()));
    Value::Object(context)
}

/// The chain of layouts a render with `layout` draws data from, oldest first.
///
/// The chain ends with `layout` itself. Parents are followed through each
/// layout's explicit `layout` property.
///
/// # Errors
///
/// - [`LayoutError::MissingLayout`] if any link names an unknown layout
/// - [`LayoutError::CircularDependency`] if a link revisits a layout
pub fn ancestor_chain<'a>(layout: &'a str, layouts: &'a Files, referenced_by: &str) -> LayoutResult<Vec<&'a str>> {
    let mut chain: Vec<&'a str> = Vec::new();
    let mut current = layout;
    let mut holder = referenced_by;

    loop {
        let Some(record) = layouts.get(current) else {
            return Err(LayoutError::MissingLayout {
                name: current.to_string(),
                referenced_by: holder.to_string(),
                suggestion: suggest_layout(current, layouts.keys()),
            });
        };
        if let Some(start) = chain.iter().position(|&name| name == current) {
            let mut names = chain[start..].to_vec();
            names.push(current);
            return Err(LayoutError::CircularDependency {
                layout: current.to_string(),
                chain: names.join(" → "),
            });
        }
        chain.push(current);

        match record.layout_name() {
            Some(parent) => {
                holder = current;
                current = parent;
            }
            None => break,
        }
    }

    chain.reverse();
    Ok(chain)
}
