//! Constants shared across modules.

/// Default layout directory, relative to the build root.
pub const DEFAULT_LAYOUT_DIRECTORY: &str = "layouts";

/// Default source directory, relative to the build root.
pub const DEFAULT_SOURCE_DIRECTORY: &str = "src";

/// Default output directory, relative to the build root.
pub const DEFAULT_DESTINATION_DIRECTORY: &str = "build";

/// Context key under which a node's own payload is exposed to its layout.
pub const CONTENTS_KEY: &str = "contents";

/// Front-matter key naming a record's parent layout.
pub const LAYOUT_KEY: &str = "layout";

/// Minimum normalized Levenshtein similarity for "did you mean" layout suggestions.
pub const SUGGESTION_THRESHOLD: f64 = 0.7;
