//! Glob pattern selection of content files.
//!
//! A [`PatternSet`] is an ordered list of glob patterns evaluated against
//! `/`-separated file names relative to the source root:
//!
//! - `*` matches within a single path component, `**` crosses components
//! - `?`, `[abc]` and `[a-z]` behave as usual
//! - a pattern prefixed with `!` removes previously selected matches
//!
//! Patterns are applied in order, so `["**/*.md", "!drafts/**"]` selects every
//! Markdown file except drafts. A set with no positive pattern starts from
//! "everything", which is also the behaviour of an empty set.
//!
//! # Examples
//!
//! ```rust
//! use layout_chain::pattern::PatternSet;
//!
//! # fn example() -> layout_chain::core::LayoutResult<()> {
//! let set = PatternSet::new(["**/*.md", "!drafts/**"])?;
//! assert!(set.matches("posts/hello.md"));
//! assert!(!set.matches("drafts/wip.md"));
//! assert!(!set.matches("style.css"));
//! # Ok(())
//! # }
//! ```

use glob::{MatchOptions, Pattern};
use tracing::trace;

use crate::core::{LayoutError, LayoutResult};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct Rule {
    pattern: Pattern,
    negated: bool,
}

/// Ordered set of include/exclude glob patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    rules: Vec<Rule>,
    original: Vec<String>,
}

impl PatternSet {
    /// Compile a list of glob patterns.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidPattern`] if any pattern has invalid glob syntax
    /// or is empty after stripping a leading `!`.
    pub fn new<I, S>(patterns: I) -> LayoutResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        let mut original = Vec::new();

        for raw in patterns {
            let raw = raw.as_ref();
            let (negated, body) = match raw.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, raw),
            };
            if body.is_empty() {
                return Err(LayoutError::InvalidPattern {
                    reason: format!("empty glob pattern '{raw}'"),
                });
            }
            let pattern = Pattern::new(body).map_err(|e| LayoutError::InvalidPattern {
                reason: format!("'{raw}': {e}"),
            })?;
            rules.push(Rule {
                pattern,
                negated,
            });
            original.push(raw.to_string());
        }

        Ok(Self {
            rules,
            original,
        })
    }

    /// A set that selects every file.
    pub fn everything() -> Self {
        Self::default()
    }

    /// Whether `path` (a `/`-separated relative name) is selected.
    pub fn matches(&self, path: &str) -> bool {
        let mut selected = !self.rules.iter().any(|rule| !rule.negated);

        for rule in &self.rules {
            if rule.pattern.matches_with(path, MATCH_OPTIONS) {
                selected = !rule.negated;
            }
        }

        trace!("pattern {:?} {} '{}'", self.original, if selected { "selects" } else { "skips" }, path);
        selected
    }

    /// The patterns as originally written.
    pub fn patterns(&self) -> &[String] {
        &self.original
    }
}
