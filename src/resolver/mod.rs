//! Layout inheritance resolution.
//!
//! Layouts extend other layouts by naming a parent in their own `layout`
//! property. This module turns a flat layout collection into a
//! [`LayoutForest`], rejecting cycles and references to layouts that do not
//! exist, and offers "did you mean" suggestions for the latter.

pub mod forest;

pub use forest::{LayoutForest, build_forest};

use crate::constants::SUGGESTION_THRESHOLD;

/// Closest known layout name to `name`, if any is similar enough.
///
/// Similarity is the normalized Levenshtein distance; candidates below
/// [`SUGGESTION_THRESHOLD`] are never suggested.
///
/// ```
/// use layout_chain::resolver::suggest_layout;
///
/// let known = ["base.html", "post.html"];
/// assert_eq!(suggest_layout("bse.html", known.iter()), Some("base.html".to_string()));
/// assert_eq!(suggest_layout("zzz", known.iter()), None);
/// ```
pub fn suggest_layout<I, S>(name: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .map(|candidate| {
            let score = strsim::normalized_levenshtein(name, candidate.as_ref());
            (score, candidate.as_ref().to_string())
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate)
}
