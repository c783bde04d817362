//! Core types for layout-chain
//!
//! - [`file`] - [`FileRecord`], [`LayoutRef`] and the [`Files`] mapping every other module works on
//! - [`error`] - [`LayoutError`], [`ErrorContext`] and [`user_friendly_error`]

pub mod error;
pub mod file;

pub use error::{ErrorContext, LayoutError, LayoutResult, user_friendly_error};
pub use file::{FileRecord, Files, LayoutRef};

/// Extension of a layout name: everything after the last `.` of its final path segment.
///
/// Returns `None` for names without a dot (`"base"`) or ending in one (`"base."`).
/// A layout without an extension can never be rendered, because the extension is
/// how a transformer is chosen.
///
/// ```
/// use layout_chain::core::layout_extension;
///
/// assert_eq!(layout_extension("base.html"), Some("html"));
/// assert_eq!(layout_extension("partials/page.tera"), Some("tera"));
/// assert_eq!(layout_extension("base"), None);
/// ```
pub fn layout_extension(name: &str) -> Option<&str> {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}
