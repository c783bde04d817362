//! Path utilities.
//!
//! File names inside a [`Files`](crate::core::Files) map are always
//! `/`-separated and relative, on every platform. These helpers convert between
//! that form and native paths without touching the file system, so they work for
//! directories that do not exist yet.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and fold `dir/..` pairs.
///
/// Leading `..` components of a relative path are kept, since there is nothing to
/// fold them into.
///
/// ```
/// use layout_chain::utils::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
/// assert_eq!(normalize_path(Path::new("../a/..")), PathBuf::from(".."));
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Render a relative path with `/` separators.
pub fn to_forward_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `path` relative to `base`, if `path` lies at or below `base`.
///
/// Both paths are normalized first. Returns `None` when reaching `path` from
/// `base` would need an upward (`..`) step. `Some("")` means the two are equal.
///
/// ```
/// use layout_chain::utils::relative_within;
/// use std::path::Path;
///
/// assert_eq!(relative_within(Path::new("site/src"), Path::new("site/src/layouts")).as_deref(), Some("layouts"));
/// assert_eq!(relative_within(Path::new("site/src"), Path::new("site/layouts")), None);
/// ```
pub fn relative_within(base: &Path, path: &Path) -> Option<String> {
    let base = normalize_path(base);
    let path = normalize_path(path);
    path.strip_prefix(&base).ok().map(to_forward_slash)
}

/// Whether a `/`-separated file name lies inside the `/`-separated directory `dir`.
///
/// An empty `dir` contains everything.
pub fn is_under(name: &str, dir: &str) -> bool {
    dir.is_empty() || name.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
}

/// Last `/`-separated segment of a file name.
pub fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
