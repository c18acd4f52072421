// src/watch/ignore.rs

//! Permanent exclusion filter applied to every watcher.
//!
//! A path is ignored when any of its components is a dependency directory
//! (vendored packages) or starts with a dot (hidden files and config
//! directories such as `.git` or `.cache`).

use std::path::{Component, Path};

/// Directory names whose whole subtree is third-party code.
pub const DEPENDENCY_DIRS: &[&str] = &["node_modules", "bower_components", "jspm_packages", "vendor"];

/// Returns true if `path` lies inside a dependency directory or has a
/// dot-prefixed segment anywhere along it.
///
/// `.` and `..` are path navigation, not hidden entries, and never count.
pub fn is_ignored_path(path: &Path) -> bool {
    path.components().any(|component| match component {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            is_hidden_name(&name) || DEPENDENCY_DIRS.contains(&name.as_ref())
        }
        _ => false,
    })
}

/// String convenience wrapper around [`is_ignored_path`].
///
/// Both `/` and `\` are accepted as separators.
pub fn is_ignored(path: &str) -> bool {
    path.split(['/', '\\'])
        .any(|segment| is_hidden_name(segment) || DEPENDENCY_DIRS.contains(&segment))
}

fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}
