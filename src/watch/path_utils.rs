// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.
//!
//! Patterns are kept in `globset` syntax. Anything that is a real path
//! rather than user glob text (the root, entry files) goes through
//! [`escape_path`] first, so `/home/u/app[dev]` stays a literal.

use std::path::{Path, PathBuf};

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}'];

/// Glob text that matches exactly `path`.
pub fn escape_path(path: &Path) -> String {
    globset::escape(&to_slash(path))
}

/// Resolve a (possibly relative) pattern against `root`, producing a
/// forward-slash string suitable for `globset`.
///
/// Leading `./` is dropped so that `./src/**` and `src/**` resolve to the
/// same absolute pattern. Absolute patterns are taken as written.
pub fn resolve_pattern(root: &Path, pattern: &str) -> String {
    let mut trimmed = pattern;
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }

    let base = escape_path(root);
    if trimmed.is_empty() || trimmed == "." {
        return base;
    }
    if Path::new(trimmed).is_absolute() {
        return trimmed.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), trimmed)
}

/// The path a pattern names when it has no wildcards, with escapes undone.
pub fn literal_path(pattern: &str) -> Option<PathBuf> {
    unescape(pattern).map(PathBuf::from)
}

/// Longest leading run of literal path components.
///
/// `/app/src/**/*.js` -> `/app/src`, `/app/main.js` -> `/app/main.js`.
pub fn glob_base(resolved: &str) -> PathBuf {
    let mut base = Vec::new();
    for segment in resolved.split('/') {
        match unescape(segment) {
            Some(literal) => base.push(literal),
            None => break,
        }
    }

    let joined = base.join("/");
    if joined.is_empty() && resolved.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::from(joined)
    }
}

/// Convert a path into a string with forward slashes.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Undo `globset::escape`: a one-character class `[c]` is the literal `c`.
/// Returns `None` for any real wildcard.
fn unescape(pattern: &str) -> Option<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c == '[' {
            let inner = chars.next()?;
            if chars.next()? != ']' {
                return None;
            }
            out.push(inner);
        } else if GLOB_META.contains(&c) {
            return None;
        } else {
            out.push(c);
        }
    }
    Some(out)
}
