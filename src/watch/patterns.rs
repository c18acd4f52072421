// src/watch/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::errors::{LiveResetError, Result};
use crate::watch::ignore::is_ignored_path;
use crate::watch::path_utils::{literal_path, resolve_pattern, to_slash};

/// What a single watcher observes: path patterns plus excluded patterns.
///
/// Patterns may be plain paths (files or directories) or globs such as
/// `src/**/*.js`. Relative entries are resolved against the watcher root.
///
/// ```toml
/// glob = ["src", "static/**/*.html"]
/// ignored = ["**/*.tmp"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchTarget {
    patterns: Vec<String>,
    ignored: Vec<String>,
}

impl WatchTarget {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            ignored: Vec::new(),
        }
    }

    pub fn with_ignored<I, S>(mut self, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(ignored.into_iter().map(Into::into));
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    /// A new target covering both `self` and the patterns of `other`.
    ///
    /// Exclusions stay those of `self`: widening a watcher adds paths, it
    /// does not change what the watcher was told to ignore.
    pub fn widened(&self, other: &WatchTarget) -> WatchTarget {
        let mut patterns = self.patterns.clone();
        for pat in &other.patterns {
            if !patterns.contains(pat) {
                patterns.push(pat.clone());
            }
        }
        WatchTarget {
            patterns,
            ignored: self.ignored.clone(),
        }
    }
}

/// Compiled form of a [`WatchTarget`], anchored at a root directory.
///
/// The watcher passes absolute event paths into [`WatchMatcher::matches`].
#[derive(Clone)]
pub struct WatchMatcher {
    root: PathBuf,
    target: WatchTarget,
    include: GlobSet,
    exclude: Option<GlobSet>,
}

impl fmt::Debug for WatchMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchMatcher")
            .field("root", &self.root)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl WatchMatcher {
    pub fn compile(root: impl Into<PathBuf>, target: &WatchTarget) -> Result<Self> {
        let root = root.into();
        let include = build_globset(&root, target.patterns())?;
        let exclude = if target.ignored().is_empty() {
            None
        } else {
            Some(build_globset(&root, target.ignored())?)
        };

        Ok(Self {
            root,
            target: target.clone(),
            include,
            exclude,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn target(&self) -> &WatchTarget {
        &self.target
    }

    /// Recompile with the patterns of `more` added.
    pub fn widen(&mut self, more: &WatchTarget) -> Result<()> {
        let widened = self.target.widened(more);
        *self = WatchMatcher::compile(self.root.clone(), &widened)?;
        Ok(())
    }

    /// Returns true if a change to `path` belongs to this target.
    ///
    /// The permanent classifier runs on the part of the path below the root,
    /// so a project that itself lives under a dot-directory still works.
    pub fn matches(&self, path: &Path) -> bool {
        let below_root = path.strip_prefix(&self.root).unwrap_or(path);
        if is_ignored_path(below_root) {
            return false;
        }

        let s = to_slash(path);
        if !self.include.is_match(&s) {
            return false;
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(&s) {
                return false;
            }
        }
        true
    }
}

/// Build a GlobSet from watch patterns resolved against `root`.
///
/// A pattern without metacharacters names a file or a directory; it also
/// matches everything below it so that directory targets behave recursively.
fn build_globset(root: &Path, patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let resolved = resolve_pattern(root, pat);
        add_glob(&mut builder, &resolved)?;
        if literal_path(&resolved).is_some() {
            let below = format!("{}/**", resolved.trim_end_matches('/'));
            add_glob(&mut builder, &below)?;
        }
    }
    builder
        .build()
        .map_err(|e| LiveResetError::PatternError(e.to_string()))
}

fn add_glob(builder: &mut GlobSetBuilder, pattern: &str) -> Result<()> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| LiveResetError::PatternError(format!("{pattern}: {e}")))?;
    builder.add(glob);
    Ok(())
}
