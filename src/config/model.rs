// src/config/model.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::types::HardResetMethod;
use crate::watch::WatchTarget;

/// Default polling interval when `use_polling = true`.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Raw reset options, as written in `LiveReset.toml` or built in code.
///
/// ```toml
/// glob = ["src", "static/**/*.html"]
/// electron = "node_modules/.bin/electron"
/// main_file = "main.js"
/// electron_argv = ["--inspect"]
/// app_argv = ["--dev"]
/// hard_reset_method = "exit"
/// force_hard_reset = false
/// ```
///
/// Every key is optional here; [`ResetConfiguration`] is the validated form.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResetOptions {
    /// Path(s) or glob pattern(s) to watch. A single string is accepted.
    #[serde(deserialize_with = "one_or_many")]
    pub glob: Vec<String>,

    /// Arguments the application was launched with. Carried along but not
    /// interpreted.
    pub argv: Vec<String>,

    /// Arguments appended after the entry file(s) on relaunch.
    pub app_argv: Vec<String>,

    /// Arguments placed before the entry file(s) on relaunch.
    pub electron_argv: Vec<String>,

    /// Executable used for the hard reset. Absent or missing on disk
    /// disables hard resets.
    pub electron: Option<PathBuf>,

    /// Entry file(s). Excluded from the soft watch, included in the hard
    /// watch and passed to the relaunch. A single string is accepted.
    #[serde(deserialize_with = "one_or_many")]
    pub main_file: Vec<PathBuf>,

    /// `"exit"` for immediate termination, anything else for a graceful quit.
    pub hard_reset_method: HardResetMethod,

    /// Hard reset on any watched change, and no soft resets at all.
    pub force_hard_reset: bool,

    /// Extra patterns excluded from both watchers.
    pub ignored: Vec<String>,

    /// Base directory for relative globs and entry files. Defaults to the
    /// current working directory.
    pub root: Option<PathBuf>,

    /// Use a polling watcher instead of native OS notifications.
    pub use_polling: bool,

    pub poll_interval_ms: u64,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            glob: Vec::new(),
            argv: Vec::new(),
            app_argv: Vec::new(),
            electron_argv: Vec::new(),
            electron: None,
            main_file: Vec::new(),
            hard_reset_method: HardResetMethod::default(),
            force_hard_reset: false,
            ignored: Vec::new(),
            root: None,
            use_polling: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(v) => vec![v],
        OneOrMany::Many(v) => v,
    })
}

/// Validated, immutable reset configuration.
///
/// Construct with `ResetConfiguration::try_from(options)`. Entry files are
/// absolute (resolved against `root`).
#[derive(Debug, Clone)]
pub struct ResetConfiguration {
    root: PathBuf,
    glob: Vec<String>,
    ignored: Vec<String>,
    main_files: Vec<PathBuf>,
    electron: Option<PathBuf>,
    argv: Vec<String>,
    app_argv: Vec<String>,
    electron_argv: Vec<String>,
    hard_reset_method: HardResetMethod,
    force_hard_reset: bool,
    use_polling: bool,
    poll_interval: Duration,
}

impl ResetConfiguration {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_unchecked(
        root: PathBuf,
        glob: Vec<String>,
        ignored: Vec<String>,
        main_files: Vec<PathBuf>,
        electron: Option<PathBuf>,
        argv: Vec<String>,
        app_argv: Vec<String>,
        electron_argv: Vec<String>,
        hard_reset_method: HardResetMethod,
        force_hard_reset: bool,
        use_polling: bool,
        poll_interval: Duration,
    ) -> Self {
        Self {
            root,
            glob,
            ignored,
            main_files,
            electron,
            argv,
            app_argv,
            electron_argv,
            hard_reset_method,
            force_hard_reset,
            use_polling,
            poll_interval,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn glob(&self) -> &[String] {
        &self.glob
    }

    pub fn main_files(&self) -> &[PathBuf] {
        &self.main_files
    }

    pub fn electron(&self) -> Option<&Path> {
        self.electron.as_deref()
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn app_argv(&self) -> &[String] {
        &self.app_argv
    }

    pub fn electron_argv(&self) -> &[String] {
        &self.electron_argv
    }

    pub fn hard_reset_method(&self) -> HardResetMethod {
        self.hard_reset_method
    }

    pub fn force_hard_reset(&self) -> bool {
        self.force_hard_reset
    }

    pub fn use_polling(&self) -> bool {
        self.use_polling
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Primary (soft) target: the globs, minus user exclusions, minus the
    /// entry files.
    pub fn soft_target(&self) -> WatchTarget {
        WatchTarget::new(self.glob.iter().cloned())
            .with_ignored(self.ignored.iter().cloned())
            .with_ignored(self.main_file_patterns())
    }

    /// Hard target: the entry files only.
    pub fn hard_target(&self) -> WatchTarget {
        WatchTarget::new(self.main_file_patterns()).with_ignored(self.ignored.iter().cloned())
    }

    /// The globs alone, used to widen the hard target in force mode.
    pub fn glob_target(&self) -> WatchTarget {
        WatchTarget::new(self.glob.iter().cloned())
    }

    /// Entry files are paths, never globs.
    fn main_file_patterns(&self) -> Vec<String> {
        self.main_files
            .iter()
            .map(|p| crate::watch::path_utils::escape_path(p))
            .collect()
    }
}
