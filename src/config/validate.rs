// src/config/validate.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::model::{ResetConfiguration, ResetOptions};
use crate::errors::{LiveResetError, Result};
use crate::watch::WatchMatcher;

impl TryFrom<ResetOptions> for ResetConfiguration {
    type Error = LiveResetError;

    fn try_from(raw: ResetOptions) -> std::result::Result<Self, Self::Error> {
        let root = match raw.root {
            Some(ref root) => root.clone(),
            None => std::env::current_dir()?,
        };
        // Best-effort: notify reports resolved paths (e.g. /private/var on macOS).
        let root = root.canonicalize().unwrap_or(root);
        validate_options(&raw)?;

        let main_files: Vec<PathBuf> = raw
            .main_file
            .iter()
            .map(|p| absolutize(&root, p))
            .collect();
        let electron = raw.electron.as_deref().map(|p| absolutize(&root, p));

        let config = ResetConfiguration::new_unchecked(
            root,
            raw.glob,
            raw.ignored,
            main_files,
            electron,
            raw.argv,
            raw.app_argv,
            raw.electron_argv,
            raw.hard_reset_method,
            raw.force_hard_reset,
            raw.use_polling,
            Duration::from_millis(raw.poll_interval_ms),
        );

        validate_patterns(&config)?;
        Ok(config)
    }
}

fn validate_options(raw: &ResetOptions) -> Result<()> {
    if raw.glob.iter().all(|g| g.trim().is_empty()) {
        return Err(LiveResetError::ConfigError(
            "at least one path or glob to watch is required".to_string(),
        ));
    }

    if raw.main_file.iter().any(|p| p.as_os_str().is_empty()) {
        return Err(LiveResetError::ConfigError(
            "main_file entries must not be empty".to_string(),
        ));
    }

    if raw.use_polling && raw.poll_interval_ms == 0 {
        return Err(LiveResetError::ConfigError(
            "poll_interval_ms must be >= 1 when use_polling = true".to_string(),
        ));
    }

    Ok(())
}

/// Compile every target once so bad globs fail at setup, not on first event.
fn validate_patterns(config: &ResetConfiguration) -> Result<()> {
    WatchMatcher::compile(config.root(), &config.soft_target())?;
    WatchMatcher::compile(config.root(), &config.hard_target())?;
    Ok(())
}

fn absolutize(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
