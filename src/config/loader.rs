// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ResetConfiguration, ResetOptions};
use crate::errors::Result;

/// Load reset options from a TOML file.
///
/// This only performs TOML deserialization; it does **not** validate. Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ResetOptions> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let options: ResetOptions = toml::from_str(&contents)?;

    Ok(options)
}

/// Load a configuration file from path and validate it.
///
/// Relative `root` values are taken relative to the file's directory, so a
/// config file describes the same project wherever it is loaded from.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ResetConfiguration> {
    let path = path.as_ref();
    let mut options = load_from_path(path)?;
    anchor_root(&mut options, path);
    ResetConfiguration::try_from(options)
}

/// Resolve a missing or relative `root` against the config file location.
pub fn anchor_root(options: &mut ResetOptions, config_path: &Path) {
    let dir = config_dir(config_path);
    options.root = Some(match options.root.take() {
        Some(root) if root.is_absolute() => root,
        Some(root) => dir.join(root),
        None => dir,
    });
}

/// Default config file name, looked up in the current directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("LiveReset.toml")
}

/// - If the config path has a non-empty parent (e.g. "configs/LiveReset.toml"),
///   we use that directory.
/// - If it's just a bare filename, we fall back to the current working
///   directory.
fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
