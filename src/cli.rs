// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ResetOptions;
use crate::types::HardResetMethod;

/// Command-line arguments for `livereset`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "livereset",
    version,
    about = "Reload windows or relaunch the application when watched files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Paths or glob patterns to watch. Added to `glob` from the config file.
    #[arg(value_name = "GLOB")]
    pub glob: Vec<String>,

    /// Path to a config file (TOML).
    ///
    /// Default: `LiveReset.toml` in the current working directory, if it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Executable used to relaunch on a hard reset.
    #[arg(long, value_name = "PATH")]
    pub electron: Option<PathBuf>,

    /// Entry file(s). Excluded from soft resets, trigger hard resets.
    #[arg(long = "main-file", value_name = "PATH")]
    pub main_file: Vec<PathBuf>,

    /// Argument placed before the entry file(s) on relaunch. Repeatable.
    #[arg(long = "electron-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub electron_argv: Vec<String>,

    /// Argument placed after the entry file(s) on relaunch. Repeatable.
    #[arg(long = "app-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub app_argv: Vec<String>,

    /// `exit` terminates immediately; anything else quits gracefully.
    #[arg(long, value_name = "METHOD")]
    pub hard_reset_method: Option<String>,

    /// Hard reset on every watched change instead of soft resets.
    #[arg(long)]
    pub force_hard_reset: bool,

    /// Extra pattern excluded from both watchers. Repeatable.
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignored: Vec<String>,

    /// Poll the filesystem every N milliseconds instead of using OS events.
    #[arg(long, value_name = "MS")]
    pub poll: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LIVERESET_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the watch plan, but don't watch anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Layer the command-line values on top of `options` (usually loaded from
    /// the config file). Lists are extended, scalars replaced when given.
    pub fn apply(&self, mut options: ResetOptions) -> ResetOptions {
        options.glob.extend(self.glob.iter().cloned());
        options.main_file.extend(self.main_file.iter().cloned());
        options.electron_argv.extend(self.electron_argv.iter().cloned());
        options.app_argv.extend(self.app_argv.iter().cloned());
        options.ignored.extend(self.ignored.iter().cloned());

        if let Some(ref electron) = self.electron {
            options.electron = Some(electron.clone());
        }
        if let Some(ref method) = self.hard_reset_method {
            let Ok(method) = method.parse::<HardResetMethod>();
            options.hard_reset_method = method;
        }
        if self.force_hard_reset {
            options.force_hard_reset = true;
        }
        if let Some(ms) = self.poll {
            options.use_polling = true;
            options.poll_interval_ms = ms;
        }
        options
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
