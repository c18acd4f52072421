// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod reset;
pub mod shell;
pub mod types;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::loader::{anchor_root, default_config_path, load_from_path};
use crate::config::{ResetConfiguration, ResetOptions};
use crate::engine::{Collaborators, CoordinatorState, ReloaderHandle};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::reset::HardResetDispatcher;
use crate::shell::{Application, HeadlessApplication};

/// Start live reloading for the hosting application.
///
/// `globs` are added to `options.glob`. If `options.main_file` is empty, the
/// calling source file is used as the entry file.
///
/// Must be called from inside a Tokio runtime. Forward the GUI shell's
/// window-created events to [`ReloaderHandle::window_created`].
#[track_caller]
pub fn watch<I, S>(
    globs: I,
    options: ResetOptions,
    app: Arc<dyn Application>,
) -> Result<ReloaderHandle>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = configure(globs, options)?;
    let collaborators = Collaborators::real(&config, app);
    engine::start(&config, collaborators)
}

/// The configuration [`watch`] would run with, called from the same place.
#[track_caller]
pub fn configure<I, S>(globs: I, mut options: ResetOptions) -> Result<ResetConfiguration>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let caller = std::panic::Location::caller().file();

    options.glob.extend(globs.into_iter().map(Into::into));
    if options.main_file.is_empty() {
        options.main_file.push(PathBuf::from(caller));
    }

    ResetConfiguration::try_from(options)
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI)
/// - the coordinator with a headless application
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let options = resolve_options(&args)?;
    let config = ResetConfiguration::try_from(options)?;

    if args.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let app = Arc::new(HeadlessApplication::new());
    let handle = engine::start(&config, Collaborators::real(&config, app.clone()))?;

    // Ctrl-C or a graceful quit after a hard reset → shut down.
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                warn!(error = %e, "failed to listen for Ctrl+C");
            }
        }
        _ = app.quit_requested() => {
            info!("application quit requested");
        }
    }

    handle.shutdown();
    handle.join().await?;
    Ok(())
}

/// Options from the config file (explicit, or `LiveReset.toml` if present),
/// with command-line values layered on top.
fn resolve_options(args: &CliArgs) -> Result<ResetOptions> {
    let config_path = match args.config {
        Some(ref path) => Some(path.clone()),
        None => Some(default_config_path()).filter(|p| p.is_file()),
    };

    let options = match config_path {
        Some(path) => {
            let mut options = load_from_path(&path)?;
            anchor_root(&mut options, &path);
            debug!(config = ?path, "loaded config file");
            options
        }
        None => ResetOptions::default(),
    };

    Ok(args.apply(options))
}

/// Simple dry-run output: print targets, relaunch command and initial state.
fn print_dry_run(config: &ResetConfiguration) {
    let fs = RealFileSystem;
    let executable = config.electron().filter(|exe| fs.exists(exe));
    let state = CoordinatorState::plan(executable.is_some(), config.force_hard_reset());

    println!("livereset dry-run");
    println!("  root = {:?}", config.root());
    println!("  initial state = {state}");
    println!();

    let soft = config.soft_target();
    println!("soft watch:");
    println!("  patterns: {:?}", soft.patterns());
    println!("  ignored: {:?}", soft.ignored());
    if !state.soft_live() {
        println!("  (closed: superseded by forced hard reset)");
    }

    println!("hard watch:");
    match executable {
        Some(exe) => {
            let mut hard = config.hard_target();
            if config.force_hard_reset() {
                hard = hard.widened(&config.glob_target());
            }
            println!("  patterns: {:?}", hard.patterns());
            println!("  ignored: {:?}", hard.ignored());

            let dispatcher = HardResetDispatcher::from_config(exe, config);
            println!("  relaunch: {:?} {:?}", exe, dispatcher.relaunch_args());
            println!("  method: {}", dispatcher.method());
        }
        None => match config.electron() {
            Some(exe) => println!("  disabled: executable {exe:?} not found"),
            None => println!("  disabled: no executable configured"),
        },
    }

    if !config.argv().is_empty() {
        println!("argv: {:?}", config.argv());
    }

    debug!("dry-run complete (nothing watched)");
}
