// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::engine::CoordinatorState;
use crate::shell::{Window, WindowId};
use crate::types::WatchSource;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Add a window to the registry and observe its close event.
    TrackWindow(Arc<dyn Window>),
    /// Drop a closed window from the registry.
    ForgetWindow(WindowId),
    /// Reload every registered window.
    SoftReset { path: PathBuf },
    /// Relaunch and terminate.
    HardReset { path: PathBuf },
    /// Stop a watcher for good.
    CloseWatcher(WatchSource),
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub fn continue_with(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }

    pub fn nothing() -> Self {
        Self::continue_with(Vec::new())
    }
}

/// Handle a file change from either watcher.
///
/// - Soft changes reload windows while the primary watcher is live. Once it
///   has been superseded (force mode) or the process is terminating, a
///   straggling queued event is dropped.
/// - The first hard change while armed retires the hard watcher and fires
///   the hard reset. Later ones are dropped.
pub fn handle_file_changed(
    state: &mut CoordinatorState,
    source: WatchSource,
    path: PathBuf,
) -> CoreStep {
    match source {
        WatchSource::Soft if state.soft_live() => {
            CoreStep::continue_with(vec![CoreCommand::SoftReset { path }])
        }
        WatchSource::Hard if state.hard_armed() => {
            *state = CoordinatorState::Terminated;
            CoreStep::continue_with(vec![
                CoreCommand::CloseWatcher(WatchSource::Hard),
                CoreCommand::HardReset { path },
            ])
        }
        _ => {
            debug!(%source, path = ?path, %state, "change ignored in current state");
            CoreStep::nothing()
        }
    }
}

pub fn handle_window_created(window: Arc<dyn Window>) -> CoreStep {
    CoreStep::continue_with(vec![CoreCommand::TrackWindow(window)])
}

pub fn handle_window_closed(id: WindowId) -> CoreStep {
    CoreStep::continue_with(vec![CoreCommand::ForgetWindow(id)])
}

/// Close both watchers and stop the loop. Closing an already closed
/// watcher is a no-op in the shell.
pub fn handle_shutdown() -> CoreStep {
    CoreStep {
        commands: vec![
            CoreCommand::CloseWatcher(WatchSource::Soft),
            CoreCommand::CloseWatcher(WatchSource::Hard),
        ],
        keep_running: false,
    }
}
