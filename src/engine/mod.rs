// src/engine/mod.rs

//! Coordination engine for livereset.
//!
//! This module ties together:
//! - the two watch subscriptions (soft and hard)
//! - the window registry
//! - the soft and hard reset dispatchers
//! - the coordinator loop that reacts to:
//!   - file changes from either watcher
//!   - window creation and close events from the GUI shell
//!   - shutdown requests
//!
//! The pure state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::shell::{Window, WindowId};
use crate::types::WatchSource;

/// Which watchers are armed. Decided once at setup; the only later
/// transition is the one-shot collapse into `Terminated` (or back out of it
/// if the relaunch could not be spawned).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No watcher armed.
    Idle,
    /// Primary watcher only: no usable relaunch executable.
    SoftOnly,
    /// Primary watcher plus the one-shot entry-file watcher.
    SoftAndHard,
    /// Force mode: primary watcher closed, hard watcher covers everything.
    HardOnly,
    /// Hard reset fired; the process is on its way out.
    Terminated,
}

impl CoordinatorState {
    /// Initial state from executable validity and the force flag.
    pub fn plan(hard_available: bool, force_hard_reset: bool) -> Self {
        match (hard_available, force_hard_reset) {
            (false, _) => CoordinatorState::SoftOnly,
            (true, false) => CoordinatorState::SoftAndHard,
            (true, true) => CoordinatorState::HardOnly,
        }
    }

    pub fn soft_live(self) -> bool {
        matches!(self, CoordinatorState::SoftOnly | CoordinatorState::SoftAndHard)
    }

    pub fn hard_armed(self) -> bool {
        matches!(self, CoordinatorState::SoftAndHard | CoordinatorState::HardOnly)
    }
}

impl fmt::Display for CoordinatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoordinatorState::Idle => "idle",
            CoordinatorState::SoftOnly => "soft-only",
            CoordinatorState::SoftAndHard => "soft+hard",
            CoordinatorState::HardOnly => "hard-only",
            CoordinatorState::Terminated => "terminated",
        };
        f.write_str(s)
    }
}

/// Events flowing into the coordinator loop from watchers and the GUI shell.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A watched file changed.
    FileChanged { source: WatchSource, path: PathBuf },
    /// The shell created a window.
    WindowCreated(Arc<dyn Window>),
    /// A registered window closed.
    WindowClosed(WindowId),
    /// Stop the loop and close every watcher.
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod handle;
pub mod runtime;

pub use core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use handle::{Collaborators, ReloaderHandle, start};
pub use runtime::Runtime;
