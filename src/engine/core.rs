// src/engine/core.rs

//! Pure coordinator state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated [`CoordinatorState`]
//! - a list of commands describing what the IO shell should do next
//!
//! The async/IO shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from the channel
//! - keeping the window registry and watch subscriptions
//! - spawning the relaunch and calling the shell's quit/exit
//!
//! The core is intended to be unit tested without any Tokio, channels,
//! filesystem, or processes.

use tracing::{info, warn};

use crate::engine::event_handlers::{
    handle_file_changed, handle_shutdown, handle_window_closed, handle_window_created, CoreStep,
};
use crate::engine::{CoordinatorState, RuntimeEvent};

#[derive(Debug)]
pub struct CoreRuntime {
    state: CoordinatorState,
    /// Whether the primary watcher is still open. Needed to know where to
    /// fall back to if a hard reset fails to spawn.
    soft_open: bool,
}

impl CoreRuntime {
    pub fn new(state: CoordinatorState) -> Self {
        Self {
            state,
            soft_open: state.soft_live(),
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Handle a single runtime event, updating state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::FileChanged { source, path } => {
                let before = self.state;
                let step = handle_file_changed(&mut self.state, source, path);
                if before != self.state {
                    info!(from = %before, to = %self.state, "coordinator state changed");
                }
                step
            }
            RuntimeEvent::WindowCreated(window) => handle_window_created(window),
            RuntimeEvent::WindowClosed(id) => handle_window_closed(id),
            RuntimeEvent::ShutdownRequested => {
                self.soft_open = false;
                handle_shutdown()
            }
        }
    }

    /// The relaunch could not be spawned, so this process stays alive.
    ///
    /// The hard watcher has already been retired and is not re-armed. Soft
    /// resets resume if the primary watcher is still open.
    pub fn hard_reset_failed(&mut self) {
        if self.state != CoordinatorState::Terminated {
            return;
        }
        self.state = if self.soft_open {
            CoordinatorState::SoftOnly
        } else {
            CoordinatorState::Idle
        };
        warn!(state = %self.state, "hard reset aborted; current process keeps running");
    }
}
