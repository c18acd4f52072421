// src/engine/handle.rs

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::ResetConfiguration;
use crate::errors::{LiveResetError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::reset::{DetachedSpawner, ProcessSpawner};
use crate::shell::{Application, Window};
use crate::watch::{NotifyBackend, WatchBackend};

use super::runtime::Runtime;
use super::{CoordinatorState, RuntimeEvent};

/// External capabilities the coordinator is wired to.
///
/// Production code uses [`Collaborators::real`]; tests swap in fakes.
pub struct Collaborators {
    pub fs: Arc<dyn FileSystem>,
    pub watcher: Arc<dyn WatchBackend>,
    pub spawner: Arc<dyn ProcessSpawner>,
    pub app: Arc<dyn Application>,
}

impl Collaborators {
    pub fn real(config: &ResetConfiguration, app: Arc<dyn Application>) -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            watcher: Arc::new(NotifyBackend::from_config(config)),
            spawner: Arc::new(DetachedSpawner),
            app,
        }
    }
}

/// Arm the coordinator for `config` and spawn its loop on the current Tokio
/// runtime.
pub fn start(config: &ResetConfiguration, collaborators: Collaborators) -> Result<ReloaderHandle> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<RuntimeEvent>();
    let (state_tx, state_rx) = watch::channel(CoordinatorState::Idle);

    let runtime = Runtime::arm(config, collaborators, event_tx.clone(), event_rx, state_tx)?;
    let task = tokio::spawn(runtime.run());

    Ok(ReloaderHandle {
        events: event_tx,
        state: state_rx,
        task,
    })
}

/// Handle held by the host application.
///
/// The host forwards its shell's window-created events through
/// [`window_created`](Self::window_created); close events are observed
/// automatically once a window is registered.
#[derive(Debug)]
pub struct ReloaderHandle {
    events: mpsc::UnboundedSender<RuntimeEvent>,
    state: watch::Receiver<CoordinatorState>,
    task: JoinHandle<Result<()>>,
}

impl ReloaderHandle {
    pub fn window_created(&self, window: Arc<dyn Window>) {
        self.send(RuntimeEvent::WindowCreated(window));
    }

    /// Sender into the coordinator loop, for shell glue that lives elsewhere.
    pub fn events(&self) -> mpsc::UnboundedSender<RuntimeEvent> {
        self.events.clone()
    }

    /// Coordinator state after the last processed event.
    pub fn state(&self) -> CoordinatorState {
        *self.state.borrow()
    }

    /// Wait until the coordinator reaches a state satisfying `pred`.
    pub async fn wait_for_state<F>(&mut self, pred: F) -> Result<CoordinatorState>
    where
        F: FnMut(&CoordinatorState) -> bool,
    {
        let state = self
            .state
            .wait_for(pred)
            .await
            .map_err(|e| LiveResetError::Other(e.into()))?;
        Ok(*state)
    }

    /// Close every watcher and stop the loop.
    pub fn shutdown(&self) {
        self.send(RuntimeEvent::ShutdownRequested);
    }

    /// Wait for the coordinator loop to finish.
    pub async fn join(self) -> Result<()> {
        self.task
            .await
            .map_err(|e| LiveResetError::Other(e.into()))?
    }

    fn send(&self, event: RuntimeEvent) {
        if self.events.send(event).is_err() {
            warn!("coordinator loop has stopped; event dropped");
        }
    }
}
