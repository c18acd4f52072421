// src/engine/runtime.rs

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::config::ResetConfiguration;
use crate::engine::handle::Collaborators;
use crate::errors::Result;
use crate::reset::{HardResetDispatcher, ProcessSpawner, SoftResetDispatcher};
use crate::shell::{Application, Window, WindowRegistry};
use crate::types::WatchSource;
use crate::watch::{Delivery, WatchSubscription};

use super::core::CoreRuntime;
use super::{CoordinatorState, CoreCommand, RuntimeEvent};

/// Owns every piece of mutable coordinator state and drives it from a single
/// event loop: the window registry, both watch subscriptions and the two
/// dispatchers.
///
/// All reset semantics live in `CoreRuntime`; this struct executes the
/// commands it returns.
pub struct Runtime {
    core: CoreRuntime,
    event_rx: mpsc::UnboundedReceiver<RuntimeEvent>,
    /// Cloned into window close observers.
    event_tx: mpsc::UnboundedSender<RuntimeEvent>,
    state_tx: watch::Sender<CoordinatorState>,
    registry: WindowRegistry,
    soft: SoftResetDispatcher,
    hard: Option<HardResetDispatcher>,
    subscriptions: HashMap<WatchSource, Box<dyn WatchSubscription>>,
    spawner: Arc<dyn ProcessSpawner>,
    app: Arc<dyn Application>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("registry", &self.registry)
            .field("hard", &self.hard)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    /// Arm the watchers for `config` and build the runtime around them.
    ///
    /// The executable is checked exactly once, here. Without it hard resets
    /// stay disabled for the life of the process.
    pub fn arm(
        config: &ResetConfiguration,
        collaborators: Collaborators,
        event_tx: mpsc::UnboundedSender<RuntimeEvent>,
        event_rx: mpsc::UnboundedReceiver<RuntimeEvent>,
        state_tx: watch::Sender<CoordinatorState>,
    ) -> Result<Self> {
        let Collaborators {
            fs,
            watcher,
            spawner,
            app,
        } = collaborators;

        let mut subscriptions: HashMap<WatchSource, Box<dyn WatchSubscription>> = HashMap::new();

        let soft_sub = watcher.watch(
            WatchSource::Soft,
            &config.soft_target(),
            Delivery::Repeating,
            event_tx.clone(),
        )?;
        subscriptions.insert(WatchSource::Soft, soft_sub);

        let hard = match config.electron() {
            Some(exe) if fs.exists(exe) => Some(HardResetDispatcher::from_config(exe, config)),
            Some(exe) => {
                warn!(executable = ?exe, "executable could not be found; hard resets disabled");
                None
            }
            None => {
                warn!("no executable configured; hard resets disabled");
                None
            }
        };

        if hard.is_some() {
            let mut hard_sub = watcher.watch(
                WatchSource::Hard,
                &config.hard_target(),
                Delivery::Once,
                event_tx.clone(),
            )?;

            if config.force_hard_reset() {
                // Every watched file now relaunches; soft resets stop here.
                hard_sub.add(&config.glob_target())?;
                if let Some(mut soft_sub) = subscriptions.remove(&WatchSource::Soft) {
                    soft_sub.close();
                }
            }
            subscriptions.insert(WatchSource::Hard, hard_sub);
        }

        let state = CoordinatorState::plan(hard.is_some(), config.force_hard_reset());
        state_tx.send_replace(state);
        info!(%state, "coordinator armed");

        Ok(Self {
            core: CoreRuntime::new(state),
            event_rx,
            event_tx,
            state_tx,
            registry: WindowRegistry::new(),
            soft: SoftResetDispatcher::new(),
            hard,
            subscriptions,
            spawner,
            app,
        })
    }

    pub fn state(&self) -> CoordinatorState {
        self.core.state()
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    /// Main event loop.
    ///
    /// - Consumes `RuntimeEvent`s from `event_rx`.
    /// - Feeds them into the core.
    /// - Executes the commands returned by the core.
    pub async fn run(mut self) -> Result<()> {
        info!("livereset coordinator started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("coordinator event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "coordinator received event");

            let step = self.core.step(event);
            for command in step.commands {
                self.execute_command(command);
            }
            self.state_tx.send_replace(self.core.state());

            if !step.keep_running {
                info!("shutdown requested; stopping coordinator");
                break;
            }
        }

        for (_, mut sub) in self.subscriptions.drain() {
            sub.close();
        }
        info!("coordinator exiting");
        Ok(())
    }

    fn execute_command(&mut self, command: CoreCommand) {
        match command {
            CoreCommand::TrackWindow(window) => self.track_window(window),
            CoreCommand::ForgetWindow(id) => {
                self.registry.on_closed(id);
            }
            CoreCommand::SoftReset { path } => {
                self.soft.dispatch(&self.registry, &path);
            }
            CoreCommand::HardReset { path } => self.hard_reset(&path),
            CoreCommand::CloseWatcher(source) => {
                if let Some(mut sub) = self.subscriptions.remove(&source) {
                    sub.close();
                }
            }
        }
    }

    fn track_window(&mut self, window: Arc<dyn Window>) {
        let id = window.id();
        let tx = self.event_tx.clone();
        let observer = Box::new(move || {
            // The loop may already be gone during shutdown; nothing to clean up then.
            let _ = tx.send(RuntimeEvent::WindowClosed(id));
        });
        self.registry.register(window, observer);
    }

    fn hard_reset(&mut self, path: &std::path::Path) {
        let Some(hard) = &self.hard else {
            warn!(path = ?path, "hard reset requested without an executable");
            self.core.hard_reset_failed();
            return;
        };

        info!(path = ?path, "entry change detected; hard reset");
        if let Err(err) = hard.dispatch(self.spawner.as_ref(), self.app.as_ref()) {
            error!(error = %err, "relaunch failed; not terminating");
            self.core.hard_reset_failed();
        }
    }
}
