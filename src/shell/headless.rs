// src/shell/headless.rs

use std::sync::Arc;

use tokio::sync::Notify;
use tracing::info;

use crate::shell::Application;

/// An [`Application`] with no GUI behind it.
///
/// `quit` wakes whoever awaits [`HeadlessApplication::quit_requested`] (the
/// binary then shuts the coordinator down); `exit` ends the process at once.
#[derive(Debug, Clone, Default)]
pub struct HeadlessApplication {
    quit: Arc<Notify>,
}

impl HeadlessApplication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves once `quit` has been called.
    pub async fn quit_requested(&self) {
        self.quit.notified().await;
    }
}

impl Application for HeadlessApplication {
    fn quit(&self) {
        info!("quit requested");
        // notify_one stores a permit, so a quit before anyone awaits is kept.
        self.quit.notify_one();
    }

    fn exit(&self) {
        info!("exiting immediately");
        std::process::exit(0);
    }
}
