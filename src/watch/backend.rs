// src/watch/backend.rs

//! The contract the coordinator needs from a file watcher.
//!
//! A backend turns a [`WatchTarget`] into a live [`WatchSubscription`] that
//! sends `RuntimeEvent::FileChanged` into the coordinator loop. Production
//! code uses the notify-based [`NotifyBackend`](super::NotifyBackend); tests
//! substitute a fake that records targets and closes.

use tokio::sync::mpsc;

use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::types::WatchSource;
use crate::watch::WatchTarget;

/// Whether a subscription keeps firing or retires after its first event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Repeating,
    Once,
}

pub trait WatchBackend: Send + Sync {
    /// Start watching `target`, tagging every change with `source`.
    fn watch(
        &self,
        source: WatchSource,
        target: &WatchTarget,
        delivery: Delivery,
        events: mpsc::UnboundedSender<RuntimeEvent>,
    ) -> Result<Box<dyn WatchSubscription>>;
}

/// A live watch. Dropping it has the same effect as [`close`](Self::close).
pub trait WatchSubscription: Send {
    /// Widen the watch to also cover `target`'s patterns.
    fn add(&mut self, target: &WatchTarget) -> Result<()>;

    /// Stop all future change events and release watch resources.
    ///
    /// An event already queued in the coordinator channel may still arrive.
    fn close(&mut self);

    fn is_closed(&self) -> bool;
}
