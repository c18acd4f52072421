// src/shell/registry.rs

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::shell::{CloseObserver, Window, WindowId};

/// Every currently open window, in creation order.
///
/// Entries are added once on creation and removed once on close. Removal
/// looks the window up by identity at the time of removal, since earlier
/// removals shift positions.
///
/// All mutation happens on the coordinator loop, so no locking is needed.
#[derive(Default)]
pub struct WindowRegistry {
    windows: Vec<Arc<dyn Window>>,
}

impl fmt::Debug for WindowRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRegistry")
            .field("windows", &self.ids())
            .finish()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `window` and hand `observer` to its close event.
    ///
    /// Returns false (and drops the observer) if the window is already
    /// registered.
    pub fn register(&mut self, window: Arc<dyn Window>, observer: CloseObserver) -> bool {
        let id = window.id();
        if self.position_of(id).is_some() {
            debug!(window = %id, "window already registered; ignoring");
            return false;
        }

        window.on_closed(observer);
        self.windows.push(window);
        debug!(window = %id, count = self.windows.len(), "window registered");
        true
    }

    /// Remove the window with `id`, if present.
    ///
    /// Closing a window that is no longer registered is a no-op.
    pub fn on_closed(&mut self, id: WindowId) -> bool {
        match self.position_of(id) {
            Some(index) => {
                self.windows.remove(index);
                debug!(window = %id, count = self.windows.len(), "window removed");
                true
            }
            None => {
                debug!(window = %id, "closed window was not registered");
                false
            }
        }
    }

    /// Ask every registered window to reload, bypassing cache.
    ///
    /// Individual failures are logged and skipped. Returns how many reload
    /// instructions were issued.
    pub fn broadcast_soft_reset(&self) -> usize {
        for window in &self.windows {
            if let Err(err) = window.reload_ignoring_cache() {
                warn!(window = %window.id(), error = %err, "window reload failed");
            }
        }
        self.windows.len()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.position_of(id).is_some()
    }

    /// Ids of registered windows, in creation order.
    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|w| w.id()).collect()
    }

    fn position_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }
}
