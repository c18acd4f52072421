// src/reset/soft.rs

use std::path::Path;

use tracing::debug;

use crate::shell::WindowRegistry;

/// Turns every primary-watcher change into a reload broadcast.
///
/// There is no debouncing: N changes produce N broadcasts.
#[derive(Debug, Default)]
pub struct SoftResetDispatcher {
    broadcasts: u64,
}

impl SoftResetDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload every window currently in `registry`. Returns the number of
    /// windows signalled.
    pub fn dispatch(&mut self, registry: &WindowRegistry, changed: &Path) -> usize {
        self.broadcasts += 1;
        let signalled = registry.broadcast_soft_reset();
        debug!(
            path = ?changed,
            windows = signalled,
            broadcast = self.broadcasts,
            "soft reset"
        );
        signalled
    }

    /// Number of broadcasts issued so far.
    pub fn broadcasts(&self) -> u64 {
        self.broadcasts
    }
}
