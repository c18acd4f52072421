// src/shell/mod.rs

//! Seams towards the hosting GUI shell.
//!
//! The shell owns the real windows and the process-level quit/exit
//! primitives. This crate only needs:
//! - per-window identity, a cache-bypassing reload, and a close observer
//!   ([`Window`])
//! - the two termination primitives ([`Application`])
//!
//! [`registry`] keeps the list of live windows; [`headless`] is an
//! [`Application`] for running the coordinator without any GUI (the
//! `livereset` binary).

use std::fmt;

use crate::errors::Result;

pub mod headless;
pub mod registry;

pub use headless::HeadlessApplication;
pub use registry::WindowRegistry;

/// Stable identity of a window, unique among live windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Callback run once when a window reports that it has closed.
pub type CloseObserver = Box<dyn FnOnce() + Send + 'static>;

/// A renderable window owned by the GUI shell.
pub trait Window: Send + Sync + fmt::Debug {
    fn id(&self) -> WindowId;

    /// Reload the displayed content, bypassing any cache.
    fn reload_ignoring_cache(&self) -> Result<()>;

    /// Install an observer fired when this window closes.
    ///
    /// The observer may be called from any thread.
    fn on_closed(&self, observer: CloseObserver);
}

/// Process-level termination primitives of the GUI shell.
pub trait Application: Send + Sync {
    /// Graceful quit. Application-level quit handlers may intercept it.
    fn quit(&self);

    /// Immediate exit. Bypasses quit handlers.
    fn exit(&self);
}
