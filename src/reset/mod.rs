// src/reset/mod.rs

//! The two reset classes.
//!
//! - [`soft`]: reload every open window's content.
//! - [`hard`]: spawn a detached copy of the application, then terminate.
//! - [`spawn`]: the `ProcessSpawner` seam used by the hard reset, with the
//!   production [`DetachedSpawner`].

pub mod hard;
pub mod soft;
pub mod spawn;

pub use hard::HardResetDispatcher;
pub use soft::SoftResetDispatcher;
pub use spawn::{DetachedSpawner, ProcessSpawner};
