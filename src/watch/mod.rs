// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - The permanent path classifier (`ignore.rs`).
//! - Compiling watch / exclude glob patterns (`patterns.rs`).
//! - The watcher contract the coordinator relies on (`backend.rs`).
//! - A cross-platform implementation of it on top of `notify` (`watcher.rs`).
//!
//! It does **not** know about resets; it only turns filesystem changes into
//! `RuntimeEvent::FileChanged` tagged with the subscription they came from.

pub mod backend;
pub mod ignore;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use backend::{Delivery, WatchBackend, WatchSubscription};
pub use ignore::{is_ignored, is_ignored_path};
pub use patterns::{WatchMatcher, WatchTarget};
pub use watcher::{NotifyBackend, NotifySubscription};
