// src/config/mod.rs

//! Configuration loading and validation for livereset.
//!
//! Responsibilities:
//! - Define the raw options and the validated configuration (`model.rs`).
//! - Load options from a TOML file (`loader.rs`).
//! - Validate and resolve paths (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ResetConfiguration, ResetOptions};
