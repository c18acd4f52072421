// src/reset/spawn.rs

//! Pluggable process spawning.
//!
//! The hard reset talks to a `ProcessSpawner` instead of building a
//! `Command` itself. Production code uses [`DetachedSpawner`]; tests can
//! provide an implementation that records the requested invocation.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::errors::{LiveResetError, Result};

/// Trait abstracting how the relaunch process is started.
pub trait ProcessSpawner: Send + Sync {
    /// Start `program` with `args`, detached from the current process group
    /// and inheriting stdio, and disown it.
    ///
    /// Returning `Ok` means the spawn was issued; it says nothing about the
    /// child becoming ready.
    fn spawn_detached(&self, program: &Path, args: &[OsString]) -> Result<()>;
}

/// Real spawner used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn spawn_detached(&self, program: &Path, args: &[OsString]) -> Result<()> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(false);
        detach(&mut cmd);

        let child = cmd.spawn().map_err(|source| LiveResetError::SpawnError {
            program: program.to_path_buf(),
            source,
        })?;

        info!(program = ?program, pid = ?child.id(), "relaunch process spawned");

        // Disown: the child outlives us and we never wait on it.
        drop(child);
        Ok(())
    }
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    // New process group, so the child survives signals aimed at ours.
    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}
