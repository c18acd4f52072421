// src/reset/hard.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ResetConfiguration;
use crate::errors::Result;
use crate::reset::spawn::ProcessSpawner;
use crate::shell::Application;
use crate::types::HardResetMethod;

/// Relaunches the application and terminates the current process.
#[derive(Debug, Clone)]
pub struct HardResetDispatcher {
    executable: PathBuf,
    main_files: Vec<PathBuf>,
    method: HardResetMethod,
    app_argv: Vec<String>,
    electron_argv: Vec<String>,
}

impl HardResetDispatcher {
    pub fn new(
        executable: impl Into<PathBuf>,
        main_files: Vec<PathBuf>,
        method: HardResetMethod,
        app_argv: Vec<String>,
        electron_argv: Vec<String>,
    ) -> Self {
        Self {
            executable: executable.into(),
            main_files,
            method,
            app_argv,
            electron_argv,
        }
    }

    /// Build a dispatcher for `executable` from the rest of `config`.
    pub fn from_config(executable: impl Into<PathBuf>, config: &ResetConfiguration) -> Self {
        Self::new(
            executable,
            config.main_files().to_vec(),
            config.hard_reset_method(),
            config.app_argv().to_vec(),
            config.electron_argv().to_vec(),
        )
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn method(&self) -> HardResetMethod {
        self.method
    }

    /// Arguments for the relaunched process.
    ///
    /// Order matters: executable flags, then the entry file(s), then the
    /// application's own arguments.
    pub fn relaunch_args(&self) -> Vec<OsString> {
        self.electron_argv
            .iter()
            .map(OsString::from)
            .chain(self.main_files.iter().map(|p| p.as_os_str().to_os_string()))
            .chain(self.app_argv.iter().map(OsString::from))
            .collect()
    }

    /// Spawn the replacement, then terminate this process.
    ///
    /// Termination only happens after the spawn was issued successfully. A
    /// spawn error is returned and the current process keeps running.
    pub fn dispatch(&self, spawner: &dyn ProcessSpawner, app: &dyn Application) -> Result<()> {
        let args = self.relaunch_args();
        info!(
            executable = ?self.executable,
            args = ?args,
            method = %self.method,
            "hard reset: relaunching"
        );

        spawner.spawn_detached(&self.executable, &args)?;

        match self.method {
            HardResetMethod::Exit => app.exit(),
            HardResetMethod::Quit => app.quit(),
        }
        Ok(())
    }
}
