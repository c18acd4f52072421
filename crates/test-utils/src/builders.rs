#![allow(dead_code)]

use std::path::PathBuf;

use livereset::config::{ResetConfiguration, ResetOptions};
use livereset::types::HardResetMethod;

/// Builder for `ResetOptions` to simplify test setup.
///
/// The root defaults to `/project` so that paths in assertions are stable.
pub struct ResetOptionsBuilder {
    options: ResetOptions,
}

impl ResetOptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: ResetOptions {
                root: Some(PathBuf::from("/project")),
                ..ResetOptions::default()
            },
        }
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = Some(root.into());
        self
    }

    pub fn glob(mut self, pattern: &str) -> Self {
        self.options.glob.push(pattern.to_string());
        self
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.options.ignored.push(pattern.to_string());
        self
    }

    pub fn main_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.main_file.push(path.into());
        self
    }

    pub fn electron(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.electron = Some(path.into());
        self
    }

    pub fn electron_arg(mut self, arg: &str) -> Self {
        self.options.electron_argv.push(arg.to_string());
        self
    }

    pub fn app_arg(mut self, arg: &str) -> Self {
        self.options.app_argv.push(arg.to_string());
        self
    }

    pub fn hard_reset_method(mut self, method: HardResetMethod) -> Self {
        self.options.hard_reset_method = method;
        self
    }

    pub fn force_hard_reset(mut self, val: bool) -> Self {
        self.options.force_hard_reset = val;
        self
    }

    pub fn options(self) -> ResetOptions {
        self.options
    }

    pub fn build(self) -> ResetConfiguration {
        ResetConfiguration::try_from(self.options)
            .expect("Failed to build valid config from builder")
    }
}

impl Default for ResetOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
