use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// How the current process terminates after a hard reset has spawned its
/// replacement.
///
/// - `Quit`: the graceful, interceptable primitive. Application-level quit
///   handlers run and may veto the quit.
/// - `Exit`: the immediate primitive. Quit handlers are bypassed.
///
/// Parsing is total: `"exit"` selects `Exit`, every other string (including
/// the empty string) selects `Quit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HardResetMethod {
    #[default]
    Quit,
    Exit,
}

impl FromStr for HardResetMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "exit" {
            Ok(HardResetMethod::Exit)
        } else {
            Ok(HardResetMethod::Quit)
        }
    }
}

impl fmt::Display for HardResetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardResetMethod::Quit => f.write_str("quit"),
            HardResetMethod::Exit => f.write_str("exit"),
        }
    }
}

impl<'de> Deserialize<'de> for HardResetMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let Ok(method) = raw.parse::<HardResetMethod>();
        Ok(method)
    }
}

/// Which watch subscription produced a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchSource {
    /// The primary watcher feeding soft resets.
    Soft,
    /// The one-shot watcher feeding the hard reset.
    Hard,
}

impl fmt::Display for WatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchSource::Soft => f.write_str("soft"),
            WatchSource::Hard => f.write_str("hard"),
        }
    }
}
