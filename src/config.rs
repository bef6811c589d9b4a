//! Runtime configuration.
//!
//! The session directory is an explicit value threaded through the record
//! store and the commands, never a hidden global, so tests can point the
//! whole tool at a disposable location.

use std::path::PathBuf;

use thiserror::Error;

/// Directory name under the user's home directory.
const DEFAULT_DIR_NAME: &str = ".ghostpass";

/// Errors that can occur while resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to determine home directory")]
    NoHomeDir,
}

/// Runtime configuration for the tool.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where session records live, one JSON file per session.
    pub session_dir: PathBuf,
}

impl Config {
    /// Default configuration rooted at `~/.ghostpass`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self {
            session_dir: home.join(DEFAULT_DIR_NAME),
        })
    }

    /// Configuration rooted at an explicit directory.
    pub fn with_dir(session_dir: impl Into<PathBuf>) -> Self {
        Self {
            session_dir: session_dir.into(),
        }
    }
}
