//! Log subscriber setup
//!
//! The terminal UI owns stdout and the screen, so interactive runs log only
//! to a file. Scripted runs fall back to stderr.

use crate::runtime::HostMode;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "info";

/// Logging setup error types
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Where log events are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Picks a destination for the given host mode
    pub fn for_mode(mode: HostMode, log_file: Option<&Path>) -> Self {
        match (log_file, mode) {
            (Some(path), _) => Self::File(path.to_path_buf()),
            (None, HostMode::Scripted) => Self::Stderr,
            (None, HostMode::Terminal) => Self::Off,
        }
    }
}

/// Builds the event filter
///
/// An explicit filter wins over `RUST_LOG`, which wins over [`DEFAULT_FILTER`].
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter, LoggingError> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).map_err(|e| LoggingError::Filter(e.to_string()))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs the global subscriber
pub fn init_logging(target: &LogTarget, level: Option<&str>) -> Result<(), LoggingError> {
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(build_filter(level)?)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| LoggingError::Install(e.to_string())),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::Io {
                    path: path.clone(),
                    source,
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(level)?)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| LoggingError::Install(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_selection() {
        assert_eq!(LogTarget::for_mode(HostMode::Terminal, None), LogTarget::Off);
        assert_eq!(LogTarget::for_mode(HostMode::Scripted, None), LogTarget::Stderr);
        assert_eq!(
            LogTarget::for_mode(HostMode::Terminal, Some(Path::new("console.log"))),
            LogTarget::File(PathBuf::from("console.log"))
        );
    }

    #[test]
    fn test_explicit_filter() {
        assert!(build_filter(Some("consoled=debug,warn")).is_ok());
    }

    #[test]
    fn test_off_target_installs_nothing() {
        assert!(init_logging(&LogTarget::Off, Some("debug")).is_ok());
    }
}
