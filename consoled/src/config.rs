//! # Console Configuration
//!
//! Versioned JSON configuration for the host.
//!
//! ```json
//! { "version": 1, "prefix": "/", "welcome": "Welcome!", "output_limit": 1000 }
//! ```
//!
//! Missing fields take their defaults. A file written for a different format
//! version is rejected rather than guessed at.

use console_session::SessionConfig;
use serde::{Deserialize, Serialize};
use services_directives::{DispatcherConfig, DEFAULT_PREFIX};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default number of output lines kept by the terminal view
pub const DEFAULT_OUTPUT_LIMIT: usize = 1000;

/// Default welcome banner
pub const DEFAULT_WELCOME: &str = "Welcome to consoled!";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid directive prefix: {0:?}")]
    InvalidPrefix(char),

    #[error("Output limit must be at least 1")]
    InvalidOutputLimit,
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Format version
    pub version: u32,
    /// Sentinel character that marks a directive
    pub prefix: char,
    /// Banner shown when the session starts
    pub welcome: Option<String>,
    /// Maximum lines retained in the output pane
    pub output_limit: usize,
    /// Whether forwarded lines are echoed to the output pane
    pub echo_forwarded: bool,
}

impl ConsoleConfig {
    /// Current version of the config format
    pub const CURRENT_VERSION: u32 = 1;

    /// Parses and validates a JSON config
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Serializes the config as pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks version and value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != Self::CURRENT_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        if self.prefix.is_whitespace() || self.prefix.is_control() {
            return Err(ConfigError::InvalidPrefix(self.prefix));
        }
        if self.output_limit == 0 {
            return Err(ConfigError::InvalidOutputLimit);
        }
        Ok(())
    }

    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            prefix: self.prefix,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            welcome: self.welcome.clone(),
            echo_forwarded: self.echo_forwarded,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            prefix: DEFAULT_PREFIX,
            welcome: Some(DEFAULT_WELCOME.to_string()),
            output_limit: DEFAULT_OUTPUT_LIMIT,
            echo_forwarded: true,
        }
    }
}
