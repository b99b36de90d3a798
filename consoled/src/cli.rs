//! Command-line interface
//!
//! Flags override the config file; the config file overrides built-in
//! defaults.

use crate::config::{ConfigError, ConsoleConfig};
use crate::runtime::{HostMode, HostRuntimeConfig, HostRuntimeError};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "consoled")]
#[command(about = "Two-pane line console with local directives and history recall")]
#[command(version)]
#[command(after_help = "EXAMPLES:
    # Interactive console
    consoled

    # Use ':' for directives and log to a file
    consoled --prefix : --log-file console.log

    # Headless run; prints the output transcript
    consoled --script demo.keys")]
pub struct Cli {
    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input script; runs headless and prints the transcript
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Maximum input events to process (0 = unlimited)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub max_steps: usize,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "services_directives=trace"
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Directive prefix character
    #[arg(long, value_name = "CHAR")]
    pub prefix: Option<char>,

    /// Skip the welcome banner
    #[arg(long)]
    pub no_welcome: bool,
}

impl Cli {
    pub fn mode(&self) -> HostMode {
        if self.script.is_some() {
            HostMode::Scripted
        } else {
            HostMode::Terminal
        }
    }

    /// Loads the config file (if any) and applies flag overrides
    pub fn console_config(&self) -> Result<ConsoleConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ConsoleConfig::load(path)?,
            None => ConsoleConfig::default(),
        };

        if let Some(prefix) = self.prefix {
            config.prefix = prefix;
        }
        if self.no_welcome {
            config.welcome = None;
        }

        config.validate()?;
        Ok(config)
    }

    /// Assembles the full runtime configuration
    pub fn runtime_config(&self) -> Result<HostRuntimeConfig, HostRuntimeError> {
        let script = match &self.script {
            Some(path) => Some(fs::read_to_string(path).map_err(|source| {
                HostRuntimeError::ScriptIo {
                    path: path.clone(),
                    source,
                }
            })?),
            None => None,
        };

        Ok(HostRuntimeConfig {
            mode: self.mode(),
            script,
            max_steps: self.max_steps,
            console: self.console_config()?,
        })
    }
}
