//! # Console Host
//!
//! Host runtime for the two-pane line console.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The session never touches the terminal
//! - **Input is explicit events**: Backend keys are translated before routing
//! - **Deterministic mode is first-class**: Scripts drive the same session headlessly
//! - **Restore on every exit path**: Raw mode never outlives the process
//!
//! ## Responsibilities
//!
//! The host:
//! - Parses flags and the JSON config file
//! - Installs the log subscriber
//! - Runs the terminal loop (input → session → render)
//! - Runs scripted sessions and reports the output transcript
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Speak any peer protocol (forwarded lines are logged)
//! - Interpret directives (that is the dispatcher's job)

pub mod cli;
pub mod config;
pub mod input_script;
pub mod logging;
pub mod runtime;
pub mod sink;
pub mod terminal;

pub use cli::Cli;
pub use config::{ConfigError, ConsoleConfig};
pub use input_script::{InputScript, InputScriptError, ScriptedInput};
pub use logging::{init_logging, LogTarget, LoggingError};
pub use runtime::{HostMode, HostRuntime, HostRuntimeConfig, HostRuntimeError};
pub use sink::LogSink;
pub use terminal::{TerminalError, TerminalView};
