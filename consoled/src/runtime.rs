//! # Host Runtime
//!
//! Builds the session from configuration and drives it from either the
//! terminal or an input script.

use crate::config::{ConfigError, ConsoleConfig};
use crate::input_script::{InputScript, InputScriptError, ScriptedInput};
use crate::sink::LogSink;
use crate::terminal::{run_terminal, TerminalError, TerminalView};
use console_session::{InputSession, MemorySurface, SessionControl};
use console_types::SessionId;
use services_directives::{CommandDispatcher, DirectiveRegistry};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("Failed to read script file {path}: {source}")]
    ScriptIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scripted mode requires an input script")]
    MissingScript,

    #[error("Terminal error: {0}")]
    Terminal(#[from] TerminalError),
}

/// Host mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// Interactive terminal UI
    Terminal,
    /// Headless run fed by an input script
    Scripted,
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct HostRuntimeConfig {
    /// Host mode
    pub mode: HostMode,
    /// Input script text (scripted mode)
    pub script: Option<String>,
    /// Maximum events to route (0 = unlimited)
    pub max_steps: usize,
    /// Console settings
    pub console: ConsoleConfig,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            mode: HostMode::Terminal,
            script: None,
            max_steps: 0,
            console: ConsoleConfig::default(),
        }
    }
}

/// Host runtime
pub struct HostRuntime {
    config: HostRuntimeConfig,
    session: InputSession<LogSink>,
    /// Input script (scripted mode)
    script: Option<InputScript>,
    /// Headless display (scripted mode)
    surface: MemorySurface,
    started: bool,
    steps: usize,
}

impl HostRuntime {
    /// Creates a new host runtime
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        config.console.validate()?;

        let script = config
            .script
            .as_deref()
            .map(InputScript::from_text)
            .transpose()?;
        if config.mode == HostMode::Scripted && script.is_none() {
            return Err(HostRuntimeError::MissingScript);
        }

        let dispatcher = CommandDispatcher::with_registry(
            config.console.dispatcher_config(),
            DirectiveRegistry::with_builtins(),
        );
        let id = SessionId::new();
        let session = InputSession::new(dispatcher, LogSink::for_session(id))
            .with_id(id)
            .with_config(config.console.session_config());

        Ok(Self {
            config,
            session,
            script,
            surface: MemorySurface::new(),
            started: false,
            steps: 0,
        })
    }

    /// Runs until the session quits, the step limit is hit, or the script
    /// runs out
    pub fn run(&mut self) -> Result<(), HostRuntimeError> {
        info!(session = %self.session.id(), mode = ?self.config.mode, "host starting");

        match self.config.mode {
            HostMode::Terminal => {
                let mut view = TerminalView::new(self.config.console.output_limit);
                self.steps += run_terminal(&mut self.session, &mut view, self.config.max_steps)?;
            }
            HostMode::Scripted => self.run_scripted(),
        }

        info!(steps = self.steps, history = self.session.history().len(), "host stopped");
        Ok(())
    }

    fn run_scripted(&mut self) {
        if !self.started {
            self.session.start(&mut self.surface);
            self.started = true;
        }

        loop {
            if self.session.is_closed() {
                break;
            }
            if self.config.max_steps > 0 && self.steps >= self.config.max_steps {
                break;
            }
            if !self.script.as_ref().is_some_and(InputScript::has_more) {
                break;
            }

            self.step();
            self.steps += 1;
        }
    }

    /// Feeds the next scripted input to the session
    pub fn step(&mut self) -> SessionControl {
        let Some(input) = self.script.as_mut().and_then(InputScript::next_input) else {
            return SessionControl::Continue;
        };

        match input {
            ScriptedInput::Wait(millis) => {
                debug!(millis, "script wait");
                thread::sleep(Duration::from_millis(millis));
                SessionControl::Continue
            }
            ScriptedInput::Key(..) => match InputScript::to_input_event(&input) {
                Some(event) => self.session.handle_event(&mut self.surface, &event),
                None => SessionControl::Continue,
            },
        }
    }

    /// Output region of the headless surface, newline-joined
    pub fn transcript(&self) -> String {
        self.surface.transcript()
    }

    pub fn surface(&self) -> &MemorySurface {
        &self.surface
    }

    pub fn session(&self) -> &InputSession<LogSink> {
        &self.session
    }

    /// Returns the step count
    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn mode(&self) -> HostMode {
        self.config.mode
    }
}
