//! # Directive Service
//!
//! Classifies submitted lines and runs local directives.
//!
//! ## Philosophy
//!
//! - **Registry, not switch**: Directives are looked up by name; adding one never touches dispatch
//! - **Permissive**: Unknown directives are swallowed without any visible error
//! - **Effects as data**: Handlers queue output operations instead of drawing
//! - **Quit is control flow**: Termination travels as [`QuitSignal`], never as a result value
//!
//! ## Example
//!
//! ```
//! use console_types::Line;
//! use services_directives::{CommandDispatcher, DispatchResult};
//! use services_history::HistoryStore;
//! use std::ops::ControlFlow;
//!
//! let dispatcher = CommandDispatcher::new();
//! let mut history = HistoryStore::new();
//!
//! let classified = dispatcher.classify(&Line::from("say hi"));
//! match dispatcher.dispatch(classified, &mut history) {
//!     ControlFlow::Continue(DispatchResult::Forward(line)) => assert_eq!(line, "say hi"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod builtins;
pub mod classify;
pub mod context;
pub mod registry;

pub use classify::{classify, Classified, Directive};
pub use context::{DirectiveContext, OutputOp};
pub use registry::{DirectiveDescriptor, DirectiveHandler, DirectiveRegistry, RegistryError};

use console_types::Line;
use serde::{Deserialize, Serialize};
use services_history::HistoryStore;
use std::ops::ControlFlow;
use tracing::debug;

/// Default sentinel prefix marking a directive
pub const DEFAULT_PREFIX: char = '/';

/// Outcome of dispatching a classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// Handled locally; apply these output operations in order
    Handled(Vec<OutputOp>),
    /// Hand the line to the peer untouched
    Forward(Line),
}

impl DispatchResult {
    /// Returns true if nothing needs to be shown or sent
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Handled(ops) if ops.is_empty())
    }
}

/// Session termination request raised by a directive
///
/// Carries any output the directive queued before asking to quit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuitSignal {
    pub output: Vec<OutputOp>,
}

/// Dispatcher configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Sentinel prefix marking a directive
    pub prefix: char,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX,
        }
    }
}

/// Routes submitted lines to directive handlers or the peer
#[derive(Debug)]
pub struct CommandDispatcher {
    config: DispatcherConfig,
    registry: DirectiveRegistry,
    catalog: Vec<DirectiveDescriptor>,
}

impl CommandDispatcher {
    /// Creates a dispatcher with the default prefix and built-in directives
    pub fn new() -> Self {
        Self::with_registry(DispatcherConfig::default(), DirectiveRegistry::with_builtins())
    }

    /// Creates a dispatcher over a caller-built registry
    ///
    /// The registry is frozen from here on.
    pub fn with_registry(config: DispatcherConfig, registry: DirectiveRegistry) -> Self {
        let catalog = registry.list();
        Self {
            config,
            registry,
            catalog,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn prefix(&self) -> char {
        self.config.prefix
    }

    /// Registered directives, sorted by name
    pub fn directives(&self) -> &[DirectiveDescriptor] {
        &self.catalog
    }

    /// Classifies a submitted line
    pub fn classify(&self, raw: &Line) -> Classified {
        let classified = classify(raw, self.config.prefix);
        if let Classified::Directive(d) = &classified {
            debug!(name = %d.name, args = d.args.len(), "classified directive");
        }
        classified
    }

    /// Returns whether submitting `input` should be recorded in history
    ///
    /// Plain text and unknown directives are always recorded; registered
    /// directives follow their descriptor.
    pub fn records_history(&self, input: &Classified) -> bool {
        match input {
            Classified::PlainText(_) => true,
            Classified::Directive(d) => self
                .registry
                .get(&d.name)
                .map_or(true, |desc| desc.records_history),
        }
    }

    /// Dispatches a classified line
    ///
    /// Never fails: unknown directives come back as a silent
    /// [`DispatchResult::Handled`].
    pub fn dispatch(
        &self,
        input: Classified,
        history: &mut HistoryStore,
    ) -> ControlFlow<QuitSignal, DispatchResult> {
        let directive = match input {
            Classified::PlainText(line) => {
                return ControlFlow::Continue(DispatchResult::Forward(line));
            }
            Classified::Directive(directive) => directive,
        };

        let Some(handler) = self.registry.handler(&directive.name) else {
            debug!(name = %directive.name, "unknown directive ignored");
            return ControlFlow::Continue(DispatchResult::Handled(Vec::new()));
        };

        let mut ctx = DirectiveContext::new(history, &self.catalog);
        handler(directive.args.as_slice(), &mut ctx);
        let (output, quit_requested) = ctx.finish();

        debug!(
            name = %directive.name,
            output = output.len(),
            quit = quit_requested,
            "directive handled"
        );

        if quit_requested {
            ControlFlow::Break(QuitSignal { output })
        } else {
            ControlFlow::Continue(DispatchResult::Handled(output))
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
