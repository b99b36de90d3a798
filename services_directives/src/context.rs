//! Handler execution context

use crate::registry::DirectiveDescriptor;
use serde::{Deserialize, Serialize};
use services_history::HistoryStore;

/// An effect a directive wants applied to the output region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputOp {
    /// Append a line of text
    Append(String),
    /// Erase everything currently shown
    Clear,
}

/// Capabilities lent to a directive handler for one invocation
///
/// Handlers never touch the display directly; they queue [`OutputOp`]s which
/// the session applies once the handler returns.
pub struct DirectiveContext<'a> {
    history: &'a mut HistoryStore,
    catalog: &'a [DirectiveDescriptor],
    output: Vec<OutputOp>,
    quit_requested: bool,
}

impl<'a> DirectiveContext<'a> {
    pub(crate) fn new(history: &'a mut HistoryStore, catalog: &'a [DirectiveDescriptor]) -> Self {
        Self {
            history,
            catalog,
            output: Vec::new(),
            quit_requested: false,
        }
    }

    /// Read access to the session history
    pub fn history(&self) -> &HistoryStore {
        &*self.history
    }

    /// Write access to the session history
    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut *self.history
    }

    /// Queues a line for the output region
    pub fn append(&mut self, text: impl Into<String>) {
        self.output.push(OutputOp::Append(text.into()));
    }

    /// Queues an output-region wipe
    pub fn clear_output(&mut self) {
        self.output.push(OutputOp::Clear);
    }

    /// Asks the session to terminate once this handler returns
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Every registered directive, sorted by name
    pub fn directives(&self) -> &[DirectiveDescriptor] {
        self.catalog
    }

    pub(crate) fn finish(self) -> (Vec<OutputOp>, bool) {
        (self.output, self.quit_requested)
    }
}
