//! Directive registry
//!
//! Maps directive names to handlers. Registering a name twice replaces the
//! earlier entry, which is how built-ins are swapped out.

use crate::context::DirectiveContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Directive registration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Directive name is empty")]
    EmptyName,

    #[error("Directive name contains whitespace: {0:?}")]
    WhitespaceInName(String),
}

/// Describes a registered directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveDescriptor {
    /// Name typed after the sentinel prefix
    pub name: String,
    /// One-line description shown by `help`
    pub description: String,
    /// Whether submitting this directive records it in history
    pub records_history: bool,
}

impl DirectiveDescriptor {
    /// Creates a descriptor that records its invocations in history
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            records_history: true,
        }
    }

    /// Keeps invocations of this directive out of history
    pub fn without_history(mut self) -> Self {
        self.records_history = false;
        self
    }
}

impl fmt::Display for DirectiveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}

/// Directive handler signature
///
/// Receives the parsed arguments and the capabilities lent for this call.
pub type DirectiveHandler = Box<dyn Fn(&[String], &mut DirectiveContext<'_>) + Send + Sync>;

struct RegisteredDirective {
    descriptor: DirectiveDescriptor,
    handler: DirectiveHandler,
}

/// Registry of directive handlers
#[derive(Default)]
pub struct DirectiveRegistry {
    entries: BTreeMap<String, RegisteredDirective>,
}

impl DirectiveRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Creates a registry holding the built-in directives
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtins::register_builtins(&mut registry);
        registry
    }

    /// Registers a directive, replacing any earlier entry with the same name
    ///
    /// Returns true if an existing entry was replaced.
    pub fn register(
        &mut self,
        descriptor: DirectiveDescriptor,
        handler: DirectiveHandler,
    ) -> Result<bool, RegistryError> {
        if descriptor.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if descriptor.name.chars().any(char::is_whitespace) {
            return Err(RegistryError::WhitespaceInName(descriptor.name));
        }

        let name = descriptor.name.clone();
        let previous = self.entries.insert(
            name,
            RegisteredDirective {
                descriptor,
                handler,
            },
        );
        Ok(previous.is_some())
    }

    /// Removes a directive by name
    pub fn unregister(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Looks up a descriptor by exact name
    pub fn get(&self, name: &str) -> Option<&DirectiveDescriptor> {
        self.entries.get(name).map(|d| &d.descriptor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All descriptors, sorted by name
    pub fn list(&self) -> Vec<DirectiveDescriptor> {
        self.entries.values().map(|d| d.descriptor.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn handler(&self, name: &str) -> Option<&DirectiveHandler> {
        self.entries.get(name).map(|d| &d.handler)
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
