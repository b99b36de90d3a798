//! Submitted line value

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A submitted line
///
/// Immutable once built. Cloning shares the underlying text, so the same
/// line can sit in history and travel to the forwarding sink without copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Line(Arc<str>);

impl Line {
    /// Creates a line from any string-like value
    pub fn new(text: impl Into<String>) -> Self {
        Self(Arc::from(text.into()))
    }

    /// Returns the line text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the line has no visible content
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Deref for Line {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Line> for String {
    fn from(line: Line) -> Self {
        line.0.to_string()
    }
}

impl PartialEq<str> for Line {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
