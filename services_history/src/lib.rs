//! # History Service
//!
//! Ordered record of submitted lines with a recall cursor.
//!
//! ## Philosophy
//!
//! - **Owned, not ambient**: The store belongs to one session and is lent out by reference
//! - **Append-only**: Entries are never edited; the only bulk mutation is [`HistoryStore::clear`]
//! - **Clamped cursor**: The cursor never leaves `[0, len]`
//!
//! ## Cursor model
//!
//! The cursor sits at `len` when no recall is in progress ("newest edge").
//! Recalling moves it onto an existing entry; stepping off either end is
//! refused and leaves the cursor where it was.
//!
//! ## Example
//!
//! ```
//! use services_history::HistoryStore;
//!
//! let mut history = HistoryStore::new();
//! history.append("north".into());
//! history.append("look".into());
//!
//! assert_eq!(history.recall(-1).map(|l| l.as_str()), Some("look"));
//! assert_eq!(history.recall(-1).map(|l| l.as_str()), Some("north"));
//! assert_eq!(history.recall(-1), None);
//! ```

use console_types::Line;
use tracing::trace;

/// Header emitted above a history listing
pub const HISTORY_HEADER: &str = "HISTORY:";

/// Session command history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStore {
    entries: Vec<Line>,
    cursor: usize,
}

impl HistoryStore {
    /// Creates an empty store with the cursor at the newest edge
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Records a submitted line
    ///
    /// Blank lines are refused. Any recall in progress ends: the cursor moves
    /// back to the newest edge. Returns whether the line was recorded.
    pub fn append(&mut self, line: Line) -> bool {
        if line.is_blank() {
            return false;
        }

        self.entries.push(line);
        self.cursor = self.entries.len();
        trace!(len = self.entries.len(), "history append");
        true
    }

    /// Moves the cursor by `delta` and returns the entry it lands on
    ///
    /// Returns `None` (cursor untouched) when the target is not an existing
    /// entry.
    pub fn recall(&mut self, delta: isize) -> Option<&Line> {
        let candidate = self.cursor.checked_add_signed(delta)?;
        if candidate >= self.entries.len() {
            return None;
        }

        self.cursor = candidate;
        trace!(cursor = self.cursor, "history recall");
        self.entries.get(candidate)
    }

    /// Drops every entry and resets the cursor to zero
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Abandons any recall in progress without touching entries
    pub fn reset_cursor(&mut self) {
        self.cursor = self.entries.len();
    }

    /// Current cursor position, always within `[0, len]`
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.entries.get(index)
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&Line> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[Line] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.entries.iter()
    }

    /// Renders the store as display lines, oldest first
    ///
    /// Each entry is numbered from 1 and shown verbatim.
    pub fn render(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>4}  {}", i + 1, line))
            .collect()
    }
}

impl<'a> IntoIterator for &'a HistoryStore {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
