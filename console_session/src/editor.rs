//! Single-line edit buffer
//!
//! Cursor positions are character indices, not byte offsets.

use console_types::{KeyCode, KeyEvent};
use unicode_width::UnicodeWidthChar;

/// Display columns taken by `ch`; control characters count as zero
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Editable input line with a cursor and a view origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    cursor: usize,
    origin: (usize, usize),
    /// Origin was set explicitly and holds until the next edit or cursor move
    pinned: bool,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// View origin as (column, row)
    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Replaces the whole buffer; the cursor lands after the last character
    pub fn set_text(&mut self, text: &str) {
        self.pinned = false;
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.pinned = false;
        self.text.clear();
        self.cursor = 0;
        self.origin = (0, 0);
    }

    /// Moves the view origin and holds it there until the next edit
    pub fn set_origin(&mut self, x: usize, y: usize) {
        self.origin = (x, y);
        self.pinned = true;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.pinned = false;
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor
    pub fn backspace(&mut self) -> bool {
        self.pinned = false;
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Deletes the character under the cursor
    pub fn delete(&mut self) -> bool {
        self.pinned = false;
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.pinned = false;
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.pinned = false;
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.pinned = false;
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.pinned = false;
        self.cursor = self.char_len();
    }

    /// Deletes everything before the cursor
    pub fn kill_to_start(&mut self) {
        self.pinned = false;
        let at = self.byte_index(self.cursor);
        self.text.drain(..at);
        self.cursor = 0;
    }

    /// Applies an editing key
    ///
    /// Returns false for keys the editor does not handle. Releases are ignored.
    pub fn apply_key(&mut self, key: &KeyEvent) -> bool {
        if key.is_released() {
            return false;
        }

        let ctrl = key.modifiers.is_ctrl();
        match key.code {
            KeyCode::Char('u') if ctrl => self.kill_to_start(),
            KeyCode::Char('a') if ctrl => self.move_home(),
            KeyCode::Char('e') if ctrl => self.move_end(),
            KeyCode::Char(_) if ctrl || key.modifiers.is_alt() => return false,
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => {
                self.backspace();
            }
            KeyCode::Delete => {
                self.delete();
            }
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Escape => self.clear(),
            _ => return false,
        }
        true
    }

    /// Adjusts the horizontal origin so the cursor fits in `width` columns
    ///
    /// Widths are display columns, so wide characters take two. Returns the
    /// visible slice and the cursor column within it. A pinned origin is kept
    /// as is, and the column is `None` when that leaves the cursor off screen.
    pub fn viewport(&mut self, width: usize) -> (String, Option<usize>) {
        let width = width.max(1);
        let chars: Vec<char> = self.text.chars().collect();
        let (mut x, y) = self.origin;
        x = x.min(chars.len());

        // The cursor cell is the character under it, or one blank column at the end
        let cursor_cell = chars.get(self.cursor).map_or(1, |&c| char_width(c).max(1));
        let span = |from: usize, to: usize| -> usize {
            chars[from..to].iter().map(|&c| char_width(c)).sum()
        };
        if !self.pinned {
            if self.cursor < x {
                x = self.cursor;
            }
            while x < self.cursor && span(x, self.cursor) + cursor_cell > width {
                x += 1;
            }
        }
        self.origin = (x, y);

        let mut used = 0;
        let mut visible = String::new();
        for &c in &chars[x..] {
            let w = char_width(c);
            if used + w > width {
                break;
            }
            used += w;
            visible.push(c);
        }

        let column = (self.cursor >= x)
            .then(|| span(x, self.cursor))
            .filter(|&col| col + cursor_cell <= width);
        (visible, column)
    }
}
