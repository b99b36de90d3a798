//! In-memory display surface
//!
//! Backs headless runs and tests. Nothing is drawn; the output log and the
//! editor are plain values that can be inspected afterwards.

use crate::editor::LineEditor;
use crate::surface::DisplaySurface;
use console_types::KeyEvent;

/// Display surface held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    output: Vec<String>,
    editor: LineEditor,
    focused: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output lines, oldest first
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Output joined with newlines
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut LineEditor {
        &mut self.editor
    }

    pub fn is_input_focused(&self) -> bool {
        self.focused
    }

    /// Types `text` into the editor one character at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.editor.apply_key(&KeyEvent::char(c));
        }
    }
}

impl DisplaySurface for MemorySurface {
    fn append_output(&mut self, text: &str) {
        self.output.extend(text.split('\n').map(str::to_string));
    }

    fn clear_output(&mut self) {
        self.output.clear();
    }

    fn read_input_buffer(&self) -> String {
        self.editor.text().to_string()
    }

    fn replace_input_buffer(&mut self, text: &str) {
        self.editor.set_text(text);
    }

    fn clear_input_buffer(&mut self) {
        self.editor.clear();
    }

    fn set_input_origin(&mut self, x: usize, y: usize) {
        self.editor.set_origin(x, y);
    }

    fn focus_input(&mut self) {
        self.focused = true;
    }

    fn edit_input(&mut self, key: &KeyEvent) {
        self.editor.apply_key(key);
    }
}
