//! Display surface capability
//!
//! The session never draws. It asks a surface to append output and to read
//! or replace the input line; how that appears on screen is the surface's
//! business.

use console_types::KeyEvent;
use services_directives::OutputOp;

/// Two-region display: an output log and a one-line input editor
pub trait DisplaySurface {
    /// Appends text to the output region; embedded newlines start new lines
    fn append_output(&mut self, text: &str);

    /// Erases the output region
    fn clear_output(&mut self);

    /// Returns the current input buffer content
    fn read_input_buffer(&self) -> String;

    /// Replaces the input buffer content verbatim
    fn replace_input_buffer(&mut self, text: &str);

    /// Empties the input buffer
    fn clear_input_buffer(&mut self);

    /// Moves the input editor's view origin
    fn set_input_origin(&mut self, x: usize, y: usize);

    /// Gives the input region keyboard focus
    fn focus_input(&mut self);

    /// Applies a raw editing key (characters, cursor movement, deletion)
    fn edit_input(&mut self, key: &KeyEvent);

    /// Applies a directive output operation
    fn apply_output(&mut self, op: &OutputOp) {
        match op {
            OutputOp::Append(text) => self.append_output(text),
            OutputOp::Clear => self.clear_output(),
        }
    }
}
