//! # Input Script Parser
//!
//! Scripted keyboard input for headless runs and demos.
//!
//! ## Format
//!
//! Scripts are line-based, with each line representing one input action:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Delete`, `Tab`, `Space`
//! - Navigation: `Up`, `Down`, `Left`, `Right`, `Home`, `End`, `PageUp`, `PageDown`
//! - Single characters: `a`, `/`, `7`
//! - Modifiers: `Ctrl+q`, `Alt+x`, `Shift+a`
//! - Text strings: `"say hello"` (expanded to individual key presses)
//! - Comments: `# This is a comment`
//! - Delays: `wait 100ms` (pacing for demos)
//!
//! ## Example
//!
//! ```text
//! # Send a line, then show history
//! "look"
//! Enter
//! "/print-history"
//! Enter
//! Ctrl+q
//! ```

use console_types::{InputEvent, KeyCode, KeyEvent, Modifiers};
use std::collections::VecDeque;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,

    #[error("Invalid delay format: {0}")]
    InvalidDelay(String),
}

/// A single scripted input action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    /// A single key press
    Key(KeyCode, Modifiers),
    /// Wait for a duration (in milliseconds)
    Wait(u64),
}

/// Input script
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    inputs: VecDeque<ScriptedInput>,
}

impl InputScript {
    /// Creates a new empty input script
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut inputs = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            inputs.extend(Self::parse_line(line, line_num + 1)?);
        }

        if inputs.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { inputs })
    }

    fn parse_line(line: &str, line_num: usize) -> Result<Vec<ScriptedInput>, InputScriptError> {
        if let Some(duration) = line.strip_prefix("wait ") {
            let millis =
                Self::parse_duration(duration).map_err(|e| InputScriptError::ParseError {
                    line: line_num,
                    message: e.to_string(),
                })?;
            return Ok(vec![ScriptedInput::Wait(millis)]);
        }

        if let Some(text) = line
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            return Ok(text
                .chars()
                .map(|c| ScriptedInput::Key(KeyCode::Char(c), Modifiers::none()))
                .collect());
        }

        let (modifiers, key_name) = Self::parse_modifiers(line)?;
        let keycode = Self::parse_keycode(key_name).map_err(|e| InputScriptError::ParseError {
            line: line_num,
            message: e.to_string(),
        })?;

        Ok(vec![ScriptedInput::Key(keycode, modifiers)])
    }

    /// Splits modifiers from a key string (`Ctrl+q` → (CTRL, "q"))
    ///
    /// A lone `+` is the plus key, not a separator.
    fn parse_modifiers(input: &str) -> Result<(Modifiers, &str), InputScriptError> {
        let mut modifiers = Modifiers::none();
        let Some((prefix, key)) = input.rsplit_once('+') else {
            return Ok((modifiers, input));
        };
        if prefix.is_empty() {
            return Ok((modifiers, input));
        }
        let key = if key.is_empty() { "+" } else { key.trim() };

        for modifier_str in prefix.split('+').filter(|s| !s.is_empty()) {
            modifiers = match modifier_str.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.with(Modifiers::CTRL),
                "alt" => modifiers.with(Modifiers::ALT),
                "shift" => modifiers.with(Modifiers::SHIFT),
                "super" | "meta" => modifiers.with(Modifiers::META),
                other => return Err(InputScriptError::InvalidModifier(other.to_string())),
            };
        }

        Ok((modifiers, key))
    }

    fn parse_keycode(name: &str) -> Result<KeyCode, InputScriptError> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeyCode::Char(c));
        }

        let lower = name.to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Ok(KeyCode::Enter),
            "escape" | "esc" => Ok(KeyCode::Escape),
            "backspace" | "back" => Ok(KeyCode::Backspace),
            "delete" | "del" => Ok(KeyCode::Delete),
            "insert" | "ins" => Ok(KeyCode::Insert),
            "tab" => Ok(KeyCode::Tab),
            "space" => Ok(KeyCode::Char(' ')),

            "up" | "arrowup" => Ok(KeyCode::Up),
            "down" | "arrowdown" => Ok(KeyCode::Down),
            "left" | "arrowleft" => Ok(KeyCode::Left),
            "right" | "arrowright" => Ok(KeyCode::Right),
            "home" => Ok(KeyCode::Home),
            "end" => Ok(KeyCode::End),
            "pageup" | "pgup" => Ok(KeyCode::PageUp),
            "pagedown" | "pgdn" => Ok(KeyCode::PageDown),

            _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                Some(n @ 1..=12) => Ok(KeyCode::F(n)),
                _ => Err(InputScriptError::InvalidKeyName(name.to_string())),
            },
        }
    }

    /// Parses a duration string (e.g., "100ms", "1s")
    fn parse_duration(s: &str) -> Result<u64, InputScriptError> {
        let s = s.trim().to_lowercase();

        if let Some(ms_str) = s.strip_suffix("ms") {
            ms_str
                .trim()
                .parse::<u64>()
                .map_err(|_| InputScriptError::InvalidDelay(s.clone()))
        } else if let Some(s_str) = s.strip_suffix('s') {
            s_str
                .trim()
                .parse::<u64>()
                .ok()
                .and_then(|secs| secs.checked_mul(1000))
                .ok_or_else(|| InputScriptError::InvalidDelay(s.clone()))
        } else {
            Err(InputScriptError::InvalidDelay(s))
        }
    }

    /// Returns the next input, if any
    pub fn next_input(&mut self) -> Option<ScriptedInput> {
        self.inputs.pop_front()
    }

    /// Returns true if the script has more inputs
    pub fn has_more(&self) -> bool {
        !self.inputs.is_empty()
    }

    /// Returns the number of remaining inputs
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// Converts a scripted input to an InputEvent
    pub fn to_input_event(input: &ScriptedInput) -> Option<InputEvent> {
        match input {
            ScriptedInput::Key(code, modifiers) => {
                Some(InputEvent::key(KeyEvent::pressed(*code, *modifiers)))
            }
            ScriptedInput::Wait(_) => None,
        }
    }
}
