//! # Terminal Surface
//!
//! Two-pane terminal display built on crossterm and ratatui: a scrolling
//! output pane over a one-line input pane.
//!
//! [`TerminalView`] holds all display state and implements
//! [`DisplaySurface`]; it only touches the terminal inside [`TerminalView::render`].
//! [`TerminalGuard`] owns raw mode and the alternate screen.

use console_session::{DisplaySurface, ForwardSink, InputSession, LineEditor, SessionControl};
use console_types::{InputEvent, KeyCode, KeyEvent, KeyState, Modifiers};
use crossterm::event::{self, Event, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use std::collections::VecDeque;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use unicode_width::UnicodeWidthChar;

/// Poll interval of the terminal event loop
const TICK_RATE: Duration = Duration::from_millis(100);

/// Terminal error types
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("Console requires an interactive terminal (TTY)")]
    NotATerminal,

    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Display state of the two-pane console
#[derive(Debug, Clone)]
pub struct TerminalView {
    output: VecDeque<String>,
    output_limit: usize,
    editor: LineEditor,
    /// Rows scrolled back from the newest output; 0 follows new output
    scroll: usize,
    /// Height of the output pane at the last render
    page: usize,
    focused: bool,
}

impl TerminalView {
    /// Creates a view retaining at most `output_limit` output lines
    pub fn new(output_limit: usize) -> Self {
        Self {
            output: VecDeque::new(),
            output_limit: output_limit.max(1),
            editor: LineEditor::new(),
            scroll: 0,
            page: 10,
            focused: false,
        }
    }

    pub fn output(&self) -> impl Iterator<Item = &str> {
        self.output.iter().map(String::as_str)
    }

    pub fn output_len(&self) -> usize {
        self.output.len()
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_input_focused(&self) -> bool {
        self.focused
    }

    /// Scrolls back by one page
    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_add(self.page.saturating_sub(1).max(1));
    }

    /// Scrolls forward by one page; reaching the bottom resumes autoscroll
    pub fn page_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(self.page.saturating_sub(1).max(1));
    }

    /// Output wrapped to `width` display columns, one entry per screen row
    fn wrapped_rows(&self, width: usize) -> Vec<String> {
        let width = width.max(1);
        let mut rows = Vec::new();
        for line in &self.output {
            let mut row = String::new();
            let mut used = 0;
            for c in line.chars() {
                let w = UnicodeWidthChar::width(c).unwrap_or(0);
                if used + w > width && !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                    used = 0;
                }
                row.push(c);
                used += w;
            }
            rows.push(row);
        }
        rows
    }

    /// Rows visible in a `width` x `height` output pane
    ///
    /// Clamps the scroll offset to the available scrollback.
    pub fn visible_rows(&mut self, width: usize, height: usize) -> Vec<String> {
        let rows = self.wrapped_rows(width);
        let max_scroll = rows.len().saturating_sub(height);
        self.scroll = self.scroll.min(max_scroll);

        let end = rows.len() - self.scroll;
        let start = end.saturating_sub(height);
        rows[start..end].to_vec()
    }

    /// Draws both panes and places the cursor in the input pane
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(frame.area());

        self.render_output(frame, chunks[0]);
        self.render_input(frame, chunks[1]);
    }

    fn render_output(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(2) as usize;
        let height = area.height.saturating_sub(2) as usize;
        self.page = height.max(1);

        let rows = self.visible_rows(width, height);
        let title = if self.scroll > 0 {
            format!(" output (+{}) ", self.scroll)
        } else {
            " output ".to_string()
        };

        let paragraph = Paragraph::new(rows.join("\n"))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
    }

    fn render_input(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(2) as usize;
        let (visible, column) = self.editor.viewport(width);

        let paragraph =
            Paragraph::new(visible).block(Block::default().borders(Borders::ALL).title(" input "));
        frame.render_widget(paragraph, area);

        if let (true, Some(column)) = (self.focused, column) {
            let x = area.x + 1 + column as u16;
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl DisplaySurface for TerminalView {
    fn append_output(&mut self, text: &str) {
        for line in text.split('\n') {
            self.output.push_back(line.to_string());
        }
        while self.output.len() > self.output_limit {
            self.output.pop_front();
        }
    }

    fn clear_output(&mut self) {
        self.output.clear();
        self.scroll = 0;
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
        match key.code {
            KeyCode::PageUp if key.is_active() => self.page_up(),
            KeyCode::PageDown if key.is_active() => self.page_down(),
            _ => {
                self.editor.apply_key(key);
            }
        }
    }
}

/// Converts a crossterm key event into a console key event
///
/// Keys the console has no use for map to `None`.
pub fn translate_key(event: &event::KeyEvent) -> Option<KeyEvent> {
    use crossterm::event::KeyCode as Ct;

    let code = match event.code {
        Ct::Char(c) => KeyCode::Char(c),
        Ct::Enter => KeyCode::Enter,
        Ct::Esc => KeyCode::Escape,
        Ct::Tab => KeyCode::Tab,
        Ct::Backspace => KeyCode::Backspace,
        Ct::Delete => KeyCode::Delete,
        Ct::Insert => KeyCode::Insert,
        Ct::Home => KeyCode::Home,
        Ct::End => KeyCode::End,
        Ct::PageUp => KeyCode::PageUp,
        Ct::PageDown => KeyCode::PageDown,
        Ct::Up => KeyCode::Up,
        Ct::Down => KeyCode::Down,
        Ct::Left => KeyCode::Left,
        Ct::Right => KeyCode::Right,
        Ct::F(n) => KeyCode::F(n),
        _ => return None,
    };

    let mut modifiers = Modifiers::none();
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        modifiers = modifiers.with(Modifiers::CTRL);
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        modifiers = modifiers.with(Modifiers::ALT);
    }
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        modifiers = modifiers.with(Modifiers::SHIFT);
    }
    if event.modifiers.contains(KeyModifiers::META) || event.modifiers.contains(KeyModifiers::SUPER)
    {
        modifiers = modifiers.with(Modifiers::META);
    }

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Pressed,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Released,
    };

    Some(KeyEvent::new(code, modifiers, state))
}

/// Raw-mode alternate-screen terminal, restored on drop
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalGuard {
    /// Switches the terminal into raw mode on the alternate screen
    pub fn enter() -> Result<Self, TerminalError> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(TerminalError::NotATerminal);
        }

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(e.into());
            }
        };

        debug!("terminal entered raw mode");
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Draws one frame of `view`
    pub fn draw(&mut self, view: &mut TerminalView) -> Result<(), TerminalError> {
        self.terminal.draw(|frame| view.render(frame))?;
        Ok(())
    }

    /// Leaves raw mode and the alternate screen
    pub fn restore(&mut self) -> Result<(), TerminalError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        debug!("terminal restored");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Runs the interactive loop until the session quits
///
/// `max_steps` of 0 means unlimited. Returns the number of routed events.
pub fn run_terminal<K: ForwardSink>(
    session: &mut InputSession<K>,
    view: &mut TerminalView,
    max_steps: usize,
) -> Result<usize, TerminalError> {
    let mut guard = TerminalGuard::enter()?;
    session.start(view);

    let result = event_loop(&mut guard, session, view, max_steps);
    guard.restore()?;
    result
}

fn event_loop<K: ForwardSink>(
    guard: &mut TerminalGuard,
    session: &mut InputSession<K>,
    view: &mut TerminalView,
    max_steps: usize,
) -> Result<usize, TerminalError> {
    let mut steps = 0;

    loop {
        guard.draw(view)?;

        if max_steps > 0 && steps >= max_steps {
            info!(steps, "step limit reached");
            break;
        }
        if !event::poll(TICK_RATE)? {
            continue;
        }

        // Resize and other events only need a redraw.
        let Event::Key(raw) = event::read()? else {
            continue;
        };
        let Some(key) = translate_key(&raw) else {
            continue;
        };

        steps += 1;
        if session.handle_event(view, &InputEvent::key(key)) == SessionControl::Quit {
            break;
        }
    }

    Ok(steps)
}
