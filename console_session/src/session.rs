//! Input session state machine
//!
//! One submission cycle: read the editor, trim, record, dispatch, render,
//! clear. History recall writes straight back into the editor and never
//! reaches dispatch.

use crate::sink::ForwardSink;
use crate::surface::DisplaySurface;
use console_types::{InputEvent, KeyCode, KeyEvent, Line, SessionId};
use serde::{Deserialize, Serialize};
use services_directives::{CommandDispatcher, DispatchResult, QuitSignal};
use services_history::HistoryStore;
use std::fmt;
use std::ops::ControlFlow;
use tracing::{debug, info, warn};

/// Prefix of the output record written for each forwarded line
pub const FORWARD_RECORD_PREFIX: &str = "input: ";

/// Observable session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Input region has focus and accepts keystrokes
    Editing,
    /// A history step is being applied (never observable between events)
    Recalling,
    /// Quit was requested; further events are ignored
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => write!(f, "editing"),
            Self::Recalling => write!(f, "recalling"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    /// Keep delivering events
    Continue,
    /// Leave the loop
    Quit,
}

/// Session presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Banner written to the output when the session starts
    pub welcome: Option<String>,
    /// Whether forwarded lines are echoed to the output region
    pub echo_forwarded: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            welcome: None,
            echo_forwarded: true,
        }
    }
}

/// Drives one console session
///
/// Owns the history; lends it to directive handlers for the duration of a
/// dispatch.
pub struct InputSession<K: ForwardSink> {
    id: SessionId,
    config: SessionConfig,
    dispatcher: CommandDispatcher,
    history: HistoryStore,
    sink: K,
    state: SessionState,
}

impl<K: ForwardSink> InputSession<K> {
    /// Creates a session in the Editing state with an empty history
    pub fn new(dispatcher: CommandDispatcher, sink: K) -> Self {
        Self {
            id: SessionId::new(),
            config: SessionConfig::default(),
            dispatcher,
            history: HistoryStore::new(),
            sink,
            state: SessionState::Editing,
        }
    }

    /// Replaces the presentation settings
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses a caller-chosen session ID
    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Focuses the input region and writes the welcome banner
    pub fn start<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) {
        info!(session = %self.id, "session started");
        if let Some(welcome) = &self.config.welcome {
            surface.append_output(welcome);
        }
        surface.focus_input();
    }

    /// Routes a logical input event to the matching transition
    pub fn handle_event<S: DisplaySurface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: &InputEvent,
    ) -> SessionControl {
        let Some(key) = event.as_key() else {
            return SessionControl::Continue;
        };

        if self.is_closed() {
            return SessionControl::Quit;
        }
        if !key.is_active() {
            return SessionControl::Continue;
        }

        match key.code {
            KeyCode::Enter => self.on_submit(surface),
            KeyCode::Up => {
                self.on_history_up(surface);
                SessionControl::Continue
            }
            KeyCode::Down => {
                self.on_history_down(surface);
                SessionControl::Continue
            }
            _ if is_quit_key(key) => self.on_quit(),
            _ => {
                surface.edit_input(key);
                SessionControl::Continue
            }
        }
    }

    /// Submits the current editor content
    ///
    /// Blank input is ignored entirely: nothing is recorded or dispatched and
    /// the editor is left as it was.
    pub fn on_submit<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) -> SessionControl {
        if self.is_closed() {
            return SessionControl::Quit;
        }

        let buffer = surface.read_input_buffer();
        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            return SessionControl::Continue;
        }

        let line = Line::from(trimmed);
        let classified = self.dispatcher.classify(&line);
        if self.dispatcher.records_history(&classified) {
            self.history.append(line);
        } else {
            self.history.reset_cursor();
        }

        let control = match self.dispatcher.dispatch(classified, &mut self.history) {
            ControlFlow::Continue(DispatchResult::Handled(ops)) => {
                for op in &ops {
                    surface.apply_output(op);
                }
                SessionControl::Continue
            }
            ControlFlow::Continue(DispatchResult::Forward(line)) => {
                self.forward(surface, &line);
                SessionControl::Continue
            }
            ControlFlow::Break(QuitSignal { output }) => {
                for op in &output {
                    surface.apply_output(op);
                }
                self.close();
                SessionControl::Quit
            }
        };

        surface.clear_input_buffer();
        control
    }

    /// Recalls the previous history entry into the editor
    pub fn on_history_up<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) {
        self.recall(surface, -1);
    }

    /// Recalls the next history entry into the editor
    pub fn on_history_down<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) {
        self.recall(surface, 1);
    }

    /// Ends the session regardless of editor content
    pub fn on_quit(&mut self) -> SessionControl {
        self.close();
        SessionControl::Quit
    }

    fn recall<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S, delta: isize) {
        if self.is_closed() {
            return;
        }

        self.state = SessionState::Recalling;
        if let Some(line) = self.history.recall(delta).cloned() {
            surface.replace_input_buffer(&line);
            surface.set_input_origin(0, 0);
        }
        self.state = SessionState::Editing;
    }

    fn forward<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S, line: &Line) {
        if self.config.echo_forwarded {
            surface.append_output(&format!("{}{}", FORWARD_RECORD_PREFIX, line));
        }
        match self.sink.forward(line) {
            Ok(()) => debug!(session = %self.id, len = line.len(), "line forwarded"),
            Err(e) => warn!(session = %self.id, error = %e, "forwarding failed"),
        }
    }

    fn close(&mut self) {
        if self.state != SessionState::Closed {
            info!(session = %self.id, history = self.history.len(), "session closed");
        }
        self.state = SessionState::Closed;
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.modifiers.is_ctrl() && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
}

impl<K: ForwardSink> fmt::Debug for InputSession<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("history", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySurface;
    use crate::sink::{ForwardError, RecordingSink};
    use console_types::Modifiers;
    use services_history::HISTORY_HEADER;

    fn session() -> InputSession<RecordingSink> {
        InputSession::new(CommandDispatcher::new(), RecordingSink::new())
    }

    fn submit(
        session: &mut InputSession<RecordingSink>,
        surface: &mut MemorySurface,
        text: &str,
    ) -> SessionControl {
        surface.type_text(text);
        session.on_submit(surface)
    }

    #[test]
    fn test_submit_plain_text_forwards_and_records() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        let control = submit(&mut session, &mut surface, "hello");

        assert_eq!(control, SessionControl::Continue);
        assert_eq!(surface.output(), &["input: hello"]);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.sink().lines(), &[Line::from("hello")]);
        assert_eq!(surface.read_input_buffer(), "");
        assert_eq!(session.state(), SessionState::Editing);
    }

    #[test]
    fn test_submit_trims_surrounding_whitespace() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        submit(&mut session, &mut surface, "   kill rat  ");

        assert_eq!(session.history().last().unwrap(), "kill rat");
        assert_eq!(session.sink().lines(), &[Line::from("kill rat")]);
    }

    #[test]
    fn test_blank_submit_changes_nothing() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        let control = submit(&mut session, &mut surface, "   ");

        assert_eq!(control, SessionControl::Continue);
        assert!(session.history().is_empty());
        assert!(surface.output().is_empty());
        assert!(session.sink().lines().is_empty());
        assert_eq!(surface.read_input_buffer(), "   ");
    }

    #[test]
    fn test_print_history_does_not_record_itself() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        submit(&mut session, &mut surface, "a");
        submit(&mut session, &mut surface, "b");
        submit(&mut session, &mut surface, "/print-history");

        assert_eq!(
            surface.output(),
            &["input: a", "input: b", HISTORY_HEADER, "   1  a", "   2  b"]
        );
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_unknown_directive_is_recorded_but_silent() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        let control = submit(&mut session, &mut surface, "/unknown-cmd x");

        assert_eq!(control, SessionControl::Continue);
        assert!(surface.output().is_empty());
        assert_eq!(session.history().len(), 1);
        assert!(session.sink().lines().is_empty());
        assert_eq!(surface.read_input_buffer(), "");
    }

    #[test]
    fn test_clear_history_leaves_empty_store() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        submit(&mut session, &mut surface, "a");
        submit(&mut session, &mut surface, "/clear-history");

        assert!(session.history().is_empty());
        assert_eq!(session.history().cursor(), 0);
    }

    #[test]
    fn test_clear_output_directive() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        submit(&mut session, &mut surface, "a");
        submit(&mut session, &mut surface, "/clear-output");

        assert!(surface.output().is_empty());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_quit_directive_closes_session() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        let control = submit(&mut session, &mut surface, "/quit");

        assert_eq!(control, SessionControl::Quit);
        assert!(session.is_closed());
        assert_eq!(surface.read_input_buffer(), "");

        // A closed session ignores further submissions.
        surface.type_text("hello");
        assert_eq!(session.on_submit(&mut surface), SessionControl::Quit);
        assert!(session.sink().lines().is_empty());
    }

    #[test]
    fn test_history_up_and_down() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        submit(&mut session, &mut surface, "first");
        submit(&mut session, &mut surface, "second");

        session.on_history_up(&mut surface);
        assert_eq!(surface.read_input_buffer(), "second");
        session.on_history_up(&mut surface);
        assert_eq!(surface.read_input_buffer(), "first");

        // Oldest edge: editor untouched.
        session.on_history_up(&mut surface);
        assert_eq!(surface.read_input_buffer(), "first");

        session.on_history_down(&mut surface);
        assert_eq!(surface.read_input_buffer(), "second");

        // Newest entry: stepping down is refused and the editor keeps "second".
        session.on_history_down(&mut surface);
        assert_eq!(surface.read_input_buffer(), "second");
        assert_eq!(session.state(), SessionState::Editing);
    }

    #[test]
    fn test_recall_resets_view_origin() {
        let mut session = session();
        let mut surface = MemorySurface::new();
        submit(&mut session, &mut surface, "north");

        surface.set_input_origin(7, 0);
        session.on_history_up(&mut surface);

        assert_eq!(surface.editor().origin(), (0, 0));
    }

    #[test]
    fn test_recalled_long_line_shows_its_start() {
        let mut session = session();
        let mut surface = MemorySurface::new();
        submit(&mut session, &mut surface, "abcdefghijklmnop");

        session.on_history_up(&mut surface);
        let (visible, _) = surface.editor_mut().viewport(4);

        assert_eq!(visible, "abcd");
        assert_eq!(surface.editor().origin(), (0, 0));
        assert_eq!(surface.read_input_buffer(), "abcdefghijklmnop");
    }

    #[test]
    fn test_recall_with_empty_history_leaves_editor() {
        let mut session = session();
        let mut surface = MemorySurface::new();
        surface.type_text("draft");

        session.on_history_up(&mut surface);
        session.on_history_down(&mut surface);

        assert_eq!(surface.read_input_buffer(), "draft");
    }

    #[test]
    fn test_on_quit_ignores_editor_content() {
        let mut session = session();
        let mut surface = MemorySurface::new();
        surface.type_text("unsent");

        assert_eq!(session.on_quit(), SessionControl::Quit);
        assert!(session.is_closed());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_handle_event_routing() {
        let mut session = session();
        let mut surface = MemorySurface::new();

        for c in "hi".chars() {
            let control = session.handle_event(&mut surface, &InputEvent::key(KeyEvent::char(c)));
            assert_eq!(control, SessionControl::Continue);
        }
        assert_eq!(surface.read_input_buffer(), "hi");

        let enter = InputEvent::key(KeyEvent::pressed(KeyCode::Enter, Modifiers::none()));
        session.handle_event(&mut surface, &enter);
        assert_eq!(session.sink().lines(), &[Line::from("hi")]);

        let up = InputEvent::key(KeyEvent::pressed(KeyCode::Up, Modifiers::none()));
        session.handle_event(&mut surface, &up);
        assert_eq!(surface.read_input_buffer(), "hi");

        let release = InputEvent::key(KeyEvent::released(KeyCode::Enter, Modifiers::none()));
        session.handle_event(&mut surface, &release);
        assert_eq!(session.history().len(), 1);

        let ctrl_q = InputEvent::key(KeyEvent::pressed(KeyCode::Char('q'), Modifiers::CTRL));
        assert_eq!(session.handle_event(&mut surface, &ctrl_q), SessionControl::Quit);
        assert_eq!(
            session.handle_event(&mut surface, &InputEvent::key(KeyEvent::char('x'))),
            SessionControl::Quit
        );
    }

    #[test]
    fn test_start_writes_welcome_and_focuses() {
        let config = SessionConfig {
            welcome: Some("Welcome!".to_string()),
            echo_forwarded: true,
        };
        let mut session = session().with_config(config);
        let mut surface = MemorySurface::new();

        session.start(&mut surface);

        assert_eq!(surface.output(), &["Welcome!"]);
        assert!(surface.is_input_focused());
    }

    #[test]
    fn test_echo_can_be_disabled() {
        let config = SessionConfig {
            welcome: None,
            echo_forwarded: false,
        };
        let mut session = session().with_config(config);
        let mut surface = MemorySurface::new();

        submit(&mut session, &mut surface, "quiet");

        assert!(surface.output().is_empty());
        assert_eq!(session.sink().lines(), &[Line::from("quiet")]);
    }

    struct FailingSink;

    impl ForwardSink for FailingSink {
        fn forward(&mut self, _line: &Line) -> Result<(), ForwardError> {
            Err(ForwardError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_sink_failure_does_not_stop_session() {
        let mut session = InputSession::new(CommandDispatcher::new(), FailingSink);
        let mut surface = MemorySurface::new();

        surface.type_text("hello");
        let control = session.on_submit(&mut surface);

        assert_eq!(control, SessionControl::Continue);
        assert_eq!(surface.output(), &["input: hello"]);
        assert_eq!(session.history().len(), 1);
        assert_eq!(surface.read_input_buffer(), "");
    }
}
