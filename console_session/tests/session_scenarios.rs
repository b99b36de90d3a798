//! End-to-end session scenarios driven through key events

use console_session::{
    DisplaySurface, ForwardError, ForwardSink, InputSession, MemorySurface, RecordingSink,
    SessionControl, SessionState,
};
use console_types::{InputEvent, KeyCode, KeyEvent, Line, Modifiers};
use services_directives::{
    CommandDispatcher, DirectiveContext, DirectiveDescriptor, DirectiveRegistry, DispatcherConfig,
};
use services_history::HISTORY_HEADER;

fn key(code: KeyCode) -> InputEvent {
    InputEvent::key(KeyEvent::pressed(code, Modifiers::none()))
}

fn type_line<K: ForwardSink>(
    session: &mut InputSession<K>,
    surface: &mut MemorySurface,
    text: &str,
) -> SessionControl {
    for c in text.chars() {
        session.handle_event(surface, &InputEvent::key(KeyEvent::char(c)));
    }
    session.handle_event(surface, &key(KeyCode::Enter))
}

#[test]
fn test_forwarded_line_scenario() {
    let mut session = InputSession::new(CommandDispatcher::new(), RecordingSink::new());
    let mut surface = MemorySurface::new();
    session.start(&mut surface);

    type_line(&mut session, &mut surface, "hello");

    assert_eq!(surface.output(), &["input: hello"]);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.sink().lines(), &[Line::from("hello")]);
    assert_eq!(surface.read_input_buffer(), "");
}

#[test]
fn test_print_history_scenario() {
    let mut session = InputSession::new(CommandDispatcher::new(), RecordingSink::new());
    let mut surface = MemorySurface::new();

    type_line(&mut session, &mut surface, "a");
    type_line(&mut session, &mut surface, "b");
    surface.clear_output();
    type_line(&mut session, &mut surface, "/print-history");

    assert_eq!(surface.output(), &[HISTORY_HEADER, "   1  a", "   2  b"]);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_unknown_directive_scenario() {
    let mut session = InputSession::new(CommandDispatcher::new(), RecordingSink::new());
    let mut surface = MemorySurface::new();

    let before = session.history().len();
    let control = type_line(&mut session, &mut surface, "/unknown-cmd x");

    assert_eq!(control, SessionControl::Continue);
    assert!(surface.output().is_empty());
    assert_eq!(session.history().len(), before + 1);
    assert!(session.sink().lines().is_empty());
}

#[test]
fn test_whitespace_submission_scenario() {
    let mut session = InputSession::new(CommandDispatcher::new(), RecordingSink::new());
    let mut surface = MemorySurface::new();

    type_line(&mut session, &mut surface, "  \t ");

    assert!(session.history().is_empty());
    assert!(surface.output().is_empty());
    assert_eq!(surface.read_input_buffer(), "  \t ");
}

#[test]
fn test_recall_after_editing() {
    let mut session = InputSession::new(CommandDispatcher::new(), RecordingSink::new());
    let mut surface = MemorySurface::new();

    type_line(&mut session, &mut surface, "look");
    type_line(&mut session, &mut surface, "take lamp");

    session.handle_event(&mut surface, &key(KeyCode::Up));
    session.handle_event(&mut surface, &key(KeyCode::Up));
    assert_eq!(surface.read_input_buffer(), "look");

    // Edit the recalled line and resubmit it.
    session.handle_event(&mut surface, &key(KeyCode::Backspace));
    session.handle_event(&mut surface, &InputEvent::key(KeyEvent::char('k')));
    session.handle_event(&mut surface, &key(KeyCode::Enter));

    assert_eq!(session.history().last().unwrap(), "look");
    assert_eq!(session.history().len(), 3);
    assert_eq!(session.history().cursor(), 3);
}

#[test]
fn test_quit_scenario() {
    let mut session = InputSession::new(CommandDispatcher::new(), RecordingSink::new());
    let mut surface = MemorySurface::new();

    type_line(&mut session, &mut surface, "north");
    let control = type_line(&mut session, &mut surface, "/quit");

    assert_eq!(control, SessionControl::Quit);
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.sink().lines(), &[Line::from("north")]);
}

#[test]
fn test_ctrl_c_quits_with_pending_input() {
    let mut session = InputSession::new(CommandDispatcher::new(), RecordingSink::new());
    let mut surface = MemorySurface::new();

    for c in "half typed".chars() {
        session.handle_event(&mut surface, &InputEvent::key(KeyEvent::char(c)));
    }
    let ctrl_c = InputEvent::key(KeyEvent::pressed(KeyCode::Char('c'), Modifiers::CTRL));

    assert_eq!(session.handle_event(&mut surface, &ctrl_c), SessionControl::Quit);
    assert!(session.sink().lines().is_empty());
}

struct FlakySink {
    calls: usize,
}

impl ForwardSink for FlakySink {
    fn forward(&mut self, _line: &Line) -> Result<(), ForwardError> {
        self.calls += 1;
        if self.calls % 2 == 1 {
            Err(ForwardError::Rejected("busy".to_string()))
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_sink_failures_are_absorbed() {
    let mut session = InputSession::new(CommandDispatcher::new(), FlakySink { calls: 0 });
    let mut surface = MemorySurface::new();

    for line in ["one", "two", "three"] {
        let control = type_line(&mut session, &mut surface, line);
        assert_eq!(control, SessionControl::Continue);
    }

    assert_eq!(session.sink().calls, 3);
    assert_eq!(session.history().len(), 3);
    assert_eq!(
        surface.output(),
        &["input: one", "input: two", "input: three"]
    );
}

#[test]
fn test_custom_directive_and_prefix() {
    let mut registry = DirectiveRegistry::with_builtins();
    registry
        .register(
            DirectiveDescriptor::new("echo", "Repeat the arguments"),
            Box::new(|args: &[String], ctx: &mut DirectiveContext<'_>| {
                ctx.append(args.join(" "))
            }),
        )
        .unwrap();
    let dispatcher = CommandDispatcher::with_registry(DispatcherConfig { prefix: ':' }, registry);
    let mut session = InputSession::new(dispatcher, RecordingSink::new());
    let mut surface = MemorySurface::new();

    type_line(&mut session, &mut surface, ":echo over there");
    type_line(&mut session, &mut surface, "/echo not a directive");

    assert_eq!(
        surface.output(),
        &["over there", "input: /echo not a directive"]
    );
    assert_eq!(session.history().len(), 2);
}
