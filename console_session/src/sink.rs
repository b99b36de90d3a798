//! Peer forwarding sink
//!
//! Plain-text lines leave the console through a [`ForwardSink`]. Calls are
//! fire-and-forget from the session's point of view: a failure is logged and
//! the input loop carries on.

use console_types::Line;
use thiserror::Error;

/// Forwarding failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForwardError {
    #[error("Peer unavailable: {0}")]
    Unavailable(String),

    #[error("Line rejected by peer: {0}")]
    Rejected(String),
}

/// Destination for lines meant for the peer
pub trait ForwardSink {
    /// Hands one line to the peer
    ///
    /// Must not block the caller.
    fn forward(&mut self, line: &Line) -> Result<(), ForwardError>;
}

impl<T: ForwardSink + ?Sized> ForwardSink for Box<T> {
    fn forward(&mut self, line: &Line) -> Result<(), ForwardError> {
        (**self).forward(line)
    }
}

/// Sink that drops every line
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ForwardSink for NullSink {
    fn forward(&mut self, _line: &Line) -> Result<(), ForwardError> {
        Ok(())
    }
}

/// Sink that keeps every forwarded line
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Vec<Line>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines forwarded so far, oldest first
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl ForwardSink for RecordingSink {
    fn forward(&mut self, line: &Line) -> Result<(), ForwardError> {
        self.lines.push(line.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.forward(&Line::from("a")).unwrap();
        sink.forward(&Line::from("b")).unwrap();
        assert_eq!(sink.lines(), &[Line::from("a"), Line::from("b")]);
    }

    #[test]
    fn test_boxed_sink_forwards() {
        let mut sink: Box<dyn ForwardSink> = Box::new(NullSink);
        assert!(sink.forward(&Line::from("x")).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = ForwardError::Unavailable("not connected".to_string());
        assert_eq!(err.to_string(), "Peer unavailable: not connected");
    }
}
