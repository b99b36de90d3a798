//! Host forwarding sink
//!
//! No peer transport exists yet, so forwarded lines become structured log
//! events under the `consoled::forward` target.

use console_session::{ForwardError, ForwardSink};
use console_types::{Line, SessionId};
use tracing::info;

/// Sink that logs each forwarded line
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    session: Option<SessionId>,
    forwarded: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every event with the owning session
    pub fn for_session(session: SessionId) -> Self {
        Self {
            session: Some(session),
            forwarded: 0,
        }
    }

    /// Number of lines forwarded so far
    pub fn forwarded(&self) -> usize {
        self.forwarded
    }
}

impl ForwardSink for LogSink {
    fn forward(&mut self, line: &Line) -> Result<(), ForwardError> {
        self.forwarded += 1;
        match self.session {
            Some(session) => info!(
                target: "consoled::forward",
                %session,
                seq = self.forwarded,
                line = %line,
                "forward"
            ),
            None => info!(target: "consoled::forward", seq = self.forwarded, line = %line, "forward"),
        }
        Ok(())
    }
}
