//! # Console Session
//!
//! The input half of the two-pane console: key routing, submission cycle,
//! history recall and peer forwarding.
//!
//! ## Philosophy
//!
//! - **Surfaces are capabilities**: The session talks to a [`DisplaySurface`], never to a terminal
//! - **One owner**: The session owns its history and lends it to directives during dispatch
//! - **Forwarding never blocks the loop**: Sink failures are logged and dropped
//! - **Headless first**: [`MemorySurface`] makes every transition testable without a screen
//!
//! ## Non-Goals
//!
//! - Multi-line editing
//! - Reverse history search
//! - Tab completion

pub mod editor;
pub mod memory;
pub mod session;
pub mod sink;
pub mod surface;

pub use editor::LineEditor;
pub use memory::MemorySurface;
pub use session::{
    InputSession, SessionConfig, SessionControl, SessionState, FORWARD_RECORD_PREFIX,
};
pub use sink::{ForwardError, ForwardSink, NullSink, RecordingSink};
pub use surface::DisplaySurface;
