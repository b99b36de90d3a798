//! # Console Types
//!
//! Shared value types for the duplex console.
//!
//! ## Philosophy
//!
//! - **Events, not bytes**: Keystrokes arrive as logical events, never raw escape sequences
//! - **Values, not handles**: A submitted [`Line`] is immutable once created
//! - **Testable**: Events are serializable and can be injected from scripts
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A terminal decoder (the host translates backend events into [`InputEvent`])
//! - A keyboard layout database

pub mod event;
pub mod ids;
pub mod line;

pub use event::{InputEvent, KeyCode, KeyEvent, KeyState, Modifiers};
pub use ids::SessionId;
pub use line::Line;
