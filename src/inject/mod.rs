//! Emission sinks: where typed characters actually go.
//!
//! # Overview
//!
//! * [`KeyboardSink`] drives the OS keyboard through `enigo`, typing into
//!   whichever window has focus (system-wide mode).
//! * [`PreviewSink`] posts characters to the UI's preview pane.
//!
//! Both implement [`CharSink`](crate::pacing::CharSink). Keyboard driver
//! problems are reported by [`KeyboardSink::probe`] / [`KeyboardSink::new`]
//! before a run starts; once running, per-character failures are logged and
//! skipped.
//!
//! # Usage
//!
//! ```no_run
//! use typing_buddy::inject::KeyboardSink;
//! use typing_buddy::pacing::CharSink;
//!
//! let mut sink = KeyboardSink::new().expect("keyboard unavailable");
//! for ch in "hello\n".chars() {
//!     sink.emit(ch);
//! }
//! ```

pub mod keyboard;
pub mod preview;

pub use keyboard::{stroke_for, KeyboardSink, Stroke};
pub use preview::PreviewSink;

use thiserror::Error;

// ---------------------------------------------------------------------------
// InjectError
// ---------------------------------------------------------------------------

/// Errors raised by the system keyboard sink.
#[derive(Debug, Clone, Error)]
pub enum InjectError {
    /// The platform keyboard driver could not be opened.
    #[error("keyboard driver unavailable: {0}")]
    KeyboardInit(String),

    /// A key press/release or text event could not be delivered.
    #[error("cannot simulate key press: {0}")]
    KeySimulation(String),
}
