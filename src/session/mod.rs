//! Typing session module: everything between a button press and the engine.
//!
//! # Architecture
//!
//! ```text
//! UI (egui update loop)
//!   │ TypingSession::start_system / start_preview
//!   ▼
//! typing-worker thread
//!   ├─ countdown (System mode)      ── Countdown { remaining } ──┐
//!   ├─ build sink                   ── Failed / Started ─────────┤
//!   └─ PacingEngine::run            ── Typed / Progress ─────────┤
//!                                   ── Finished { completed } ───┤
//!                                                                ▼
//!                              UnboundedReceiver<SessionEvent> (drained each frame)
//! ```
//!
//! [`SessionState`] is the UI-side view of where the current session is.

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{SessionError, SessionEvent, SessionMode, TypingSession};
pub use state::SessionState;
