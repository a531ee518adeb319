//! Pacing engine: turns a text and a target speed into human-like keystrokes.
//!
//! # Overview
//!
//! * [`Cadence`] computes each inter-character delay (jitter, bursts,
//!   micro-pauses, punctuation pauses).
//! * [`PacingEngine`] runs the character loop: poll the [`CancelToken`],
//!   emit through a [`CharSink`], post a [`PacingEvent`], sleep.
//! * [`TypingRequest`] bundles the text, the clamped speed and the stop flag.
//!
//! The engine never touches preferences, the UI or the platform keyboard
//! directly; all of that is supplied by the caller.
//!
//! # Usage
//!
//! ```
//! use tokio::sync::mpsc;
//! use typing_buddy::pacing::{PacingEngine, PacingEvent, TypingRequest};
//!
//! let (tx, mut rx) = mpsc::unbounded_channel::<PacingEvent>();
//! let request = TypingRequest::new("hi", 600);
//! let mut typed = String::new();
//!
//! let completed = PacingEngine::new().run(&request, &mut |ch: char| typed.push(ch), &tx);
//!
//! assert!(completed);
//! assert_eq!(typed, "hi");
//! assert_eq!(
//!     rx.try_recv().unwrap(),
//!     PacingEvent::Progress { current: 1, total: 2 }
//! );
//! ```

pub mod cadence;
pub mod cancel;
pub mod engine;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use cadence::{
    base_interval_secs, effective_wpm, is_pause_char, Cadence, CHARS_PER_WORD, MIN_DELAY_SECS,
    MIN_WPM,
};
pub use cancel::CancelToken;
pub use engine::{CharSink, PacingEngine, PacingEvent, Sleeper, ThreadSleeper, TypingRequest};
