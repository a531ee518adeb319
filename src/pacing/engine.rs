//! The pacing run loop.
//!
//! [`PacingEngine::run`] walks a [`TypingRequest`] one character at a time:
//!
//! ```text
//! for each char (index i)
//!   ├─ cancelled?  → post Done { completed: false }, return false
//!   ├─ sink.emit(ch)
//!   ├─ post Progress { current: i + 1, total }
//!   └─ sleeper.sleep(cadence.next_delay(i, ch))
//! post Done { completed: true }, return true
//! ```
//!
//! Progress and completion are posted as [`PacingEvent`]s on an unbounded
//! channel instead of calling back into the UI from the worker thread. A
//! closed receiver is ignored, so a vanished listener can never abort or
//! corrupt a run.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::UnboundedSender;

use super::cadence::{effective_wpm, Cadence};
use super::cancel::CancelToken;

// ---------------------------------------------------------------------------
// PacingEvent
// ---------------------------------------------------------------------------

/// Notifications posted by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingEvent {
    /// `current` characters of `total` have been emitted.
    Progress { current: usize, total: usize },
    /// The run ended. Posted exactly once per run, as the last event.
    Done { completed: bool },
}

// ---------------------------------------------------------------------------
// Seams: sink and sleeper
// ---------------------------------------------------------------------------

/// Receives each character as it is "typed".
///
/// Interpreting special characters (line breaks, tabs) is the sink's job.
/// The engine assumes `emit` returns; a sink that can fail should be
/// validated before the run and log per-character failures itself.
pub trait CharSink {
    fn emit(&mut self, ch: char);
}

impl<F: FnMut(char)> CharSink for F {
    fn emit(&mut self, ch: char) {
        self(ch)
    }
}

/// Applies the computed delay between characters.
pub trait Sleeper {
    fn sleep(&mut self, delay: Duration);
}

/// Blocks the current thread with [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

impl<F: FnMut(Duration)> Sleeper for F {
    fn sleep(&mut self, delay: Duration) {
        self(delay)
    }
}

// ---------------------------------------------------------------------------
// TypingRequest
// ---------------------------------------------------------------------------

/// One typing action: the text, the speed and the stop flag for this run.
///
/// The speed is clamped to [`MIN_WPM`](super::MIN_WPM) on construction and
/// every request gets a fresh [`CancelToken`].
#[derive(Debug, Clone)]
pub struct TypingRequest {
    text: String,
    wpm: u32,
    cancel: CancelToken,
}

impl TypingRequest {
    pub fn new(text: impl Into<String>, wpm: u32) -> Self {
        Self {
            text: text.into(),
            wpm: effective_wpm(wpm),
            cancel: CancelToken::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Effective words per minute (already clamped).
    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    /// Number of characters a complete run will emit.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// The flag this request's run polls. Clone it to stop the run.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }
}

// ---------------------------------------------------------------------------
// PacingEngine
// ---------------------------------------------------------------------------

/// Drives a single run. Consumed by [`run`](Self::run), so burst state can
/// never leak from one run into the next.
pub struct PacingEngine<R = StdRng, S = ThreadSleeper> {
    rng: R,
    sleeper: S,
}

impl PacingEngine {
    /// Engine with an entropy-seeded RNG that really sleeps.
    pub fn new() -> Self {
        Self::with_parts(StdRng::from_entropy(), ThreadSleeper)
    }
}

impl Default for PacingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng, S: Sleeper> PacingEngine<R, S> {
    /// Engine with an explicit RNG and sleeper (seeded / non-sleeping in tests).
    pub fn with_parts(rng: R, sleeper: S) -> Self {
        Self { rng, sleeper }
    }

    /// Type `request` into `sink`, posting progress on `events`.
    ///
    /// Returns `true` when every character was emitted, `false` when the
    /// request was cancelled first. Empty text completes immediately.
    pub fn run<K, E>(
        self,
        request: &TypingRequest,
        sink: &mut K,
        events: &UnboundedSender<E>,
    ) -> bool
    where
        K: CharSink + ?Sized,
        E: From<PacingEvent>,
    {
        let Self { rng, mut sleeper } = self;
        let mut cadence = Cadence::new(request.wpm(), rng);
        let cancel = request.cancel_token();
        let total = request.char_count();

        log::debug!("pacing: run started ({total} chars at {} wpm)", request.wpm());

        for (index, ch) in request.text().chars().enumerate() {
            if cancel.is_cancelled() {
                log::debug!("pacing: cancelled after {index} of {total} chars");
                let _ = events.send(PacingEvent::Done { completed: false }.into());
                return false;
            }

            sink.emit(ch);

            let _ = events.send(
                PacingEvent::Progress {
                    current: index + 1,
                    total,
                }
                .into(),
            );

            sleeper.sleep(cadence.next_delay(index, ch));
        }

        log::debug!("pacing: run completed ({total} chars)");
        let _ = events.send(PacingEvent::Done { completed: true }.into());
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
