//! Typing session: the caller that owns a pacing run.
//!
//! [`TypingSession`] validates a request, spawns the dedicated worker thread
//! and reports everything back to the UI as [`SessionEvent`]s on an
//! unbounded channel.
//!
//! # Worker flow
//!
//! ```text
//! System { countdown_secs: n }
//!   └─▶ for n..=1: cancelled? → Finished(false) | post Countdown, sleep 1 s
//!
//! build sink (KeyboardSink on the worker thread / PreviewSink)
//!   ├─ Err → post Failed
//!   └─ Ok  → post Started { total }
//!            └─▶ PacingEngine::run → Typed… / Progress… / Finished
//! ```
//!
//! The session never enforces "one run at a time"; the UI only offers
//! Type / Preview while no session is busy.

use std::thread::JoinHandle;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::inject::{InjectError, KeyboardSink, PreviewSink};
use crate::pacing::{
    CancelToken, CharSink, PacingEngine, PacingEvent, Sleeper, ThreadSleeper, TypingRequest,
};

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Reasons a session could not be started.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The text is empty or whitespace only.
    #[error("please enter some text to type")]
    EmptyText,

    /// The system keyboard driver is unavailable.
    #[error(transparent)]
    Inject(#[from] InjectError),

    /// The worker thread could not be created.
    #[error("could not start the typing worker: {0}")]
    Spawn(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// SessionMode / SessionEvent
// ---------------------------------------------------------------------------

/// Where the characters go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Type into the focused application after a countdown.
    System { countdown_secs: u32 },
    /// Type into the local preview pane, starting immediately.
    Preview,
}

/// Progress delivered from the worker to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// `remaining` seconds until typing starts.
    Countdown { remaining: u32 },
    /// The countdown is over and the engine is about to emit `total` chars.
    Started { total: usize },
    /// A character for the preview pane.
    Typed(char),
    /// `current` of `total` characters emitted.
    Progress { current: usize, total: usize },
    /// The run ended, completely or after a stop.
    Finished { completed: bool },
    /// The sink could not be created on the worker; nothing was typed.
    Failed { message: String },
}

impl From<PacingEvent> for SessionEvent {
    fn from(event: PacingEvent) -> Self {
        match event {
            PacingEvent::Progress { current, total } => SessionEvent::Progress { current, total },
            PacingEvent::Done { completed } => SessionEvent::Finished { completed },
        }
    }
}

// ---------------------------------------------------------------------------
// TypingSession
// ---------------------------------------------------------------------------

/// Handle to a running worker.
///
/// Dropping the handle does not stop the worker; call [`stop`](Self::stop).
pub struct TypingSession {
    mode: SessionMode,
    cancel: CancelToken,
    handle: JoinHandle<bool>,
}

impl TypingSession {
    /// Type `request` system-wide after `countdown_secs` seconds.
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyText`] for blank text, [`SessionError::Inject`]
    /// when the keyboard driver is unavailable. Both are detected before any
    /// thread is spawned.
    pub fn start_system(
        request: TypingRequest,
        countdown_secs: u32,
        events: UnboundedSender<SessionEvent>,
    ) -> Result<Self, SessionError> {
        check_text(&request)?;
        KeyboardSink::probe()?;

        Self::spawn(
            request,
            SessionMode::System { countdown_secs },
            KeyboardSink::new,
            PacingEngine::new(),
            ThreadSleeper,
            events,
        )
    }

    /// Type `request` into the preview pane via [`SessionEvent::Typed`].
    pub fn start_preview(
        request: TypingRequest,
        events: UnboundedSender<SessionEvent>,
    ) -> Result<Self, SessionError> {
        let sink = PreviewSink::new(events.clone());
        Self::spawn(
            request,
            SessionMode::Preview,
            move || Ok(sink),
            PacingEngine::new(),
            ThreadSleeper,
            events,
        )
    }

    /// Spawn a worker with explicit parts.
    ///
    /// `make_sink` runs on the worker thread, after the countdown.
    /// `countdown_sleeper` waits out each countdown second.
    pub fn spawn<F, K, R, S, C>(
        request: TypingRequest,
        mode: SessionMode,
        make_sink: F,
        engine: PacingEngine<R, S>,
        mut countdown_sleeper: C,
        events: UnboundedSender<SessionEvent>,
    ) -> Result<Self, SessionError>
    where
        F: FnOnce() -> Result<K, InjectError> + Send + 'static,
        K: CharSink,
        R: Rng + Send + 'static,
        S: Sleeper + Send + 'static,
        C: Sleeper + Send + 'static,
    {
        check_text(&request)?;

        let cancel = request.cancel_token().clone();
        let worker_cancel = cancel.clone();

        log::info!(
            "session: starting {mode:?} run ({} chars at {} wpm)",
            request.char_count(),
            request.wpm()
        );

        let handle = std::thread::Builder::new()
            .name("typing-worker".into())
            .spawn(move || {
                if let SessionMode::System { countdown_secs } = mode {
                    for remaining in (1..=countdown_secs).rev() {
                        if worker_cancel.is_cancelled() {
                            log::info!("session: stopped during countdown");
                            let _ = events.send(SessionEvent::Finished { completed: false });
                            return false;
                        }
                        let _ = events.send(SessionEvent::Countdown { remaining });
                        countdown_sleeper.sleep(Duration::from_secs(1));
                    }
                }

                let mut sink = match make_sink() {
                    Ok(sink) => sink,
                    Err(e) => {
                        log::error!("session: sink unavailable: {e}");
                        let _ = events.send(SessionEvent::Failed {
                            message: e.to_string(),
                        });
                        return false;
                    }
                };

                let _ = events.send(SessionEvent::Started {
                    total: request.char_count(),
                });

                let completed = engine.run(&request, &mut sink, &events);
                log::info!(
                    "session: run {}",
                    if completed { "completed" } else { "stopped" }
                );
                completed
            })?;

        Ok(Self {
            mode,
            cancel,
            handle,
        })
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Ask the worker to stop before its next character (or countdown tick).
    pub fn stop(&self) {
        log::debug!("session: stop requested");
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Returns `true` once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and return whether every character was typed.
    pub fn join(self) -> bool {
        self.handle.join().unwrap_or_else(|_| {
            log::error!("session: typing worker panicked");
            false
        })
    }
}

/// Reject text with nothing to type.
fn check_text(request: &TypingRequest) -> Result<(), SessionError> {
    if request.text().trim().is_empty() {
        return Err(SessionError::EmptyText);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use super::*;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    type Typed = Arc<Mutex<String>>;

    fn quick_engine() -> PacingEngine<StdRng, fn(Duration)> {
        fn no_sleep(_: Duration) {}
        PacingEngine::with_parts(StdRng::seed_from_u64(7), no_sleep as fn(Duration))
    }

    fn collecting_sink(typed: &Typed) -> impl FnOnce() -> Result<Box<dyn FnMut(char)>, InjectError> {
        let typed = Arc::clone(typed);
        move || {
            let sink: Box<dyn FnMut(char)> = Box::new(move |ch| typed.lock().unwrap().push(ch));
            Ok(sink)
        }
    }

    fn drain(rx: &mut UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    fn progress(current: usize, total: usize) -> SessionEvent {
        SessionEvent::Progress { current, total }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn empty_text_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let typed = Typed::default();

        for text in ["", "   ", "\n\t\n"] {
            let result = TypingSession::spawn(
                TypingRequest::new(text, 120),
                SessionMode::Preview,
                collecting_sink(&typed),
                quick_engine(),
                |_d: Duration| {},
                tx.clone(),
            );
            assert!(matches!(result, Err(SessionError::EmptyText)), "{text:?}");
        }
    }

    #[test]
    fn preview_rejects_empty_text_before_spawning() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = TypingSession::start_preview(TypingRequest::new(" ", 120), tx);
        assert!(matches!(result, Err(SessionError::EmptyText)));
        assert!(drain(&mut rx).is_empty());
    }

    // -----------------------------------------------------------------------
    // Runs
    // -----------------------------------------------------------------------

    #[test]
    fn preview_mode_posts_typed_chars_and_progress() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = PreviewSink::new(tx.clone());

        let session = TypingSession::spawn(
            TypingRequest::new("ab", 120),
            SessionMode::Preview,
            move || Ok(sink),
            quick_engine(),
            |_d: Duration| {},
            tx,
        )
        .expect("spawn");

        assert_eq!(session.mode(), SessionMode::Preview);
        assert!(session.join());
        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::Started { total: 2 },
                SessionEvent::Typed('a'),
                progress(1, 2),
                SessionEvent::Typed('b'),
                progress(2, 2),
                SessionEvent::Finished { completed: true },
            ]
        );
    }

    #[test]
    fn system_mode_counts_down_then_types() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let typed = Typed::default();
        let waited = Arc::new(Mutex::new(Vec::new()));
        let waited_in_worker = Arc::clone(&waited);

        let session = TypingSession::spawn(
            TypingRequest::new("hi!", 120),
            SessionMode::System { countdown_secs: 3 },
            collecting_sink(&typed),
            quick_engine(),
            move |d: Duration| waited_in_worker.lock().unwrap().push(d),
            tx,
        )
        .expect("spawn");

        assert!(session.join());
        assert_eq!(*typed.lock().unwrap(), "hi!");
        assert_eq!(*waited.lock().unwrap(), vec![Duration::from_secs(1); 3]);
        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::Countdown { remaining: 3 },
                SessionEvent::Countdown { remaining: 2 },
                SessionEvent::Countdown { remaining: 1 },
                SessionEvent::Started { total: 3 },
                progress(1, 3),
                progress(2, 3),
                progress(3, 3),
                SessionEvent::Finished { completed: true },
            ]
        );
    }

    #[test]
    fn zero_countdown_starts_immediately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let typed = Typed::default();

        let session = TypingSession::spawn(
            TypingRequest::new("x", 120),
            SessionMode::System { countdown_secs: 0 },
            collecting_sink(&typed),
            quick_engine(),
            |_d: Duration| panic!("no countdown expected"),
            tx,
        )
        .expect("spawn");

        assert!(session.join());
        assert_eq!(drain(&mut rx)[0], SessionEvent::Started { total: 1 });
    }

    #[test]
    fn stop_during_countdown_never_builds_the_sink() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let request = TypingRequest::new("unused", 120);
        let token = request.cancel_token().clone();

        let session = TypingSession::spawn(
            request,
            SessionMode::System { countdown_secs: 5 },
            || -> Result<Box<dyn FnMut(char)>, InjectError> { panic!("sink must not be built") },
            quick_engine(),
            move |_d: Duration| token.cancel(),
            tx,
        )
        .expect("spawn");

        assert!(!session.join());
        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::Countdown { remaining: 5 },
                SessionEvent::Finished { completed: false },
            ]
        );
    }

    #[test]
    fn stop_from_the_handle_is_seen_by_the_worker() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (gate_tx, gate_rx) = std::sync::mpsc::channel::<()>();
        let typed = Typed::default();

        let session = TypingSession::spawn(
            TypingRequest::new("abc", 120),
            SessionMode::System { countdown_secs: 2 },
            collecting_sink(&typed),
            quick_engine(),
            move |_d: Duration| {
                let _ = gate_rx.recv();
            },
            tx,
        )
        .expect("spawn");

        // Once the first tick is posted the worker is parked on the gate.
        assert_eq!(
            rx.blocking_recv(),
            Some(SessionEvent::Countdown { remaining: 2 })
        );
        session.stop();
        assert!(session.cancel_token().is_cancelled());
        gate_tx.send(()).unwrap();

        assert!(!session.join());
        assert!(typed.lock().unwrap().is_empty());
        assert_eq!(
            drain(&mut rx),
            vec![SessionEvent::Finished { completed: false }]
        );
    }

    #[test]
    fn stop_mid_run_reports_partial_progress() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let request = TypingRequest::new("abcdef", 120);
        let token = request.cancel_token().clone();
        let typed = Typed::default();
        let typed_in_worker = Arc::clone(&typed);

        let session = TypingSession::spawn(
            request,
            SessionMode::Preview,
            move || {
                Ok(move |ch: char| {
                    let mut t = typed_in_worker.lock().unwrap();
                    t.push(ch);
                    if t.len() == 2 {
                        token.cancel();
                    }
                })
            },
            quick_engine(),
            |_d: Duration| {},
            tx,
        )
        .expect("spawn");

        assert!(!session.join());
        assert_eq!(*typed.lock().unwrap(), "ab");
        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::Started { total: 6 },
                progress(1, 6),
                progress(2, 6),
                SessionEvent::Finished { completed: false },
            ]
        );
    }

    #[test]
    fn sink_failure_is_reported_without_typing() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let session = TypingSession::spawn(
            TypingRequest::new("abc", 120),
            SessionMode::Preview,
            || -> Result<Box<dyn FnMut(char)>, InjectError> {
                Err(InjectError::KeyboardInit("no display".into()))
            },
            quick_engine(),
            |_d: Duration| {},
            tx,
        )
        .expect("spawn");

        assert!(!session.join());
        assert_eq!(
            drain(&mut rx),
            vec![SessionEvent::Failed {
                message: "keyboard driver unavailable: no display".into()
            }]
        );
    }

    #[test]
    fn worker_survives_a_closed_ui_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let typed = Typed::default();

        let session = TypingSession::spawn(
            TypingRequest::new("done anyway", 120),
            SessionMode::System { countdown_secs: 1 },
            collecting_sink(&typed),
            quick_engine(),
            |_d: Duration| {},
            tx,
        )
        .expect("spawn");

        assert!(session.join());
        assert_eq!(*typed.lock().unwrap(), "done anyway");
    }

    #[test]
    fn pacing_events_convert() {
        assert_eq!(
            SessionEvent::from(PacingEvent::Progress { current: 4, total: 9 }),
            progress(4, 9)
        );
        assert_eq!(
            SessionEvent::from(PacingEvent::Done { completed: false }),
            SessionEvent::Finished { completed: false }
        );
    }
}
