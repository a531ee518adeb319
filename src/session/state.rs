//! Session state machine as seen by the UI.
//!
//! ```text
//! Idle ──Type──▶ Countdown ──countdown over──▶ Typing
//!      ──Preview─────────────────────────────▶ Typing
//! Typing ──all chars──▶ Done
//! Countdown / Typing ──Stop──▶ Stopped
//! any state ──start failure──▶ Error
//! Done / Stopped / Error ──next Type/Preview──▶ …
//! ```

/// States of a typing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing running.
    #[default]
    Idle,

    /// Waiting for the user to focus the target window.
    Countdown,

    /// The worker is emitting characters.
    Typing,

    /// The last run emitted every character.
    Done,

    /// The last run was stopped early.
    Stopped,

    /// The last run could not be started.
    Error,
}

impl SessionState {
    /// Returns `true` while a worker is alive.
    ///
    /// The UI uses this to disable Type / Preview / Save and enable Stop.
    ///
    /// ```
    /// use typing_buddy::session::SessionState;
    ///
    /// assert!(!SessionState::Idle.is_busy());
    /// assert!(SessionState::Countdown.is_busy());
    /// assert!(SessionState::Typing.is_busy());
    /// assert!(!SessionState::Done.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Countdown | SessionState::Typing)
    }

    /// A short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Ready",
            SessionState::Countdown => "Starting",
            SessionState::Typing => "Typing",
            SessionState::Done => "Done",
            SessionState::Stopped => "Stopped",
            SessionState::Error => "Error",
        }
    }

    /// Terminal state for a run that reported `completed`.
    pub fn finished(completed: bool) -> Self {
        if completed {
            SessionState::Done
        } else {
            SessionState::Stopped
        }
    }
}
