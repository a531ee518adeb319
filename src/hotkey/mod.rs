//! Global stop hotkey, backed by `rdev`.
//!
//! During a system-wide run the Typing Buddy window does not have focus, so
//! its Stop button is out of reach. [`HotkeyListener`] watches a global key
//! (Escape by default) on a dedicated OS thread and forwards
//! [`HotkeyEvent::StopPressed`] to the UI.
//!
//! Only keys that a run never types itself are accepted: the listener also
//! sees the synthetic key events produced by the keyboard sink, so a stop key
//! of `Return`, `Space` or a letter would cancel the run it is typing.
//!
//! # Usage
//!
//! ```no_run
//! use tokio::sync::mpsc;
//! use typing_buddy::hotkey::{parse_key, HotkeyEvent, HotkeyListener};
//!
//! let (tx, mut rx) = mpsc::channel::<HotkeyEvent>(4);
//! let key = parse_key("Escape").expect("unknown key");
//! let _listener = HotkeyListener::start(key, tx).expect("listener thread");
//!
//! // In the UI loop:
//! // while let Ok(HotkeyEvent::StopPressed) = rx.try_recv() { ... }
//! ```

pub mod listener;

pub use listener::HotkeyListener;

// ---------------------------------------------------------------------------
// HotkeyEvent
// ---------------------------------------------------------------------------

/// Events emitted by the hotkey listener thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyEvent {
    /// The stop key was pressed.
    StopPressed,
}

// ---------------------------------------------------------------------------
// parse_key
// ---------------------------------------------------------------------------

/// Parse a stop-key name from a config string into an [`rdev::Key`].
///
/// Supports F1–F12 and the navigation / lock keys a typing run never
/// produces. Returns `None` for anything else so callers can fall back to a
/// default.
///
/// # Examples
///
/// ```
/// use typing_buddy::hotkey::parse_key;
///
/// assert_eq!(parse_key("Escape"), Some(rdev::Key::Escape));
/// assert_eq!(parse_key("F8"),     Some(rdev::Key::F8));
/// assert_eq!(parse_key("Enter"),  None);
/// ```
pub fn parse_key(key_str: &str) -> Option<rdev::Key> {
    match key_str {
        "F1" => Some(rdev::Key::F1),
        "F2" => Some(rdev::Key::F2),
        "F3" => Some(rdev::Key::F3),
        "F4" => Some(rdev::Key::F4),
        "F5" => Some(rdev::Key::F5),
        "F6" => Some(rdev::Key::F6),
        "F7" => Some(rdev::Key::F7),
        "F8" => Some(rdev::Key::F8),
        "F9" => Some(rdev::Key::F9),
        "F10" => Some(rdev::Key::F10),
        "F11" => Some(rdev::Key::F11),
        "F12" => Some(rdev::Key::F12),

        "Escape" | "Esc" => Some(rdev::Key::Escape),
        "Pause" => Some(rdev::Key::Pause),
        "ScrollLock" => Some(rdev::Key::ScrollLock),
        "PrintScreen" => Some(rdev::Key::PrintScreen),
        "Insert" => Some(rdev::Key::Insert),
        "Home" => Some(rdev::Key::Home),
        "End" => Some(rdev::Key::End),
        "PageUp" => Some(rdev::Key::PageUp),
        "PageDown" => Some(rdev::Key::PageDown),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_function_keys() {
        assert_eq!(parse_key("F1"), Some(rdev::Key::F1));
        assert_eq!(parse_key("F9"), Some(rdev::Key::F9));
        assert_eq!(parse_key("F12"), Some(rdev::Key::F12));
    }

    #[test]
    fn parse_escape_aliases() {
        assert_eq!(parse_key("Escape"), Some(rdev::Key::Escape));
        assert_eq!(parse_key("Esc"), Some(rdev::Key::Escape));
    }

    #[test]
    fn parse_navigation_keys() {
        assert_eq!(parse_key("Pause"), Some(rdev::Key::Pause));
        assert_eq!(parse_key("End"), Some(rdev::Key::End));
        assert_eq!(parse_key("PageDown"), Some(rdev::Key::PageDown));
    }

    /// Keys the keyboard sink itself produces would cancel their own run.
    #[test]
    fn keys_a_run_types_are_rejected() {
        for name in ["Return", "Enter", "Tab", "Space", "a", "Z", "Backspace"] {
            assert_eq!(parse_key(name), None, "{name}");
        }
    }

    #[test]
    fn parse_unknown_key_returns_none() {
        assert_eq!(parse_key("xyz"), None);
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("Ctrl+C"), None);
        assert_eq!(parse_key("escape"), None);
    }

    #[test]
    fn default_stop_key_parses() {
        let cfg = crate::config::HotkeyConfig::default();
        assert_eq!(parse_key(&cfg.stop_key), Some(rdev::Key::Escape));
    }
}
