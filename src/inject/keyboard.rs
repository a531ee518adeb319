//! System-wide keystroke emission backed by the `enigo` crate.
//!
//! [`KeyboardSink`] types each character into whatever window currently has
//! focus. Control characters are mapped to real key clicks:
//!
//! | Char   | Sent as |
//! |--------|---------|
//! | `\n`   | Return click |
//! | `\r`   | nothing (a CRLF pair yields one Return) |
//! | `\t`   | Tab click |
//! | other  | `Keyboard::text` with the single character |

use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use super::InjectError;
use crate::pacing::CharSink;

// ---------------------------------------------------------------------------
// Stroke mapping
// ---------------------------------------------------------------------------

/// What a single character turns into on the virtual keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Return,
    Tab,
    Text(char),
    Skip,
}

/// Map a character to the keystroke that reproduces it.
pub fn stroke_for(ch: char) -> Stroke {
    match ch {
        '\n' => Stroke::Return,
        '\r' => Stroke::Skip,
        '\t' => Stroke::Tab,
        other => Stroke::Text(other),
    }
}

// ---------------------------------------------------------------------------
// KeyboardSink
// ---------------------------------------------------------------------------

/// Emission sink that drives the OS keyboard.
///
/// `Enigo` is not `Send` on every platform, so build the sink on the thread
/// that will use it. Call [`KeyboardSink::probe`] first on the UI thread to
/// report an unavailable driver before a run is started.
pub struct KeyboardSink {
    enigo: Enigo,
}

impl KeyboardSink {
    /// Connect to the platform keyboard driver.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::KeyboardInit`] if the enigo backend cannot be
    /// initialised (no display server, missing accessibility permission …).
    pub fn new() -> Result<Self, InjectError> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| InjectError::KeyboardInit(e.to_string()))?;
        Ok(Self { enigo })
    }

    /// Check that the keyboard driver is available without keeping a handle.
    pub fn probe() -> Result<(), InjectError> {
        Self::new().map(|_| ())
    }

    /// Send one character, surfacing backend failures.
    pub fn send(&mut self, ch: char) -> Result<(), InjectError> {
        let result = match stroke_for(ch) {
            Stroke::Return => self.enigo.key(Key::Return, Direction::Click),
            Stroke::Tab => self.enigo.key(Key::Tab, Direction::Click),
            Stroke::Text(c) => self.enigo.text(c.encode_utf8(&mut [0u8; 4])),
            Stroke::Skip => return Ok(()),
        };
        result.map_err(|e| InjectError::KeySimulation(e.to_string()))
    }
}

impl CharSink for KeyboardSink {
    fn emit(&mut self, ch: char) {
        if let Err(e) = self.send(ch) {
            log::warn!("keyboard: could not type {ch:?}: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
