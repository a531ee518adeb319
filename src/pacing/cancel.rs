//! Cooperative cancellation flag shared between a run and whoever stops it.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Set-once stop flag.
///
/// Clones share the same flag. The engine polls it once per character,
/// before emitting; it is never checked while a delay is being slept, so a
/// stop takes effect after at most one character's delay. Create a new token
/// for every run instead of resetting an old one.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the run stop before its next character.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
