//! Typing Buddy types text into whatever field has focus, at a human pace.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`pacing`] | Per-character delays and the cancellable typing loop |
//! | [`inject`] | Where characters go: OS keyboard or the preview pane |
//! | [`session`] | Countdown, worker thread, and events for the UI |
//! | [`hotkey`] | Global stop key |
//! | [`config`] | `settings.toml` load / save |
//! | [`app`] | egui window |

pub mod app;
pub mod config;
pub mod hotkey;
pub mod inject;
pub mod pacing;
pub mod session;
