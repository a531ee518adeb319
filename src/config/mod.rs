//! Configuration module for Typing Buddy.
//!
//! Provides `AppConfig` (top-level settings), the typing preferences record,
//! `AppPaths` for the platform config directory, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, HotkeyConfig, TypingConfig, UiConfig};
