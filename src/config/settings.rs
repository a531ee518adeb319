//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to the UI.
//! Every struct is `#[serde(default)]`, so a file written by an older build
//! (or edited by hand) still loads with the missing keys defaulted.

use std::ops::RangeInclusive;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// TypingConfig
// ---------------------------------------------------------------------------

/// The persisted typing preferences: speed and pre-typing countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Target speed in words per minute (5 characters per word).
    pub wpm: u32,
    /// Seconds to wait before a system-wide run starts, so the user can
    /// focus the target application.
    pub countdown_secs: u32,
}

impl TypingConfig {
    /// Range offered by the speed slider.
    pub const WPM_RANGE: RangeInclusive<u32> = 20..=220;
    /// Range offered by the countdown spinner.
    pub const COUNTDOWN_RANGE: RangeInclusive<u32> = 0..=15;

    /// Returns a copy with both values clamped into their UI ranges.
    ///
    /// ```
    /// use typing_buddy::config::TypingConfig;
    ///
    /// let cfg = TypingConfig { wpm: 5_000, countdown_secs: 99 }.sanitized();
    /// assert_eq!(cfg.wpm, 220);
    /// assert_eq!(cfg.countdown_secs, 15);
    /// ```
    pub fn sanitized(self) -> Self {
        Self {
            wpm: self
                .wpm
                .clamp(*Self::WPM_RANGE.start(), *Self::WPM_RANGE.end()),
            countdown_secs: self.countdown_secs.clamp(
                *Self::COUNTDOWN_RANGE.start(),
                *Self::COUNTDOWN_RANGE.end(),
            ),
        }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            wpm: 120,
            countdown_secs: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// HotkeyConfig
// ---------------------------------------------------------------------------

/// Global hotkey bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Whether the global stop hotkey listener is started at all.
    pub enabled: bool,
    /// Key that stops a running session from any application (e.g. `"Escape"`).
    pub stop_key: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stop_key: "Escape".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Keep the window floating above all other windows.
    pub always_on_top: bool,
    /// Initial inner window size `(width, height)` in points.
    pub window_size: (f32, f32),
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            always_on_top: false,
            window_size: (820.0, 520.0),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// Loaded once at startup and handed to the UI; the pacing engine only ever
/// sees the `wpm` value copied into each request.
///
/// ```rust,no_run
/// use typing_buddy::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let mut config = AppConfig::load().unwrap();
///
/// config.typing.wpm = 90;
/// config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Speed / countdown preferences.
    pub typing: TypingConfig,
    /// Global hotkey bindings.
    pub hotkey: HotkeyConfig,
    /// Window settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.typing = config.typing.sanitized();
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
