//! Application entry point for Typing Buddy.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Spawn the global stop-key listener thread, if enabled.
//! 4. Run [`eframe::run_native`], which blocks the main thread until the window
//!    is closed.

use tokio::sync::mpsc;
use typing_buddy::{
    app::TypingBuddyApp,
    config::AppConfig,
    hotkey::{parse_key, HotkeyEvent, HotkeyListener},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Stop-key listener
// ---------------------------------------------------------------------------

/// Start the stop-key listener described by `config.hotkey`.
///
/// Returns `None` (and logs why) when the hotkey is disabled, the key name
/// is not recognised, or the listener thread cannot be created. The app
/// then relies on its Stop button alone.
fn start_stop_key(
    config: &AppConfig,
) -> Option<(HotkeyListener, mpsc::Receiver<HotkeyEvent>)> {
    if !config.hotkey.enabled {
        log::info!("stop hotkey disabled in settings");
        return None;
    }

    let Some(key) = parse_key(&config.hotkey.stop_key) else {
        log::warn!(
            "Unsupported stop key {:?}; the global stop hotkey is off",
            config.hotkey.stop_key
        );
        return None;
    };

    let (hotkey_tx, hotkey_rx) = mpsc::channel::<HotkeyEvent>(16);
    match HotkeyListener::start(key, hotkey_tx) {
        Ok(listener) => Some((listener, hotkey_rx)),
        Err(e) => {
            log::warn!("Could not start hotkey listener: {e}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let mut vp = egui::ViewportBuilder::default()
        .with_title("Typing Buddy")
        .with_inner_size([width, height])
        .with_min_inner_size([600.0, 400.0]);

    if config.ui.always_on_top {
        vp = vp.with_always_on_top();
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Typing Buddy starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Stop-key listener; the handle must outlive the window.
    let (_hotkey_listener, hotkey_rx) = match start_stop_key(&config) {
        Some((listener, rx)) => (Some(listener), Some(rx)),
        None => (None, None),
    };

    // 4. Build the egui app and run it (blocks until the window is closed)
    let options = native_options(&config);
    let app = TypingBuddyApp::new(hotkey_rx, config);

    eframe::run_native(
        "Typing Buddy",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
