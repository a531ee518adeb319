//! Typing Buddy window, an egui/eframe application.
//!
//! # Architecture
//!
//! [`TypingBuddyApp`] is the top-level [`eframe::App`]. It owns the current
//! [`TypingSession`] (if any) and two receivers that it drains every frame:
//!
//! * `event_rx`: [`SessionEvent`]s posted by the typing worker.
//! * `hotkey_rx`: [`HotkeyEvent`]s from the global stop-key listener.
//!
//! # Layout
//!
//! | Area | Contents |
//! |------|----------|
//! | Top bar | Speed slider, countdown spinner, Type / Preview / Stop / Save Settings |
//! | Centre | "Text to type" input, read-only preview output |
//! | Bottom bar | Status message (left), `current/total` progress (right) |

use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::{AppConfig, AppPaths, TypingConfig};
use crate::hotkey::HotkeyEvent;
use crate::pacing::TypingRequest;
use crate::session::{SessionError, SessionEvent, SessionMode, SessionState, TypingSession};

const READY_HINT: &str =
    "Ready. Paste your text, then click Type. A countdown lets you focus the target field.";

// ---------------------------------------------------------------------------
// TypingBuddyApp
// ---------------------------------------------------------------------------

/// eframe application: the Typing Buddy main window.
pub struct TypingBuddyApp {
    // ── Session ──────────────────────────────────────────────────────────
    state: SessionState,
    session: Option<TypingSession>,
    /// Characters emitted / total for the current or last run.
    progress: Option<(usize, usize)>,
    status: String,

    // ── Editable fields ──────────────────────────────────────────────────
    input: String,
    preview: String,
    wpm: u32,
    countdown_secs: u32,

    // ── Channels ─────────────────────────────────────────────────────────
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    event_rx: mpsc::UnboundedReceiver<SessionEvent>,
    /// `None` when the global stop key is disabled or unavailable.
    hotkey_rx: Option<mpsc::Receiver<HotkeyEvent>>,
    stop_key: Option<String>,

    // ── Configuration ────────────────────────────────────────────────────
    config: AppConfig,
    settings_path: PathBuf,
}

impl TypingBuddyApp {
    /// Create the app from the loaded configuration.
    ///
    /// * `hotkey_rx`: receiver of the stop-key listener, if one is running.
    pub fn new(hotkey_rx: Option<mpsc::Receiver<HotkeyEvent>>, config: AppConfig) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let typing = config.typing.sanitized();
        let stop_key = hotkey_rx.as_ref().map(|_| config.hotkey.stop_key.clone());

        Self {
            state: SessionState::Idle,
            session: None,
            progress: None,
            status: READY_HINT.into(),
            input: String::new(),
            preview: String::new(),
            wpm: typing.wpm,
            countdown_secs: typing.countdown_secs,
            event_tx,
            event_rx,
            hotkey_rx,
            stop_key,
            config,
            settings_path: AppPaths::new().settings_file,
        }
    }

    /// Persist settings somewhere other than the platform config dir.
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = path;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Type the input text system-wide after the countdown.
    fn start_typing(&mut self) {
        let request = TypingRequest::new(self.input.clone(), self.wpm);
        match TypingSession::start_system(request, self.countdown_secs, self.event_tx.clone()) {
            Ok(session) => {
                self.session = Some(session);
                self.state = SessionState::Countdown;
                self.progress = None;
                self.status = "Get ready…".into();
            }
            Err(e) => self.report_start_error(e),
        }
    }

    /// Type the input text into the local preview pane.
    fn start_preview(&mut self) {
        let request = TypingRequest::new(self.input.clone(), self.wpm);
        let total = request.char_count();
        match TypingSession::start_preview(request, self.event_tx.clone()) {
            Ok(session) => {
                self.preview.clear();
                self.session = Some(session);
                self.state = SessionState::Typing;
                self.progress = Some((0, total));
                self.status = "Preview typing…".into();
            }
            Err(e) => self.report_start_error(e),
        }
    }

    fn stop(&mut self) {
        if let Some(session) = &self.session {
            session.stop();
            self.status = "Stopping…".into();
        }
    }

    /// Write the current speed / countdown to `settings.toml`.
    fn save_settings(&mut self) {
        self.config.typing = TypingConfig {
            wpm: self.wpm,
            countdown_secs: self.countdown_secs,
        }
        .sanitized();

        match self.config.save_to(&self.settings_path) {
            Ok(()) => {
                log::info!("settings saved to {}", self.settings_path.display());
                self.status = "Settings saved.".into();
            }
            Err(e) => {
                log::warn!("could not save settings: {e}");
                self.status = format!("Could not save settings: {e}");
            }
        }
    }

    fn report_start_error(&mut self, error: SessionError) {
        match error {
            SessionError::EmptyText => {
                self.status = "Please enter some text to type.".into();
            }
            other => {
                log::error!("could not start typing: {other}");
                self.state = SessionState::Error;
                self.status = other.to_string();
            }
        }
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending stop-key events (non-blocking).
    fn poll_hotkey(&mut self) {
        let mut stop_requested = false;
        if let Some(rx) = self.hotkey_rx.as_mut() {
            while let Ok(HotkeyEvent::StopPressed) = rx.try_recv() {
                stop_requested = true;
            }
        }
        if stop_requested && self.state.is_busy() {
            self.stop();
        }
    }

    /// Drain all pending session events (non-blocking).
    fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Countdown { remaining } => {
                self.state = SessionState::Countdown;
                self.status =
                    format!("Starting in {remaining}… Switch to your target field now.");
            }
            SessionEvent::Started { total } => {
                self.state = SessionState::Typing;
                self.progress = Some((0, total));
                self.status = match self.session.as_ref().map(TypingSession::mode) {
                    Some(SessionMode::Preview) => "Preview typing…".into(),
                    _ => match &self.stop_key {
                        Some(key) => format!(
                            "Typing… Focus should now be on the target field. Press {key} to stop."
                        ),
                        None => "Typing… Focus should now be on the target field.".into(),
                    },
                };
            }
            SessionEvent::Typed(ch) => self.preview.push(ch),
            SessionEvent::Progress { current, total } => {
                self.progress = Some((current, total));
            }
            SessionEvent::Finished { completed } => {
                self.state = SessionState::finished(completed);
                self.status = if completed { "Done" } else { "Stopped" }.into();
                self.session = None;
            }
            SessionEvent::Failed { message } => {
                self.state = SessionState::Error;
                self.status = format!("Could not type: {message}");
                self.session = None;
            }
        }
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        let busy = self.state.is_busy();

        ui.horizontal(|ui| {
            ui.label("Speed (WPM):");
            ui.add_enabled(
                !busy,
                egui::Slider::new(&mut self.wpm, TypingConfig::WPM_RANGE),
            );

            ui.add_space(12.0);
            ui.label("Countdown (s):");
            ui.add_enabled(
                !busy,
                egui::DragValue::new(&mut self.countdown_secs)
                    .range(TypingConfig::COUNTDOWN_RANGE),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!busy, egui::Button::new("Save Settings"))
                    .clicked()
                {
                    self.save_settings();
                }
                if ui.add_enabled(busy, egui::Button::new("Stop")).clicked() {
                    self.stop();
                }
                if ui.add_enabled(!busy, egui::Button::new("Preview")).clicked() {
                    self.start_preview();
                }
                if ui.add_enabled(!busy, egui::Button::new("Type")).clicked() {
                    self.start_typing();
                }
            });
        });
    }

    fn draw_text_areas(&mut self, ui: &mut egui::Ui) {
        let busy = self.state.is_busy();
        let pane_height = ((ui.available_height() - 60.0) / 2.0).max(80.0);

        ui.label(egui::RichText::new("Text to type").strong());
        egui::ScrollArea::vertical()
            .id_salt("input")
            .max_height(pane_height)
            .show(ui, |ui| {
                ui.add_enabled(
                    !busy,
                    egui::TextEdit::multiline(&mut self.input)
                        .desired_width(f32::INFINITY)
                        .desired_rows(12),
                );
            });

        ui.separator();

        ui.label(egui::RichText::new("Preview output (local, not system-wide)").strong());
        egui::ScrollArea::vertical()
            .id_salt("preview")
            .max_height(pane_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.preview.as_str())
                        .desired_width(f32::INFINITY)
                        .desired_rows(10),
                );
            });
    }

    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.status);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some((current, total)) = self.progress {
                    ui.label(format!("{current}/{total}"));
                }
            });
        });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for TypingBuddyApp {
    /// Called every frame by eframe. Polls channels, then renders.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_hotkey();
        self.poll_events();

        // Worker events do not wake the UI; keep polling while a run is live.
        if self.state.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.draw_controls(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_text_areas(ui);
        });
    }

    /// Stop any running session so nothing keeps typing after the window closes.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(session) = &self.session {
            session.stop();
        }
        log::info!("Typing Buddy closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
