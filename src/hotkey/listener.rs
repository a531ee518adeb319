//! Stop-key listener thread.
//!
//! `rdev::listen` blocks forever and offers no way to shut it down, so the
//! listener runs on its own OS thread that is never joined. Dropping the
//! [`HotkeyListener`] handle only mutes it: the callback checks a shared flag
//! and forwards nothing once it is set.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::mpsc;

use super::HotkeyEvent;

/// Handle to the running listener. Drop it to stop forwarding.
pub struct HotkeyListener {
    muted: Arc<AtomicBool>,
    _thread: std::thread::JoinHandle<()>,
}

impl HotkeyListener {
    /// Forward one [`HotkeyEvent::StopPressed`] on `tx` per physical press
    /// of `key`, in any application.
    ///
    /// Auto-repeat while the key is held is collapsed: the next event is
    /// only sent after the key has been released.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the OS refuses to create the thread.
    pub fn start(key: rdev::Key, tx: mpsc::Sender<HotkeyEvent>) -> std::io::Result<Self> {
        let muted = Arc::new(AtomicBool::new(false));
        let thread_muted = Arc::clone(&muted);

        let thread = std::thread::Builder::new()
            .name("hotkey-listener".into())
            .spawn(move || {
                let mut held = false;
                let result = rdev::listen(move |event| {
                    if thread_muted.load(Ordering::Relaxed) {
                        return;
                    }
                    match event.event_type {
                        rdev::EventType::KeyPress(k) if k == key && !held => {
                            held = true;
                            // Full queue: a stop is already pending.
                            let _ = tx.try_send(HotkeyEvent::StopPressed);
                        }
                        rdev::EventType::KeyRelease(k) if k == key => held = false,
                        _ => {}
                    }
                });

                if let Err(e) = result {
                    log::error!("hotkey-listener: rdev::listen failed: {e:?}");
                }
            })?;

        log::info!("hotkey-listener: stop key is {key:?}");

        Ok(Self {
            muted,
            _thread: thread,
        })
    }
}

impl Drop for HotkeyListener {
    fn drop(&mut self) {
        self.muted.store(true, Ordering::Relaxed);
    }
}
