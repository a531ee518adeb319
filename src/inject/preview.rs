//! Local preview sink: characters go to the UI instead of the OS keyboard.

use tokio::sync::mpsc::UnboundedSender;

use crate::pacing::CharSink;
use crate::session::SessionEvent;

/// Posts every character as [`SessionEvent::Typed`] for the preview pane.
#[derive(Debug, Clone)]
pub struct PreviewSink {
    tx: UnboundedSender<SessionEvent>,
}

impl PreviewSink {
    pub fn new(tx: UnboundedSender<SessionEvent>) -> Self {
        Self { tx }
    }
}

impl CharSink for PreviewSink {
    fn emit(&mut self, ch: char) {
        let _ = self.tx.send(SessionEvent::Typed(ch));
    }
}
