use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Notifications from the welcome widget to the view hosting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeEvent {
    /// The snapshot has been published; render it.
    BootstrapComplete,
    /// The mirrored startup-editor preference changed.
    StartupPreferenceChanged(bool),
}

#[derive(Debug, Clone)]
pub struct WelcomeEventSender {
    tx: UnboundedSender<WelcomeEvent>,
}

impl WelcomeEventSender {
    pub fn new(tx: UnboundedSender<WelcomeEvent>) -> Self {
        Self { tx }
    }

    /// Create a sender together with the receiving end the view drains.
    pub fn channel() -> (Self, UnboundedReceiver<WelcomeEvent>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Send an event, ignoring a view that has already gone away.
    pub fn send(&self, event: WelcomeEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!("dropping welcome event, view is gone: {e}");
        }
    }
}
