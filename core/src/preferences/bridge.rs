use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::PreferenceStore;
use super::StartupEditor;
use super::startup_page_enabled;
use crate::error::Result;
use crate::error::WelcomeError;
use crate::event::WelcomeEvent;
use crate::event::WelcomeEventSender;

/// Live boolean mirror of the startup-editor preference.
///
/// The listener is owned by the bridge: dropping the bridge (or calling
/// [`StartupPreferenceBridge::dispose`]) stops it and releases the
/// subscription. Once `dispose` returns no further change is delivered, even
/// when the listener was mid-delivery on another worker thread.
pub struct StartupPreferenceBridge {
    store: Arc<dyn PreferenceStore>,
    key: String,
    mirror: watch::Receiver<bool>,
    cancel: CancellationToken,
    // Held by the listener while it updates the mirror and notifies.
    delivery: Arc<Mutex<()>>,
    listener: Option<JoinHandle<()>>,
}

impl StartupPreferenceBridge {
    /// Read the current value and start listening for changes.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(
        store: Arc<dyn PreferenceStore>,
        key: impl Into<String>,
        events: WelcomeEventSender,
    ) -> Self {
        let key = key.into();
        // Subscribe before reading so no change can slip in between.
        let mut changes = store.subscribe();
        let initial = startup_page_enabled(store.get(&key).as_ref());
        let (mirror_tx, mirror) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let delivery = Arc::new(Mutex::new(()));

        let listener_store = Arc::clone(&store);
        let listener_key = key.clone();
        let listener_cancel = cancel.clone();
        let listener_delivery = Arc::clone(&delivery);
        let listener = tokio::spawn(async move {
            loop {
                let enabled = tokio::select! {
                    biased;
                    _ = listener_cancel.cancelled() => break,
                    received = changes.recv() => match received {
                        Ok(change) if change.key == listener_key => {
                            startup_page_enabled(change.new_value.as_ref())
                        }
                        Ok(_) => continue,
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("preference listener lagged by {skipped} changes, re-reading `{listener_key}`");
                            startup_page_enabled(listener_store.get(&listener_key).as_ref())
                        }
                        Err(RecvError::Closed) => {
                            debug!("preference store closed its change stream");
                            break;
                        }
                    },
                };

                let _delivering = listener_delivery
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if listener_cancel.is_cancelled() {
                    debug!("dropping startup preference change for disposed bridge");
                    break;
                }
                mirror_tx.send_replace(enabled);
                events.send(WelcomeEvent::StartupPreferenceChanged(enabled));
            }
        });

        Self {
            store,
            key,
            mirror,
            cancel,
            delivery,
            listener: Some(listener),
        }
    }

    /// Last value reported by the store.
    pub fn is_enabled(&self) -> bool {
        *self.mirror.borrow()
    }

    /// Write the user's choice back to the store.
    ///
    /// The mirror only moves once the store broadcasts the change.
    pub async fn set_enabled(&self, enabled: bool) -> Result<()> {
        let value = StartupEditor::for_toggle(enabled);
        self.store
            .update_value(&self.key, value.to_value())
            .await
            .map_err(|source| WelcomeError::PreferenceWrite {
                key: self.key.clone(),
                source,
            })?;
        info!("startup editor set to {value}");
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.listener.is_none()
    }

    pub fn dispose(&mut self) {
        self.cancel.cancel();
        // Wait out a delivery already past its cancellation check.
        drop(self.delivery.lock().unwrap_or_else(PoisonError::into_inner));
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

impl Drop for StartupPreferenceBridge {
    fn drop(&mut self) {
        self.dispose();
    }
}
