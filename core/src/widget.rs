//! The welcome widget: one-shot bootstrap plus the live startup toggle.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::WelcomeConfig;
use crate::error::Result;
use crate::error::WelcomeError;
use crate::event::WelcomeEvent;
use crate::event::WelcomeEventSender;
use crate::labels::identifier_to_path;
use crate::paths::build_workspace_entries;
use crate::preferences::StartupPreferenceBridge;
use crate::presentation::WelcomePresentation;
use crate::quotes::SessionQuote;
use crate::services::WelcomeServices;
use crate::types::BootstrapField;
use crate::types::WelcomeSnapshot;

pub struct WelcomeWidget {
    services: WelcomeServices,
    config: Arc<WelcomeConfig>,
    events: WelcomeEventSender,
    quote: Arc<SessionQuote>,
    snapshot: Arc<OnceLock<Arc<WelcomeSnapshot>>>,
    bootstrap_started: AtomicBool,
    alive: CancellationToken,
    // Held across the final liveness check, the publish and the signal.
    publish: Arc<Mutex<()>>,
    startup_preference: StartupPreferenceBridge,
}

impl WelcomeWidget {
    /// Build the widget and mount the startup preference mirror.
    ///
    /// Nothing is fetched until [`WelcomeWidget::initialize`] is called. Must
    /// be called from within a tokio runtime.
    pub fn new(services: WelcomeServices, config: WelcomeConfig, events: WelcomeEventSender) -> Self {
        let startup_preference = StartupPreferenceBridge::mount(
            Arc::clone(&services.preferences),
            config.startup_preference_key.clone(),
            events.clone(),
        );
        Self {
            services,
            config: Arc::new(config),
            events,
            quote: Arc::new(SessionQuote::default()),
            snapshot: Arc::new(OnceLock::new()),
            bootstrap_started: AtomicBool::new(false),
            alive: CancellationToken::new(),
            publish: Arc::new(Mutex::new(())),
            startup_preference,
        }
    }

    /// Start the bootstrap sequence.
    ///
    /// Returns the task driving it; callers may await it or drop it. Only the
    /// first call starts anything, later calls return `None`.
    pub fn initialize(&self) -> Option<JoinHandle<()>> {
        if self.bootstrap_started.swap(true, Ordering::SeqCst) {
            debug!("welcome bootstrap already started");
            return None;
        }

        let services = self.services.clone();
        let config = Arc::clone(&self.config);
        let quote = Arc::clone(&self.quote);
        let slot = Arc::clone(&self.snapshot);
        let alive = self.alive.clone();
        let publish = Arc::clone(&self.publish);
        let events = self.events.clone();

        Some(tokio::spawn(async move {
            let snapshot = tokio::select! {
                biased;
                _ = alive.cancelled() => {
                    debug!("welcome widget disposed during bootstrap");
                    return;
                }
                snapshot = assemble_snapshot(&services, &config, &quote) => snapshot,
            };

            let _publishing = publish.lock().unwrap_or_else(PoisonError::into_inner);
            if alive.is_cancelled() {
                debug!("dropping welcome snapshot for disposed widget");
                return;
            }
            if slot.set(Arc::new(snapshot)).is_err() {
                warn!("welcome snapshot was already published");
                return;
            }
            info!("welcome page bootstrap complete");
            events.send(WelcomeEvent::BootstrapComplete);
        }))
    }

    /// The published snapshot, or `None` while bootstrap is still running.
    pub fn snapshot(&self) -> Option<Arc<WelcomeSnapshot>> {
        self.snapshot.get().cloned()
    }

    pub fn presentation(&self) -> WelcomePresentation {
        WelcomePresentation::build(
            &self.config,
            self.snapshot.get().map(Arc::as_ref),
            self.startup_preference.is_enabled(),
        )
    }

    pub fn startup_page_enabled(&self) -> bool {
        self.startup_preference.is_enabled()
    }

    pub async fn set_startup_page_enabled(&self, enabled: bool) -> Result<()> {
        self.startup_preference.set_enabled(enabled).await
    }

    /// Open the recent workspace at `index` (most recent first).
    pub async fn open_recent(&self, index: usize) -> Result<()> {
        let snapshot = self.snapshot.get().ok_or(WelcomeError::NotBootstrapped)?;
        let entry = snapshot
            .recent_workspaces
            .get(index)
            .ok_or(WelcomeError::UnknownRecentWorkspace { index })?;
        info!("opening recent workspace {}", entry.display_path);
        self.services
            .workspaces
            .open(&entry.raw_identifier)
            .await
            .map_err(|source| WelcomeError::Open {
                identifier: entry.raw_identifier.clone(),
                source,
            })
    }

    pub fn is_disposed(&self) -> bool {
        self.alive.is_cancelled()
    }

    /// Stop any in-flight bootstrap and release the preference subscription.
    pub fn dispose(&mut self) {
        self.alive.cancel();
        drop(self.publish.lock().unwrap_or_else(PoisonError::into_inner));
        self.startup_preference.dispose();
    }
}

impl Drop for WelcomeWidget {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Run the four fetches concurrently and build the snapshot.
///
/// A failed fetch leaves its field at the empty default and is recorded in
/// [`WelcomeSnapshot::failed_fields`].
pub async fn assemble_snapshot(
    services: &WelcomeServices,
    config: &WelcomeConfig,
    quote: &SessionQuote,
) -> WelcomeSnapshot {
    let (app_info, recent, home, extensions) = tokio::join!(
        services.app_info.application_info(),
        services.workspaces.recent_workspaces(),
        services.environment.home_dir_uri(),
        services.extensions.extension_infos(),
    );

    let mut failed_fields = Vec::new();
    let application_info = settle(BootstrapField::ApplicationInfo, app_info, &mut failed_fields).flatten();
    let recent_ids = settle(BootstrapField::RecentWorkspaces, recent, &mut failed_fields)
        .unwrap_or_default();
    let home_dir = settle(BootstrapField::HomeDirectory, home, &mut failed_fields)
        .and_then(|uri| home_dir_from_uri(&uri));
    let feature_extension_available =
        settle(BootstrapField::ExtensionInventory, extensions, &mut failed_fields).is_some_and(
            |extensions| {
                extensions
                    .iter()
                    .any(|extension| extension.name == config.feature_extension)
            },
        );

    let recent_workspaces =
        build_workspace_entries(&recent_ids, home_dir.as_deref(), services.labels.as_ref());

    WelcomeSnapshot {
        application_info,
        recent_workspaces,
        home_dir,
        feature_extension_available,
        quote: quote.get(),
        failed_fields,
    }
}

fn settle<T>(
    field: BootstrapField,
    result: anyhow::Result<T>,
    failed_fields: &mut Vec<BootstrapField>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("welcome bootstrap could not fetch {field}: {e:#}");
            failed_fields.push(field);
            None
        }
    }
}

fn home_dir_from_uri(uri: &str) -> Option<PathBuf> {
    let home = identifier_to_path(uri);
    if home.is_none() {
        debug!("ignoring unusable home directory `{uri}`");
    }
    home
}
