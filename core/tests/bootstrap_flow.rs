mod common;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::Notify;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use welcome_core::BootstrapField;
use welcome_core::MemoryPreferenceStore;
use welcome_core::PreferenceStore;
use welcome_core::WelcomeConfig;
use welcome_core::WelcomeError;
use welcome_core::WelcomeEvent;
use welcome_core::WelcomeEventSender;
use welcome_core::WelcomeWidget;

use common::FakeBackend;
use common::services;

const STARTUP_KEY: &str = "workbench.startupEditor";

struct Harness {
    backend: Arc<FakeBackend>,
    preferences: Arc<MemoryPreferenceStore>,
    widget: WelcomeWidget,
    events: UnboundedReceiver<WelcomeEvent>,
}

fn harness(backend: FakeBackend) -> Harness {
    harness_with_config(backend, WelcomeConfig::default())
}

fn harness_with_config(backend: FakeBackend, config: WelcomeConfig) -> Harness {
    let backend = Arc::new(backend);
    let preferences = Arc::new(MemoryPreferenceStore::with_values(HashMap::from([(
        STARTUP_KEY.to_string(),
        json!("none"),
    )])));
    let (tx, events) = WelcomeEventSender::channel();
    let widget = WelcomeWidget::new(services(&backend, &preferences), config, tx);
    Harness {
        backend,
        preferences,
        widget,
        events,
    }
}

async fn bootstrap(harness: &Harness) {
    let handle = harness.widget.initialize().unwrap();
    handle.await.unwrap();
}

fn display_paths(harness: &Harness) -> Vec<String> {
    harness
        .widget
        .presentation()
        .recent
        .unwrap()
        .entries
        .into_iter()
        .map(|entry| entry.display_path)
        .collect()
}

#[tokio::test]
async fn six_recent_workspaces_are_truncated_with_more() {
    let mut h = harness(FakeBackend::with_recent(&[
        "/h/a", "/h/b", "/h/c", "/h/d", "/h/e", "/h/f",
    ]));
    bootstrap(&h).await;

    assert_eq!(h.events.try_recv().unwrap(), WelcomeEvent::BootstrapComplete);
    assert_eq!(display_paths(&h), vec!["~/a", "~/b", "~/c", "~/d", "~/e"]);
    assert!(h.widget.presentation().recent.unwrap().show_more);

    // The snapshot itself keeps everything; only the presentation truncates.
    assert_eq!(h.widget.snapshot().unwrap().recent_workspaces.len(), 6);
}

#[tokio::test]
async fn three_recent_workspaces_are_shown_in_full() {
    let h = harness(FakeBackend::with_recent(&["/h/a", "/h/b", "/h/c"]));
    bootstrap(&h).await;

    assert_eq!(display_paths(&h), vec!["~/a", "~/b", "~/c"]);
    assert!(!h.widget.presentation().recent.unwrap().show_more);
}

#[tokio::test]
async fn recent_limit_comes_from_config() {
    let config = WelcomeConfig {
        recent_limit: 2,
        ..WelcomeConfig::default()
    };
    let h = harness_with_config(
        FakeBackend::with_recent(&["/h/a", "/h/b", "/h/c"]),
        config,
    );
    bootstrap(&h).await;

    assert_eq!(display_paths(&h), vec!["~/a", "~/b"]);
    assert!(h.widget.presentation().recent.unwrap().show_more);
}

#[tokio::test]
async fn snapshot_fields_are_assembled() {
    let h = harness(FakeBackend {
        extensions: Ok(vec!["@theia/core".to_string(), "@theia/ai-core".to_string()]),
        ..FakeBackend::with_recent(&["file:///h/proj", "file:///var/data"])
    });
    bootstrap(&h).await;

    let snapshot = h.widget.snapshot().unwrap();
    assert_eq!(snapshot.version(), Some("1.55.0"));
    assert_eq!(snapshot.home_dir, Some(PathBuf::from("/h")));
    assert!(snapshot.feature_extension_available);
    assert!(!snapshot.is_degraded());
    assert_eq!(snapshot.recent_workspaces[0].display_name, "proj");
    assert_eq!(snapshot.recent_workspaces[0].display_path, "~/proj");
    assert_eq!(snapshot.recent_workspaces[1].display_path, "/var/data");
    assert_eq!(h.widget.presentation().version_label, "Version: 1.55.0");
}

#[tokio::test]
async fn extension_failure_degrades_only_the_feature_flag() {
    let h = harness(FakeBackend {
        extensions: Err("inventory unavailable".to_string()),
        ..FakeBackend::with_recent(&["/h/a", "/h/b"])
    });
    bootstrap(&h).await;

    let snapshot = h.widget.snapshot().unwrap();
    assert_eq!(snapshot.failed_fields, vec![BootstrapField::ExtensionInventory]);
    assert!(!snapshot.feature_extension_available);
    assert_eq!(snapshot.recent_workspaces.len(), 2);
    assert_eq!(snapshot.version(), Some("1.55.0"));
}

#[tokio::test]
async fn every_fetch_failing_still_publishes_a_snapshot() {
    let mut h = harness(FakeBackend {
        version: Err("down".to_string()),
        recent: Err("down".to_string()),
        home: Err("down".to_string()),
        extensions: Err("down".to_string()),
        ..FakeBackend::default()
    });
    bootstrap(&h).await;

    assert_eq!(h.events.try_recv().unwrap(), WelcomeEvent::BootstrapComplete);
    let snapshot = h.widget.snapshot().unwrap();
    assert_eq!(snapshot.application_info, None);
    assert!(snapshot.recent_workspaces.is_empty());
    assert_eq!(snapshot.home_dir, None);
    assert_eq!(snapshot.failed_fields.len(), 4);

    let presentation = h.widget.presentation();
    assert_eq!(presentation.version_label, "");
    assert!(presentation.recent.unwrap().is_empty());
}

#[tokio::test]
async fn home_failure_keeps_full_paths() {
    let h = harness(FakeBackend {
        home: Err("no env".to_string()),
        ..FakeBackend::with_recent(&["/h/a"])
    });
    bootstrap(&h).await;

    assert_eq!(display_paths(&h), vec!["/h/a"]);
    assert_eq!(
        h.widget.snapshot().unwrap().failed_fields,
        vec![BootstrapField::HomeDirectory]
    );
}

#[tokio::test]
async fn rendering_before_bootstrap_is_safe() {
    let gate = Arc::new(Notify::new());
    let mut h = harness(FakeBackend {
        gate: Some(gate.clone()),
        ..FakeBackend::with_recent(&["/h/a"])
    });
    let handle = h.widget.initialize().unwrap();
    tokio::task::yield_now().await;

    assert!(h.widget.snapshot().is_none());
    let presentation = h.widget.presentation();
    assert!(presentation.is_loading());
    assert_eq!(presentation.quote, None);
    assert!(h.events.try_recv().is_err());

    gate.notify_one();
    handle.await.unwrap();
    assert!(!h.widget.presentation().is_loading());
    assert_eq!(h.events.try_recv().unwrap(), WelcomeEvent::BootstrapComplete);
}

#[tokio::test]
async fn bootstrap_runs_once() {
    let mut h = harness(FakeBackend::with_recent(&["/h/a"]));
    bootstrap(&h).await;
    let first = h.widget.snapshot().unwrap();

    assert!(h.widget.initialize().is_none());
    tokio::task::yield_now().await;

    assert_eq!(h.backend.recent_calls(), 1);
    assert!(Arc::ptr_eq(&first, &h.widget.snapshot().unwrap()));
    assert_eq!(h.events.try_recv().unwrap(), WelcomeEvent::BootstrapComplete);
    assert!(h.events.try_recv().is_err());
}

#[tokio::test]
async fn quote_is_stable_across_renders() {
    let h = harness(FakeBackend::default());
    bootstrap(&h).await;

    let quote = h.widget.presentation().quote.unwrap();
    for _ in 0..10 {
        assert_eq!(h.widget.presentation().quote, Some(quote));
    }
    assert_eq!(h.widget.snapshot().unwrap().quote, quote);
}

#[tokio::test]
async fn disposing_mid_bootstrap_suppresses_publish() {
    let gate = Arc::new(Notify::new());
    let mut h = harness(FakeBackend {
        gate: Some(gate.clone()),
        ..FakeBackend::with_recent(&["/h/a"])
    });
    let handle = h.widget.initialize().unwrap();
    tokio::task::yield_now().await;

    h.widget.dispose();
    assert!(h.widget.is_disposed());
    gate.notify_one();
    timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();

    assert!(h.widget.snapshot().is_none());
    assert!(h.events.try_recv().is_err());
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(h.preferences.subscriber_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn dispose_racing_bootstrap_never_publishes_afterwards() {
    for _ in 0..200 {
        let mut h = harness(FakeBackend::with_recent(&["/h/a"]));
        let handle = h.widget.initialize().unwrap();
        tokio::task::yield_now().await;
        h.widget.dispose();
        let published = h.widget.snapshot().is_some();

        handle.await.unwrap();
        let signalled = std::iter::from_fn(|| h.events.try_recv().ok())
            .any(|event| event == WelcomeEvent::BootstrapComplete);
        assert_eq!(h.widget.snapshot().is_some(), published);
        assert_eq!(signalled, published);
    }
}

#[tokio::test]
async fn dropping_widget_releases_preference_subscription() {
    let h = harness(FakeBackend::default());
    assert_eq!(h.preferences.subscriber_count(), 1);
    let preferences = h.preferences.clone();
    drop(h);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(preferences.subscriber_count(), 0);
}

#[tokio::test]
async fn startup_toggle_round_trips_through_the_store() {
    let mut h = harness(FakeBackend::default());
    assert!(!h.widget.startup_page_enabled());

    h.widget.set_startup_page_enabled(true).await.unwrap();
    assert_eq!(h.preferences.get(STARTUP_KEY), Some(json!("welcomePage")));

    let event = timeout(Duration::from_secs(1), h.events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, WelcomeEvent::StartupPreferenceChanged(true));
    assert!(h.widget.startup_page_enabled());
    assert!(h.widget.presentation().startup_page_enabled);

    h.widget.set_startup_page_enabled(false).await.unwrap();
    assert_eq!(h.preferences.get(STARTUP_KEY), Some(json!("none")));
}

#[tokio::test]
async fn open_recent_uses_raw_identifier() {
    let h = harness(FakeBackend::with_recent(&["file:///h/a", "file:///h/b"]));

    let err = h.widget.open_recent(0).await.unwrap_err();
    assert!(matches!(err, WelcomeError::NotBootstrapped));

    bootstrap(&h).await;
    h.widget.open_recent(1).await.unwrap();
    assert_eq!(h.backend.opened(), vec!["file:///h/b".to_string()]);

    let err = h.widget.open_recent(7).await.unwrap_err();
    assert!(matches!(err, WelcomeError::UnknownRecentWorkspace { index: 7 }));
}
