#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use tokio::sync::Notify;
use welcome_core::ApplicationInfo;
use welcome_core::ApplicationInfoService;
use welcome_core::EnvironmentService;
use welcome_core::ExtensionInfo;
use welcome_core::ExtensionInventory;
use welcome_core::MemoryPreferenceStore;
use welcome_core::RecentWorkspaceService;
use welcome_core::UriLabelProvider;
use welcome_core::WelcomeServices;

/// Scriptable stand-in for every backend service the widget talks to.
pub struct FakeBackend {
    pub version: Result<Option<String>, String>,
    pub recent: Result<Vec<String>, String>,
    pub home: Result<String, String>,
    pub extensions: Result<Vec<String>, String>,
    /// When set, `recent_workspaces` blocks until notified.
    pub gate: Option<Arc<Notify>>,
    pub opened: Mutex<Vec<String>>,
    pub recent_calls: AtomicUsize,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            version: Ok(Some("1.55.0".to_string())),
            recent: Ok(Vec::new()),
            home: Ok("file:///h".to_string()),
            extensions: Ok(vec!["@theia/core".to_string()]),
            gate: None,
            opened: Mutex::new(Vec::new()),
            recent_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeBackend {
    pub fn with_recent(recent: &[&str]) -> Self {
        Self {
            recent: Ok(recent.iter().map(|s| (*s).to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn recent_calls(&self) -> usize {
        self.recent_calls.load(Ordering::SeqCst)
    }
}

fn scripted<T: Clone>(result: &Result<T, String>) -> anyhow::Result<T> {
    result.clone().map_err(|message| anyhow::anyhow!(message))
}

#[async_trait]
impl ApplicationInfoService for FakeBackend {
    async fn application_info(&self) -> anyhow::Result<Option<ApplicationInfo>> {
        scripted(&self.version).map(|version| version.map(|version| ApplicationInfo { version: Some(version) }))
    }
}

#[async_trait]
impl RecentWorkspaceService for FakeBackend {
    async fn recent_workspaces(&self) -> anyhow::Result<Vec<String>> {
        self.recent_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        scripted(&self.recent)
    }

    async fn open(&self, identifier: &str) -> anyhow::Result<()> {
        self.opened.lock().unwrap().push(identifier.to_string());
        Ok(())
    }
}

#[async_trait]
impl EnvironmentService for FakeBackend {
    async fn home_dir_uri(&self) -> anyhow::Result<String> {
        scripted(&self.home)
    }
}

#[async_trait]
impl ExtensionInventory for FakeBackend {
    async fn extension_infos(&self) -> anyhow::Result<Vec<ExtensionInfo>> {
        scripted(&self.extensions).map(|names| names.into_iter().map(ExtensionInfo::new).collect())
    }
}

pub fn services(backend: &Arc<FakeBackend>, preferences: &Arc<MemoryPreferenceStore>) -> WelcomeServices {
    WelcomeServices {
        app_info: backend.clone(),
        workspaces: backend.clone(),
        environment: backend.clone(),
        extensions: backend.clone(),
        labels: Arc::new(UriLabelProvider),
        preferences: preferences.clone(),
    }
}
