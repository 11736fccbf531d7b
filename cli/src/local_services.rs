//! File-backed implementations of the welcome page services.
//!
//! Everything lives under one state directory:
//!
//! ```text
//! <state-dir>/
//!   recent-workspaces.json   {"recentRoots": ["file:///home/u/proj", ...]}
//!   extensions.json          ["@theia/ai-core", ...]
//!   settings.json            {"workbench.startupEditor": "welcomePage", ...}
//!   welcome.toml             optional WelcomeConfig
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::sync::broadcast;
use tracing::debug;
use tracing::info;
use url::Url;
use welcome_core::ApplicationInfo;
use welcome_core::ApplicationInfoService;
use welcome_core::EnvironmentService;
use welcome_core::ExtensionInfo;
use welcome_core::ExtensionInventory;
use welcome_core::MemoryPreferenceStore;
use welcome_core::PreferenceChange;
use welcome_core::PreferenceStore;
use welcome_core::RecentWorkspaceService;
use welcome_core::UriLabelProvider;
use welcome_core::WelcomeServices;

use crate::version::display_version;

pub const RECENT_WORKSPACES_FILE: &str = "recent-workspaces.json";
pub const EXTENSIONS_FILE: &str = "extensions.json";
pub const SETTINGS_FILE: &str = "settings.json";

/// Recent roots kept on disk; older entries fall off the end.
const MAX_RECENT_ROOTS: usize = 20;

/// Wire up every service from files under `state_dir`.
pub async fn local_services(state_dir: &Path, home: Option<PathBuf>) -> anyhow::Result<WelcomeServices> {
    let app = Arc::new(LocalApplication::new(state_dir.join(EXTENSIONS_FILE)));
    let preferences = Arc::new(JsonPreferenceStore::open(state_dir.join(SETTINGS_FILE)).await?);
    Ok(WelcomeServices {
        app_info: app.clone(),
        workspaces: Arc::new(RecentWorkspacesFile::new(state_dir.join(RECENT_WORKSPACES_FILE))),
        environment: Arc::new(LocalEnvironment::new(home)),
        extensions: app,
        labels: Arc::new(UriLabelProvider),
        preferences,
    })
}

async fn read_json<T>(path: &Path) -> anyhow::Result<Option<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    let value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(value))
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Version comes from the build; the extension list from `extensions.json`.
pub struct LocalApplication {
    extensions_path: PathBuf,
}

impl LocalApplication {
    pub fn new(extensions_path: PathBuf) -> Self {
        Self { extensions_path }
    }
}

#[async_trait]
impl ApplicationInfoService for LocalApplication {
    async fn application_info(&self) -> anyhow::Result<Option<ApplicationInfo>> {
        Ok(Some(ApplicationInfo {
            version: Some(display_version().to_string()),
        }))
    }
}

#[async_trait]
impl ExtensionInventory for LocalApplication {
    async fn extension_infos(&self) -> anyhow::Result<Vec<ExtensionInfo>> {
        let names: Vec<String> = read_json(&self.extensions_path).await?.unwrap_or_default();
        Ok(names.into_iter().map(ExtensionInfo::new).collect())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentWorkspacesState {
    #[serde(default)]
    recent_roots: Vec<String>,
}

/// Recently opened workspaces, most recent first.
pub struct RecentWorkspacesFile {
    path: PathBuf,
    // Serializes read-modify-write cycles in `open`.
    lock: Mutex<()>,
}

impl RecentWorkspacesFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> anyhow::Result<RecentWorkspacesState> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }
}

#[async_trait]
impl RecentWorkspaceService for RecentWorkspacesFile {
    async fn recent_workspaces(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.load().await?.recent_roots)
    }

    async fn open(&self, identifier: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut state = self.load().await?;
        state.recent_roots.retain(|root| root != identifier);
        state.recent_roots.insert(0, identifier.to_string());
        state.recent_roots.truncate(MAX_RECENT_ROOTS);
        write_json(&self.path, &state).await?;
        info!("workspace {identifier} moved to the top of the recent list");
        Ok(())
    }
}

pub struct LocalEnvironment {
    home: Option<PathBuf>,
}

impl LocalEnvironment {
    /// Use `home`, or the user's home directory when `None`.
    pub fn new(home: Option<PathBuf>) -> Self {
        Self {
            home: home.or_else(dirs::home_dir),
        }
    }
}

#[async_trait]
impl EnvironmentService for LocalEnvironment {
    async fn home_dir_uri(&self) -> anyhow::Result<String> {
        let home = self
            .home
            .as_ref()
            .context("home directory is not known")?;
        let uri = Url::from_file_path(home)
            .map_err(|()| anyhow::anyhow!("home directory {} is not absolute", home.display()))?;
        Ok(uri.to_string())
    }
}

/// Preference store persisted as a flat JSON object.
pub struct JsonPreferenceStore {
    path: PathBuf,
    inner: MemoryPreferenceStore,
    write_lock: Mutex<()>,
}

impl JsonPreferenceStore {
    pub async fn open(path: PathBuf) -> anyhow::Result<Self> {
        let values: HashMap<String, Value> = read_json(&path).await?.unwrap_or_default();
        debug!("loaded {} preferences from {}", values.len(), path.display());
        Ok(Self {
            path,
            inner: MemoryPreferenceStore::with_values(values),
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key)
    }

    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.inner.subscribe()
    }

    async fn update_value(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.inner.values();
        values.insert(key.to_string(), value.clone());
        // Persist first so subscribers never see a value that is not on disk.
        write_json(&self.path, &values).await?;
        self.inner.set(key, value);
        Ok(())
    }
}
