//! Contracts of the backend services the welcome widget reads from.
//!
//! None of these are implemented here; hosts pass concrete implementations in
//! through [`WelcomeServices`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::preferences::PreferenceStore;
use crate::types::ApplicationInfo;
use crate::types::ExtensionInfo;

#[async_trait]
pub trait ApplicationInfoService: Send + Sync {
    async fn application_info(&self) -> anyhow::Result<Option<ApplicationInfo>>;
}

#[async_trait]
pub trait RecentWorkspaceService: Send + Sync {
    /// Workspace identifiers, most recently used first.
    async fn recent_workspaces(&self) -> anyhow::Result<Vec<String>>;

    /// Switch the editor to the given workspace.
    async fn open(&self, identifier: &str) -> anyhow::Result<()>;
}

#[async_trait]
pub trait EnvironmentService: Send + Sync {
    /// Home directory as a URI (`file:///home/user`) or plain path.
    async fn home_dir_uri(&self) -> anyhow::Result<String>;
}

#[async_trait]
pub trait ExtensionInventory: Send + Sync {
    async fn extension_infos(&self) -> anyhow::Result<Vec<ExtensionInfo>>;
}

/// Resolves workspace identifiers to human readable labels.
///
/// Returns `None` when the identifier cannot be resolved.
pub trait LabelProvider: Send + Sync {
    fn long_name(&self, identifier: &str) -> Option<String>;
    fn short_name(&self, identifier: &str) -> Option<String>;
}

/// Everything the welcome widget needs from its host.
#[derive(Clone)]
pub struct WelcomeServices {
    pub app_info: Arc<dyn ApplicationInfoService>,
    pub workspaces: Arc<dyn RecentWorkspaceService>,
    pub environment: Arc<dyn EnvironmentService>,
    pub extensions: Arc<dyn ExtensionInventory>,
    pub labels: Arc<dyn LabelProvider>,
    pub preferences: Arc<dyn PreferenceStore>,
}
