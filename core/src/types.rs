//! Data model shared by the bootstrap sequence and the presentation layer.

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::AsRefStr;
use strum_macros::Display;

use crate::quotes::Quote;

/// Application metadata reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub version: Option<String>,
}

/// One entry of the installed-extension inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionInfo {
    pub name: String,
}

impl ExtensionInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A recently used workspace, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    /// Identifier as handed out by the recent-workspaces service. Used to reopen.
    pub raw_identifier: String,
    /// Short label (usually the last path segment).
    pub display_name: String,
    /// Long path, tildified when it lies under the home directory.
    pub display_path: String,
}

/// The four independent fetches performed during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BootstrapField {
    ApplicationInfo,
    RecentWorkspaces,
    HomeDirectory,
    ExtensionInventory,
}

/// Presentation model assembled once per widget.
///
/// Never exposed partially: the widget publishes it in one step after every
/// fetch has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeSnapshot {
    pub application_info: Option<ApplicationInfo>,
    /// Most recent first.
    pub recent_workspaces: Vec<WorkspaceEntry>,
    pub home_dir: Option<PathBuf>,
    pub feature_extension_available: bool,
    pub quote: Quote,
    /// Fields whose fetch failed and were replaced by their empty default.
    pub failed_fields: Vec<BootstrapField>,
}

impl WelcomeSnapshot {
    pub fn version(&self) -> Option<&str> {
        self.application_info
            .as_ref()
            .and_then(|info| info.version.as_deref())
    }

    pub fn is_degraded(&self) -> bool {
        !self.failed_fields.is_empty()
    }
}
