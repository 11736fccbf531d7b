//! Preference store contract and the startup-editor preference.

mod bridge;
mod memory;

use async_trait::async_trait;
use serde_json::Value;
use strum_macros::AsRefStr;
use strum_macros::Display;
use strum_macros::EnumString;
use tokio::sync::broadcast;

pub use bridge::StartupPreferenceBridge;
pub use memory::MemoryPreferenceStore;

/// A single preference change as broadcast by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceChange {
    pub key: String,
    /// `None` when the preference was removed.
    pub new_value: Option<Value>,
}

/// Key-value store for user settings, shared by many consumers.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    /// Subscribe to every change. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange>;

    async fn update_value(&self, key: &str, value: Value) -> anyhow::Result<()>;
}

/// What the editor opens on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum StartupEditor {
    #[default]
    WelcomePage,
    WelcomePageInEmptyWorkbench,
    None,
}

impl StartupEditor {
    pub fn shows_welcome_page(self) -> bool {
        matches!(
            self,
            StartupEditor::WelcomePage | StartupEditor::WelcomePageInEmptyWorkbench
        )
    }

    /// The only two values the welcome page toggle ever writes.
    pub fn for_toggle(enabled: bool) -> Self {
        if enabled {
            StartupEditor::WelcomePage
        } else {
            StartupEditor::None
        }
    }

    pub fn to_value(self) -> Value {
        Value::String(self.as_ref().to_string())
    }
}

/// Derive the toggle state from a raw stored value.
///
/// A missing value means the store default (`welcomePage`); anything that is
/// not one of the known strings counts as disabled.
pub fn startup_page_enabled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => StartupEditor::default().shows_welcome_page(),
        Some(Value::String(raw)) => raw
            .parse::<StartupEditor>()
            .map(StartupEditor::shows_welcome_page)
            .unwrap_or(false),
        Some(_) => false,
    }
}
