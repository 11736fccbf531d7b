//! Welcome page configuration, loaded from TOML.

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::error::WelcomeError;

pub const DEFAULT_STARTUP_PREFERENCE_KEY: &str = "workbench.startupEditor";
pub const DEFAULT_RECENT_LIMIT: usize = 5;
pub const DEFAULT_FEATURE_EXTENSION: &str = "@theia/ai-core";

/// External link listed in the help section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WelcomeConfig {
    pub application_name: String,
    /// Number of recent workspaces shown before the "More..." entry.
    pub recent_limit: usize,
    /// Extension whose presence enables the extended feature section.
    pub feature_extension: String,
    pub startup_preference_key: String,
    pub help_links: Vec<HelpLink>,
}

impl Default for WelcomeConfig {
    fn default() -> Self {
        Self {
            application_name: "NukeIDE".to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            feature_extension: DEFAULT_FEATURE_EXTENSION.to_string(),
            startup_preference_key: DEFAULT_STARTUP_PREFERENCE_KEY.to_string(),
            help_links: vec![
                HelpLink {
                    label: "NukeIDE Documentation".to_string(),
                    url: "https://github.com/nukehub-dev/nuke-ide".to_string(),
                },
                HelpLink {
                    label: "Nuclear Simulation Workshop".to_string(),
                    url: "https://github.com/fusion-energy/neutronics-workshop".to_string(),
                },
            ],
        }
    }
}

impl WelcomeConfig {
    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no welcome config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(WelcomeError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&content).map_err(|source| WelcomeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
