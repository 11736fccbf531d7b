use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WelcomeError>;

/// Errors surfaced to callers of the welcome widget.
///
/// Bootstrap fetch failures never show up here. They degrade the affected
/// snapshot field and are listed in [`crate::WelcomeSnapshot::failed_fields`].
#[derive(Debug, Error)]
pub enum WelcomeError {
    #[error("failed to write preference `{key}`: {source}")]
    PreferenceWrite {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to read welcome config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid welcome config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no recent workspace at position {index}")]
    UnknownRecentWorkspace { index: usize },

    #[error("recent workspaces are not available before bootstrap completes")]
    NotBootstrapped,

    #[error("failed to open workspace `{identifier}`: {source}")]
    Open {
        identifier: String,
        #[source]
        source: anyhow::Error,
    },
}
