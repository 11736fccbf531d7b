//! View model read by whatever renders the welcome page.

use crate::config::HelpLink;
use crate::config::WelcomeConfig;
use crate::quotes::Quote;
use crate::types::WelcomeSnapshot;
use crate::types::WorkspaceEntry;

/// Recently used workspaces, cut down to the display limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSection {
    pub entries: Vec<WorkspaceEntry>,
    /// More workspaces exist than are shown; offer the "More..." entry.
    pub show_more: bool,
}

impl RecentSection {
    pub fn new(all: &[WorkspaceEntry], limit: usize) -> Self {
        Self {
            entries: all.iter().take(limit).cloned().collect(),
            show_more: all.len() > limit,
        }
    }

    /// Nothing to show; the view offers "open a folder" instead.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomePresentation {
    pub application_name: String,
    /// `Version: x.y.z`, or empty when the version is unknown.
    pub version_label: String,
    /// `None` until bootstrap completes.
    pub recent: Option<RecentSection>,
    pub help_links: Vec<HelpLink>,
    pub quote: Option<Quote>,
    pub feature_extension_available: bool,
    pub startup_page_enabled: bool,
}

impl WelcomePresentation {
    pub fn build(
        config: &WelcomeConfig,
        snapshot: Option<&WelcomeSnapshot>,
        startup_page_enabled: bool,
    ) -> Self {
        let version_label = snapshot
            .and_then(WelcomeSnapshot::version)
            .map(|version| format!("Version: {version}"))
            .unwrap_or_default();
        Self {
            application_name: config.application_name.clone(),
            version_label,
            recent: snapshot
                .map(|snapshot| RecentSection::new(&snapshot.recent_workspaces, config.recent_limit)),
            help_links: config.help_links.clone(),
            quote: snapshot.map(|snapshot| snapshot.quote),
            feature_extension_available: snapshot
                .is_some_and(|snapshot| snapshot.feature_extension_available),
            startup_page_enabled,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.recent.is_none()
    }
}
