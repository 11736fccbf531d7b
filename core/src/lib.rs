//! Welcome page orchestration for an editor started without a workspace.
//!
//! The widget gathers application info, recent workspaces, the home directory
//! and the extension inventory concurrently, publishes a single immutable
//! [`WelcomeSnapshot`], and mirrors the `workbench.startupEditor` preference
//! for the "show on startup" toggle.
//!
//! ```ignore
//! let (events, mut rx) = WelcomeEventSender::channel();
//! let widget = WelcomeWidget::new(services, WelcomeConfig::default(), events);
//! widget.initialize();
//!
//! while let Some(event) = rx.recv().await {
//!     render(&widget.presentation());
//! }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod labels;
pub mod paths;
pub mod preferences;
pub mod presentation;
pub mod quotes;
pub mod services;
pub mod types;
mod widget;

pub use config::WelcomeConfig;
pub use error::Result;
pub use error::WelcomeError;
pub use event::WelcomeEvent;
pub use event::WelcomeEventSender;
pub use labels::UriLabelProvider;
pub use paths::build_workspace_entries;
pub use paths::tildify;
pub use preferences::MemoryPreferenceStore;
pub use preferences::PreferenceChange;
pub use preferences::PreferenceStore;
pub use preferences::StartupEditor;
pub use preferences::StartupPreferenceBridge;
pub use presentation::RecentSection;
pub use presentation::WelcomePresentation;
pub use quotes::Quote;
pub use quotes::SessionQuote;
pub use services::ApplicationInfoService;
pub use services::EnvironmentService;
pub use services::ExtensionInventory;
pub use services::LabelProvider;
pub use services::RecentWorkspaceService;
pub use services::WelcomeServices;
pub use types::ApplicationInfo;
pub use types::BootstrapField;
pub use types::ExtensionInfo;
pub use types::WelcomeSnapshot;
pub use types::WorkspaceEntry;
pub use widget::WelcomeWidget;
pub use widget::assemble_snapshot;
