//! Terminal host for the welcome page.

pub mod local_services;
pub mod render;
pub mod version;

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use welcome_core::WelcomeConfig;
use welcome_core::WelcomeEvent;
use welcome_core::WelcomeEventSender;
use welcome_core::WelcomeWidget;

use crate::local_services::local_services;
use crate::render::render_presentation;
use crate::version::display_version;

const STATE_DIR_NAME: &str = ".welcome";
const CONFIG_FILE: &str = "welcome.toml";
const DEFAULT_LOG_FILTER: &str = "welcome_core=info,welcome_cli=info";
/// How long `startup` waits for the store to echo the new value.
const PREFERENCE_ECHO_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Parser)]
#[command(name = "welcome", version = display_version(), about = "Show the editor welcome page")]
pub struct Cli {
    /// Directory holding recent workspaces, settings and logs (default: ~/.welcome).
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Welcome page config (default: <state-dir>/welcome.toml).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Treat this directory as home when abbreviating paths.
    #[arg(long, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the welcome page.
    Show,
    /// Turn the welcome page on or off at startup.
    Startup {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Open a recent workspace by its position on the welcome page.
    Open { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

pub fn resolve_state_dir(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => dirs::home_dir()
            .map(|home| home.join(STATE_DIR_NAME))
            .context("cannot determine home directory; pass --state-dir"),
    }
}

/// Send logs to `<state-dir>/log/welcome.log`, keeping stdout for output.
pub fn init_logging(state_dir: &Path) -> anyhow::Result<WorkerGuard> {
    let log_dir = state_dir.join("log");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let appender = tracing_appender::rolling::never(&log_dir, "welcome.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();
    Ok(guard)
}

pub async fn run(cli: Cli, state_dir: &Path) -> anyhow::Result<String> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| state_dir.join(CONFIG_FILE));
    let config = WelcomeConfig::load(&config_path)?;
    let services = local_services(state_dir, cli.home.clone()).await?;

    let (events, mut rx) = WelcomeEventSender::channel();
    let widget = WelcomeWidget::new(services, config, events);
    if let Some(bootstrap) = widget.initialize() {
        bootstrap.await.context("welcome bootstrap task failed")?;
    }

    let color = !cli.no_color;
    match cli.command.unwrap_or(Command::Show) {
        Command::Show => Ok(render_presentation(&widget.presentation(), color)),
        Command::Startup { state } => {
            let enabled = state == Toggle::On;
            widget.set_startup_page_enabled(enabled).await?;
            wait_for_preference_echo(&mut rx, enabled).await;
            Ok(format!(
                "welcome page on startup: {}\n",
                if widget.startup_page_enabled() { "on" } else { "off" }
            ))
        }
        Command::Open { index } => {
            widget.open_recent(index).await?;
            let path = widget
                .snapshot()
                .and_then(|snapshot| snapshot.recent_workspaces.get(index).cloned())
                .map(|entry| entry.display_path)
                .unwrap_or_default();
            info!("opened recent workspace #{index}");
            Ok(format!("opened {path}\n"))
        }
    }
}

async fn wait_for_preference_echo(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<WelcomeEvent>,
    enabled: bool,
) {
    let echo = async {
        while let Some(event) = rx.recv().await {
            if event == WelcomeEvent::StartupPreferenceChanged(enabled) {
                return;
            }
        }
    };
    if tokio::time::timeout(PREFERENCE_ECHO_TIMEOUT, echo).await.is_err() {
        tracing::warn!("preference store did not confirm the startup editor change");
    }
}
