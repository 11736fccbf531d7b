use std::sync::OnceLock;

pub const WELCOME_CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Id of the build that produced this binary, recorded by `build.rs`.
pub const BUILD_ID: Option<&str> = option_env!("WELCOME_BUILD_ID");

/// Version shown as `Version: ...` on the welcome page.
pub fn display_version() -> &'static str {
    static DISPLAY: OnceLock<String> = OnceLock::new();
    DISPLAY.get_or_init(|| with_build_id(WELCOME_CLI_VERSION, BUILD_ID))
}

/// Semver build metadata: `1.2.3+abc1234`.
fn with_build_id(version: &str, build_id: Option<&str>) -> String {
    match build_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => format!("{version}+{id}"),
        None => version.to_string(),
    }
}
