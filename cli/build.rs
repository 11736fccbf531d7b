use std::env;
use std::process::Command;

const BUILD_ID_VAR: &str = "WELCOME_BUILD_ID";

/// Records which build produced the binary so the welcome page can show it.
///
/// Packagers can pin the id through `WELCOME_BUILD_ID`; otherwise the
/// checkout is described with git. Builds outside a checkout carry no id.
fn main() {
    println!("cargo:rerun-if-env-changed={BUILD_ID_VAR}");

    let build_id = env::var(BUILD_ID_VAR)
        .ok()
        .filter(|id| !id.trim().is_empty())
        .or_else(describe_checkout);

    if let Some(id) = build_id {
        println!("cargo:rustc-env={BUILD_ID_VAR}={}", id.trim());
    }
}

fn describe_checkout() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!described.is_empty()).then_some(described)
}
