//! Display paths for recently used workspaces.

use std::path::Path;

use crate::services::LabelProvider;
use crate::types::WorkspaceEntry;

const HOME_TOKEN: &str = "~";

/// Abbreviate `home/` at the start of `path` to `~/`.
///
/// Only paths strictly below `home` are rewritten; `home` itself, siblings
/// sharing a textual prefix (`/home/u2` vs `/home/u`) and Windows drive paths
/// are returned unchanged.
pub fn tildify(path: &str, home: &str) -> String {
    let home = home.trim_end_matches('/');
    if home.is_empty() || has_drive_letter(path) {
        return path.to_string();
    }
    match path.strip_prefix(home) {
        Some(rest) if rest.starts_with('/') && rest.len() > 1 => format!("{HOME_TOKEN}{rest}"),
        _ => path.to_string(),
    }
}

fn has_drive_letter(path: &str) -> bool {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let mut chars = trimmed.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}

/// Turn raw workspace identifiers into display entries.
///
/// Output has the same length and order as `identifiers`. Identifiers the
/// label provider cannot resolve fall back to the raw string for both the
/// name and the path.
pub fn build_workspace_entries(
    identifiers: &[String],
    home: Option<&Path>,
    labels: &dyn LabelProvider,
) -> Vec<WorkspaceEntry> {
    let home = home.map(|home| home.to_string_lossy());
    identifiers
        .iter()
        .map(|identifier| {
            let long_name = labels
                .long_name(identifier)
                .unwrap_or_else(|| identifier.clone());
            let display_path = match home.as_deref() {
                Some(home) => tildify(&long_name, home),
                None => long_name,
            };
            let display_name = labels
                .short_name(identifier)
                .unwrap_or_else(|| identifier.clone());
            WorkspaceEntry {
                raw_identifier: identifier.clone(),
                display_name,
                display_path,
            }
        })
        .collect()
}
