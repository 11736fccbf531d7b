use std::path::Path;
use std::path::PathBuf;

use url::Url;

use crate::services::LabelProvider;

/// Label provider for `file://` URIs and plain filesystem paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriLabelProvider;

impl LabelProvider for UriLabelProvider {
    fn long_name(&self, identifier: &str) -> Option<String> {
        let path = identifier_to_path(identifier)?;
        Some(path.to_string_lossy().into_owned())
    }

    fn short_name(&self, identifier: &str) -> Option<String> {
        let path = identifier_to_path(identifier)?;
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .or_else(|| Some(path.to_string_lossy().into_owned()))
    }
}

/// Convert a workspace identifier into a filesystem path.
///
/// Accepts `file://` URIs and absolute paths. Anything else (other schemes,
/// relative paths, garbage) yields `None`.
pub fn identifier_to_path(identifier: &str) -> Option<PathBuf> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains("://") {
        let url = Url::parse(trimmed).ok()?;
        if url.scheme() != "file" {
            return None;
        }
        // Remote hosts (`file://server/share`) are not resolvable locally.
        return url.to_file_path().ok();
    }

    let path = Path::new(trimmed);
    (path.is_absolute() || trimmed.starts_with('/')).then(|| path.to_path_buf())
}
