// Cache path utilities.
// Constructs filesystem paths for snapshots and the log file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use url::form_urlencoded;

use crate::identity::CacheKey;

/// Get the default cache directory (~/.cache/gitmarks on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gitmarks").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one snapshot file per cache key.
pub fn snapshots_dir(root: &Path) -> PathBuf {
    root.join("snapshots")
}

/// Path to the snapshot file for `key`.
pub fn snapshot_path(root: &Path, key: &CacheKey) -> PathBuf {
    snapshots_dir(root).join(format!("{}.json", file_name(key.as_str())))
}

/// Percent-encode a name into a single path component.
/// Distinct names always map to distinct file names.
fn file_name(name: &str) -> String {
    form_urlencoded::byte_serialize(name.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}
