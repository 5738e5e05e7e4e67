// Snapshot stores for reading and writing cached starred lists.
// Handles JSON serialization, atomic file writes, and soft-failing reads.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GitmarksError, Result};
use crate::identity::CacheKey;
use crate::state::Row;

use super::paths;

/// The persisted starred list of one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(alias = "data")]
    pub rows: Vec<Row>,
}

impl Snapshot {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached, if the payload recorded it.
    #[serde(default)]
    pub cached_at: Option<DateTime<Utc>>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Some(Utc::now()),
        }
    }
}

/// Key-value capability the loader persists snapshots through.
pub trait SnapshotStore: Send + Sync {
    /// Read the snapshot for `key`. Missing or unreadable entries are `None`.
    fn read(&self, key: &CacheKey) -> Option<CachedData<Snapshot>>;

    /// Overwrite the snapshot for `key`.
    fn write(&self, key: &CacheKey, snapshot: &Snapshot) -> Result<()>;

    /// Remove the snapshot for `key`; a missing entry is not an error.
    fn clear(&self, key: &CacheKey) -> Result<()>;
}

/// Decode a stored payload, treating anything unparsable as absent.
fn decode(key: &CacheKey, contents: &str) -> Option<CachedData<Snapshot>> {
    if let Ok(cached) = serde_json::from_str::<CachedData<Snapshot>>(contents) {
        return Some(cached);
    }
    // Bare `{"data": [...]}` payloads predate the envelope.
    match serde_json::from_str::<Snapshot>(contents) {
        Ok(snapshot) => Some(CachedData {
            data: snapshot,
            cached_at: None,
        }),
        Err(e) => {
            warn!(%key, error = %e, "discarding malformed cached snapshot");
            None
        }
    }
}

fn encode(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string_pretty(&CachedData::new(snapshot))
        .map_err(|e| GitmarksError::CacheWrite(e.to_string()))
}

/// One JSON file per cache key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &CacheKey) -> Option<CachedData<Snapshot>> {
        let path = paths::snapshot_path(&self.root, key);
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(contents) => decode(key, &contents),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cached snapshot");
                None
            }
        }
    }

    fn write(&self, key: &CacheKey, snapshot: &Snapshot) -> Result<()> {
        let path = paths::snapshot_path(&self.root, key);
        let json = encode(snapshot)?;
        write_atomic(&path, &json).map_err(|e| GitmarksError::CacheWrite(e.to_string()))?;
        debug!(path = %path.display(), rows = snapshot.rows.len(), "wrote snapshot");
        Ok(())
    }

    fn clear(&self, key: &CacheKey) -> Result<()> {
        let path = paths::snapshot_path(&self.root, key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Write text to `path` via a temp file and rename.
fn write_atomic(path: &Path, text: &str) -> std::io::Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// In-process store holding serialized payloads, for runs that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw payload as-is.
    #[cfg(test)]
    pub fn insert_raw(&self, key: &CacheKey, payload: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.as_str().to_string(), payload.into());
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &CacheKey) -> Option<CachedData<Snapshot>> {
        let entries = self.entries.lock().ok()?;
        let contents = entries.get(key.as_str())?;
        decode(key, contents)
    }

    fn write(&self, key: &CacheKey, snapshot: &Snapshot) -> Result<()> {
        let json = encode(snapshot)?;
        self.entries
            .lock()
            .map_err(|e| GitmarksError::CacheWrite(e.to_string()))?
            .insert(key.as_str().to_string(), json);
        Ok(())
    }

    fn clear(&self, key: &CacheKey) -> Result<()> {
        self.entries
            .lock()
            .map_err(|e| GitmarksError::CacheWrite(e.to_string()))?
            .remove(key.as_str());
        Ok(())
    }
}
