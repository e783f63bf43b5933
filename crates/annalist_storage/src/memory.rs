//! In-memory snapshot store.

use crate::SnapshotStore;
use crate::naming::{snapshot_file_name, snapshot_suffix};
use annalist_core::ChannelSnapshot;
use annalist_error::{AnnalistResult, JsonError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Snapshot store that keeps serialized snapshots in a map keyed by path.
///
/// Snapshots are stored as JSON text, like on disk, so corrupt content and
/// round-trip behavior can be exercised without touching the filesystem.
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    base_dir: PathBuf,
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    /// Create an empty store whose paths are rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Place raw content at `path`, bypassing serialization.
    pub fn insert_raw(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files().insert(path.into(), content.into());
    }

    /// Raw content stored at `path`.
    pub fn raw(&self, path: &Path) -> Option<String> {
        self.files().get(path).cloned()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn files(&self) -> MutexGuard<'_, BTreeMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemoryStore {
    async fn resolve(&self, channel_id: &str, display_name: &str) -> PathBuf {
        let suffix = snapshot_suffix(channel_id);
        let existing = self
            .files()
            .keys()
            .find(|path| {
                path.parent() == Some(self.base_dir.as_path())
                    && path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.ends_with(&suffix))
            })
            .cloned();

        existing.unwrap_or_else(|| self.base_dir.join(snapshot_file_name(channel_id, display_name)))
    }

    async fn load(&self, path: &Path) -> Option<ChannelSnapshot> {
        let raw = self.raw(path)?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Stored snapshot is not valid JSON, ignoring it");
                None
            }
        }
    }

    async fn save(&self, path: &Path, snapshot: &ChannelSnapshot) -> AnnalistResult<()> {
        let raw = serde_json::to_string_pretty(snapshot)
            .map_err(|e| JsonError::snapshot(path, e.to_string()))?;
        self.files().insert(path.to_path_buf(), raw);
        *self.saves.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;
        Ok(())
    }
}
