//! Filesystem-backed snapshot store.
//!
//! Snapshots live as pretty-printed JSON files directly inside one export
//! directory, one file per channel:
//!
//! ```text
//! exports/
//! ├── general-1100000000000000000.json
//! └── announcements-1100000000000000777.json
//! ```

use crate::SnapshotStore;
use crate::naming::{snapshot_file_name, snapshot_suffix};
use annalist_core::ChannelSnapshot;
use annalist_error::{AnnalistResult, JsonError, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Filesystem snapshot store rooted at an export directory.
///
/// The directory is created lazily on the first save.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    base_dir: PathBuf,
}

impl FileSystemStore {
    /// Create a store rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Export directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Scan the export directory for a file ending in `-{channel_id}.json`.
    ///
    /// Linear in the number of directory entries. Read errors are logged and
    /// treated as "not found".
    #[tracing::instrument(skip(self), fields(dir = %self.base_dir.display()))]
    async fn find_existing(&self, channel_id: &str) -> Option<PathBuf> {
        let suffix = snapshot_suffix(channel_id);

        let mut entries = match tokio::fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Export directory does not exist yet");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read export directory");
                return None;
            }
        };

        let mut matches = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name();
                    if let Some(name) = name.to_str()
                        && name.ends_with(&suffix)
                    {
                        matches.push(name.to_string());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read export directory entry");
                    break;
                }
            }
        }

        if matches.len() > 1 {
            tracing::warn!(?matches, "Several export files match channel, using the first");
        }
        matches.sort();
        matches.into_iter().next().map(|name| self.base_dir.join(name))
    }

    /// Sibling temp path that never matches the channel suffix scan.
    fn temp_path(path: &Path) -> PathBuf {
        path.with_extension("json.tmp")
    }

    async fn write_temp(temp_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(temp_path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SnapshotStore for FileSystemStore {
    #[tracing::instrument(skip(self), fields(dir = %self.base_dir.display()))]
    async fn resolve(&self, channel_id: &str, display_name: &str) -> PathBuf {
        if let Some(existing) = self.find_existing(channel_id).await {
            tracing::debug!(path = %existing.display(), "Found existing export file");
            return existing;
        }

        let path = self.base_dir.join(snapshot_file_name(channel_id, display_name));
        tracing::debug!(path = %path.display(), "No export file yet, using new path");
        path
    }

    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn load(&self, path: &Path) -> Option<ChannelSnapshot> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read existing export, ignoring it");
                return None;
            }
        };

        match serde_json::from_slice::<ChannelSnapshot>(&raw) {
            Ok(snapshot) => {
                tracing::debug!(
                    total_messages = snapshot.total_messages(),
                    "Loaded existing export"
                );
                Some(snapshot)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Existing export is not valid JSON, ignoring it");
                None
            }
        }
    }

    #[tracing::instrument(skip(self, snapshot), fields(path = %path.display(), total_messages = snapshot.total_messages()))]
    async fn save(&self, path: &Path, snapshot: &ChannelSnapshot) -> AnnalistResult<()> {
        let parent = path.parent().ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidPath(path.display().to_string()))
        })?;

        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;

        let mut bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| JsonError::snapshot(path, e.to_string()))?;
        bytes.push(b'\n');

        // Write to temp file first, then rename for atomicity
        let temp_path = Self::temp_path(path);
        if let Err(e) = Self::write_temp(&temp_path, &bytes).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
            .into());
        }

        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        tracing::info!(size = bytes.len(), "Saved export");
        Ok(())
    }
}
