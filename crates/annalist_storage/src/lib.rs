//! Snapshot persistence for Annalist.
//!
//! This crate is the persistence boundary of the exporter. It maps a channel
//! ID to exactly one snapshot file and loads/saves [`ChannelSnapshot`]s.
//!
//! # Features
//!
//! - **Stable file identity**: files are found by the `-{channel_id}.json` suffix,
//!   so a renamed channel keeps writing to its original file
//! - **Forgiving reads**: a missing or corrupt file loads as "no snapshot"
//! - **Atomic writes**: temp file + rename, so readers never see a partial file
//!
//! # Example
//!
//! ```rust
//! use annalist_core::{ChannelInfo, ChannelSnapshot};
//! use annalist_storage::{FileSystemStore, SnapshotStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemStore::new("/tmp/annalist-exports");
//! let channel = ChannelInfo::new("1100000000000000000", Some("general".to_string()), None);
//!
//! let path = store.resolve(&channel.id, channel.display_name()).await;
//! store.save(&path, &ChannelSnapshot::new(&channel, Vec::new())).await?;
//!
//! let loaded = store.load(&path).await;
//! assert!(loaded.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;
mod naming;

pub use annalist_error::{StorageError, StorageErrorKind};
pub use filesystem::FileSystemStore;
pub use memory::MemoryStore;
pub use naming::{FALLBACK_CHANNEL_NAME, SNAPSHOT_EXTENSION, sanitize_channel_name, snapshot_file_name};

use annalist_core::ChannelSnapshot;
use annalist_error::AnnalistResult;
use std::path::{Path, PathBuf};

/// Trait for snapshot persistence backends.
///
/// Reads are infallible by contract: anything that prevents a snapshot from
/// being read is reported as `None` so that the caller falls back to a full sync.
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Find the snapshot location for a channel.
    ///
    /// An existing file for `channel_id` wins over the display name, which is
    /// only used to name a brand new file.
    async fn resolve(&self, channel_id: &str, display_name: &str) -> PathBuf;

    /// Load a snapshot, or `None` if it is absent or unreadable.
    async fn load(&self, path: &Path) -> Option<ChannelSnapshot>;

    /// Persist a snapshot, replacing any previous content at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or written. A
    /// failed save leaves the previous file intact.
    async fn save(&self, path: &Path, snapshot: &ChannelSnapshot) -> AnnalistResult<()>;
}
