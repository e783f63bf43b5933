//! Per-pass sync summary.

use std::path::PathBuf;

/// Which fetch strategy a pass used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SyncMode {
    /// Paged backward through the whole history
    #[display("full")]
    Full,
    /// Paged forward from the last stored message
    #[display("incremental")]
    Incremental,
}

/// Result of one sync pass.
///
/// `new_messages == 0` means the export was already up to date.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct SyncReport {
    /// Snapshot file backing the channel
    file_path: PathBuf,
    /// Messages added by this pass
    new_messages: usize,
    /// Messages in the snapshot after this pass
    total_messages: usize,
    /// Strategy used by this pass
    mode: SyncMode,
}

impl SyncReport {
    /// Create a report.
    pub fn new(file_path: PathBuf, new_messages: usize, total_messages: usize, mode: SyncMode) -> Self {
        Self {
            file_path,
            new_messages,
            total_messages,
            mode,
        }
    }

    /// Whether the pass found nothing new.
    pub fn is_up_to_date(&self) -> bool {
        self.new_messages == 0
    }
}
