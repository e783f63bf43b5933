//! Incremental channel history synchronization.
//!
//! The [`SyncEngine`] reconciles a remote channel history against the local
//! snapshot kept by a [`SnapshotStore`](annalist_storage::SnapshotStore):
//!
//! - **No snapshot, or an empty one**: page backward from the newest message
//!   until the source is exhausted
//! - **Existing messages**: page forward from the last stored message only
//! - **Merge**: drop IDs already stored, append, re-sort by creation time, persist
//!
//! Nothing is written unless every page of the pass was fetched successfully.
//!
//! # Example
//!
//! ```rust,ignore
//! use annalist_storage::FileSystemStore;
//! use annalist_sync::{SyncEngine, SyncOptions};
//! use std::time::Duration;
//!
//! let engine = SyncEngine::new(
//!     FileSystemStore::new("exports"),
//!     SyncOptions::default().with_request_delay(Duration::from_millis(1000)),
//! );
//! let report = engine.sync(&channel).await?;
//! println!("{} new, {} total", report.new_messages(), report.total_messages());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod merge;
mod options;
mod pager;
mod source;

pub use engine::SyncEngine;
pub use merge::filter_new_messages;
pub use options::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SyncOptions};
pub use pager::{collect_after, collect_history};
pub use source::{FetchDirection, MessageSource};
