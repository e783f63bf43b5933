//! Core data types for Annalist.
//!
//! This crate provides the records that make up a channel export and the
//! summary returned by each sync pass. It has no I/O of its own.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod message;
mod ordering;
mod report;
mod snapshot;
mod timestamp;

pub use channel::{ChannelInfo, GuildInfo};
pub use message::{
    AttachmentRecord, AttachmentRecordBuilder, AttachmentRecordBuilderError, MessageRecord,
    MessageRecordBuilder, MessageRecordBuilderError,
};
pub use ordering::{compare_chronologically, compare_snowflakes, is_chronological, sort_chronologically};
pub use report::{SyncMode, SyncReport};
pub use snapshot::ChannelSnapshot;
