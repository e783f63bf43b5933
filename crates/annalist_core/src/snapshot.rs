//! The persisted export of one channel.

use crate::{ChannelInfo, MessageRecord, sort_chronologically};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Complete local record of a channel's messages.
///
/// Every mutating method keeps `messages` sorted by creation time and
/// `total_messages == messages.len()`.
///
/// # Examples
///
/// ```
/// use annalist_core::{ChannelInfo, ChannelSnapshot};
///
/// let channel = ChannelInfo::new("1100000000000000000", Some("general".to_string()), None);
/// let snapshot = ChannelSnapshot::new(&channel, Vec::new());
///
/// assert_eq!(snapshot.channel_name(), "general");
/// assert_eq!(*snapshot.total_messages(), 0);
/// assert!(snapshot.last_message_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnapshot {
    /// Owning guild ID, null for direct messages
    guild_id: Option<String>,
    /// Owning guild name, null for direct messages
    guild_name: Option<String>,
    /// Channel snowflake ID
    channel_id: String,
    /// Channel name at the last successful sync
    channel_name: String,
    /// Time of the last successful sync
    #[serde(with = "crate::timestamp")]
    exported_at: DateTime<Utc>,
    /// Always equal to `messages.len()` after a write
    total_messages: usize,
    /// Messages ordered by creation time
    #[serde(deserialize_with = "deserialize_messages")]
    messages: Vec<MessageRecord>,
}

impl ChannelSnapshot {
    /// Build a fresh snapshot stamped with the current time.
    pub fn new(channel: &ChannelInfo, messages: Vec<MessageRecord>) -> Self {
        let mut snapshot = Self {
            guild_id: None,
            guild_name: None,
            channel_id: channel.id.clone(),
            channel_name: String::new(),
            exported_at: Utc::now(),
            total_messages: 0,
            messages,
        };
        snapshot.refresh_metadata(channel, Utc::now());
        sort_chronologically(&mut snapshot.messages);
        snapshot.total_messages = snapshot.messages.len();
        snapshot
    }

    /// ID of the chronologically last stored message.
    pub fn last_message_id(&self) -> Option<&str> {
        self.messages.last().map(|m| m.id().as_str())
    }

    /// Whether the snapshot holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// IDs of all stored messages.
    pub fn known_ids(&self) -> HashSet<&str> {
        self.messages.iter().map(|m| m.id().as_str()).collect()
    }

    /// Append records, then re-sort and recount.
    ///
    /// Callers are responsible for filtering out IDs already present.
    pub fn append(&mut self, new_messages: Vec<MessageRecord>) {
        self.messages.extend(new_messages);
        sort_chronologically(&mut self.messages);
        self.total_messages = self.messages.len();
    }

    /// Overwrite guild/channel metadata and the export timestamp from the live channel.
    ///
    /// The timestamp is truncated to milliseconds, the precision kept on disk.
    pub fn refresh_metadata(&mut self, channel: &ChannelInfo, exported_at: DateTime<Utc>) {
        self.guild_id = channel.guild_id().map(str::to_string);
        self.guild_name = channel.guild_name().map(str::to_string);
        self.channel_name = channel.display_name().to_string();
        self.exported_at = exported_at.trunc_subsecs(3);
    }
}

// Files written before `embedsCount` existed, or edited by hand, carry a stale count
fn deserialize_messages<'de, D>(deserializer: D) -> Result<Vec<MessageRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut messages = Vec::<MessageRecord>::deserialize(deserializer)?;
    messages.iter_mut().for_each(MessageRecord::recount_embeds);
    Ok(messages)
}
