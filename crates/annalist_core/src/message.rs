//! Captured message and attachment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Metadata for one file attached to a message.
///
/// Only the descriptor is recorded; attachment bytes are never downloaded.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct AttachmentRecord {
    /// Attachment snowflake ID
    id: String,
    /// File name as uploaded
    name: String,
    /// Size in bytes
    size: u64,
    /// Primary CDN URL
    url: String,
    /// Proxy URL, falling back to the primary URL when the platform omits it
    proxy_url: String,
    /// MIME type if the platform reported one
    #[builder(default)]
    content_type: Option<String>,
}

/// Immutable snapshot of one remote message at capture time.
///
/// Edits made after capture are not re-synced; `edited_at` reflects the state
/// seen when the message was first fetched.
///
/// # Examples
///
/// ```
/// use annalist_core::MessageRecordBuilder;
/// use chrono::{TimeZone, Utc};
///
/// let message = MessageRecordBuilder::default()
///     .id("1100000000000000001")
///     .author_id("42")
///     .author_tag("someone")
///     .author_display_name("Someone")
///     .created_at(Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap())
///     .content("hello")
///     .build()
///     .unwrap();
///
/// assert_eq!(message.id(), "1100000000000000001");
/// assert_eq!(*message.embeds_count(), 0);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into), build_fn(private, name = "build_unchecked"))]
pub struct MessageRecord {
    /// Message snowflake ID
    id: String,
    /// Author snowflake ID
    author_id: String,
    /// Author tag (`name#discriminator`, or bare username for migrated accounts)
    author_tag: String,
    /// Nickname, global display name or username, whichever is set first
    author_display_name: String,
    /// Creation time
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    /// Last edit time at capture, if any
    #[builder(default)]
    #[serde(with = "crate::timestamp::option", default)]
    edited_at: Option<DateTime<Utc>>,
    /// Text body
    #[builder(default)]
    #[serde(default)]
    content: String,
    /// Embed payloads, passed through verbatim
    #[builder(default)]
    #[serde(default)]
    embeds: Vec<JsonValue>,
    /// Attachment descriptors in platform order
    #[builder(default)]
    #[serde(default)]
    attachments: Vec<AttachmentRecord>,
    /// Number of embeds, always `embeds.len()`
    #[builder(setter(skip))]
    #[serde(default)]
    embeds_count: usize,
    /// ID of the message this one replies to
    #[builder(default)]
    #[serde(default)]
    referenced_message_id: Option<String>,
}

impl MessageRecordBuilder {
    /// Build the record, deriving `embeds_count` from the embed list.
    pub fn build(&self) -> Result<MessageRecord, MessageRecordBuilderError> {
        let mut record = self.build_unchecked()?;
        record.recount_embeds();
        Ok(record)
    }
}

impl MessageRecord {
    /// Reset `embeds_count` to match the embed list.
    pub(crate) fn recount_embeds(&mut self) {
        self.embeds_count = self.embeds.len();
    }
}
