//! Conversions from serenity models into export records.

use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use annalist_core::{AttachmentRecord, AttachmentRecordBuilder, MessageRecord, MessageRecordBuilder};
use chrono::{DateTime, Utc};
use serenity::model::channel::{Attachment, ChannelType, Message};
use serenity::model::Timestamp;

/// Milliseconds between the Unix epoch and the Discord epoch (2015-01-01).
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Name recorded for attachments uploaded without a filename.
pub const UNNAMED_ATTACHMENT: &str = "unnamed";

/// Parse a snowflake ID.
///
/// # Errors
///
/// Returns `InvalidId` unless `id` is a non-zero decimal `u64`.
#[track_caller]
pub fn parse_snowflake(id: &str) -> DiscordResult<u64> {
    match id.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(DiscordError::new(DiscordErrorKind::InvalidId(id.to_string()))),
    }
}

/// Creation time encoded in a snowflake, at millisecond precision.
pub fn snowflake_timestamp(id: u64) -> Option<DateTime<Utc>> {
    let millis = (id >> 22).checked_add(DISCORD_EPOCH_MS)?;
    DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)
}

/// Display name resolution: guild nickname, then global name, then username.
pub fn resolve_display_name<'a>(
    nickname: Option<&'a str>,
    global_name: Option<&'a str>,
    username: &'a str,
) -> &'a str {
    nickname
        .filter(|name| !name.is_empty())
        .or(global_name.filter(|name| !name.is_empty()))
        .unwrap_or(username)
}

/// Channel kinds that carry a readable message history.
pub fn is_text_based(kind: ChannelType) -> bool {
    matches!(
        kind,
        ChannelType::Text
            | ChannelType::Private
            | ChannelType::GroupDm
            | ChannelType::News
            | ChannelType::NewsThread
            | ChannelType::PublicThread
            | ChannelType::PrivateThread
            | ChannelType::Voice
            | ChannelType::Stage
    )
}

fn attachment_name(filename: &str) -> &str {
    if filename.is_empty() {
        UNNAMED_ATTACHMENT
    } else {
        filename
    }
}

fn timestamp_to_utc(timestamp: &Timestamp) -> Option<DateTime<Utc>> {
    // Timestamps serialize as RFC 3339 strings
    let value = serde_json::to_value(timestamp).ok()?;
    let parsed = DateTime::parse_from_rfc3339(value.as_str()?).ok();
    parsed
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| DateTime::from_timestamp(timestamp.unix_timestamp(), 0))
}

#[track_caller]
fn malformed(message_id: &str, detail: impl std::fmt::Display) -> DiscordError {
    DiscordError::new(DiscordErrorKind::MalformedMessage(format!(
        "{}: {}",
        message_id, detail
    )))
}

/// Convert an attachment, substituting `unnamed` for a missing filename and the
/// direct URL for a missing proxy URL.
///
/// # Errors
///
/// Fails only if the record builder rejects the fields.
pub fn attachment_record(attachment: &Attachment) -> DiscordResult<AttachmentRecord> {
    let proxy_url = if attachment.proxy_url.is_empty() {
        attachment.url.as_str()
    } else {
        attachment.proxy_url.as_str()
    };

    AttachmentRecordBuilder::default()
        .id(attachment.id.to_string())
        .name(attachment_name(&attachment.filename))
        .size(u64::from(attachment.size))
        .url(attachment.url.as_str())
        .proxy_url(proxy_url)
        .content_type(attachment.content_type.clone())
        .build()
        .map_err(|e| malformed(&attachment.id.to_string(), e))
}

/// Convert a fetched message into an export record.
///
/// # Errors
///
/// Returns `MalformedMessage` if an embed cannot be serialized or the
/// record is incomplete.
pub fn message_record(message: &Message) -> DiscordResult<MessageRecord> {
    let id = message.id.to_string();

    let created_at = snowflake_timestamp(message.id.get())
        .or_else(|| timestamp_to_utc(&message.timestamp))
        .ok_or_else(|| malformed(&id, "creation time out of range"))?;

    let embeds = message
        .embeds
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| malformed(&id, e))?;

    let attachments = message
        .attachments
        .iter()
        .map(attachment_record)
        .collect::<DiscordResult<Vec<_>>>()?;

    let nickname = message
        .member
        .as_ref()
        .and_then(|member| member.nick.as_deref());
    let display_name = resolve_display_name(
        nickname,
        message.author.global_name.as_deref(),
        &message.author.name,
    );

    let referenced_message_id = message
        .message_reference
        .as_ref()
        .and_then(|reference| reference.message_id)
        .map(|reference_id| reference_id.to_string());

    MessageRecordBuilder::default()
        .id(id.as_str())
        .author_id(message.author.id.to_string())
        .author_tag(message.author.tag())
        .author_display_name(display_name)
        .created_at(created_at)
        .edited_at(message.edited_timestamp.as_ref().and_then(timestamp_to_utc))
        .content(message.content.as_str())
        .embeds(embeds)
        .attachments(attachments)
        .referenced_message_id(referenced_message_id)
        .build()
        .map_err(|e| malformed(&id, e))
}
