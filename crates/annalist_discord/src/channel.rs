//! A Discord text channel as a [`MessageSource`].

use crate::{
    DiscordError, DiscordErrorKind, DiscordResult, is_text_based, message_record, parse_snowflake,
};
use annalist_core::{ChannelInfo, GuildInfo, MessageRecord};
use annalist_error::{AnnalistResult, SourceError};
use annalist_sync::{FetchDirection, MAX_PAGE_SIZE, MessageSource};
use async_trait::async_trait;
use serenity::builder::GetMessages;
use serenity::http::Http;
use serenity::model::channel::Channel;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Verify a bot token and return an authenticated HTTP client.
///
/// # Errors
///
/// Returns `InvalidToken` for an empty token and `ConnectionFailed` if
/// Discord rejects it.
#[instrument(skip(token), fields(token_len = token.as_ref().len()))]
pub async fn login(token: impl AsRef<str>) -> DiscordResult<Arc<Http>> {
    let token = token.as_ref().trim();
    if token.is_empty() {
        return Err(DiscordError::new(DiscordErrorKind::InvalidToken));
    }

    let http = Arc::new(Http::new(token));
    let user = http.get_current_user().await.map_err(|e| {
        DiscordError::new(DiscordErrorKind::ConnectionFailed(e.to_string()))
    })?;
    info!(bot = %user.tag(), "Logged in to Discord");

    Ok(http)
}

/// Build the page request for `direction`.
///
/// # Errors
///
/// Returns `InvalidId` if the cursor is not a snowflake.
pub fn page_request(direction: &FetchDirection, limit: u8) -> DiscordResult<GetMessages> {
    let request = GetMessages::new().limit(limit.clamp(1, MAX_PAGE_SIZE));
    Ok(match direction {
        FetchDirection::Latest => request,
        FetchDirection::Before(id) => request.before(MessageId::new(parse_snowflake(id)?)),
        FetchDirection::After(id) => request.after(MessageId::new(parse_snowflake(id)?)),
    })
}

/// Metadata for a direct-message channel.
///
/// DMs carry no channel name of their own, so exports are named after the ID.
pub fn direct_message_info(channel_id: &str) -> ChannelInfo {
    ChannelInfo::new(channel_id, None, None)
}

/// A resolved, text-based Discord channel.
///
/// Serenity's HTTP client applies Discord's rate-limit buckets, so callers
/// only need the configured inter-page delay on top.
#[derive(Clone)]
pub struct DiscordChannel {
    http: Arc<Http>,
    channel_id: ChannelId,
    info: ChannelInfo,
}

impl DiscordChannel {
    /// Look up `channel_id` and capture its naming metadata.
    ///
    /// # Errors
    ///
    /// Fails if the ID is malformed, the channel cannot be fetched, or it is
    /// not text-based.
    #[instrument(skip(http))]
    pub async fn connect(http: Arc<Http>, channel_id: &str) -> DiscordResult<Self> {
        let id = ChannelId::new(parse_snowflake(channel_id)?);

        let channel = http.get_channel(id).await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ChannelNotFound(format!(
                "{}: {}",
                channel_id, e
            )))
        })?;

        let info = match channel {
            Channel::Guild(guild_channel) => {
                if !is_text_based(guild_channel.kind) {
                    return Err(DiscordError::new(DiscordErrorKind::NotTextBased(format!(
                        "{} ({:?})",
                        guild_channel.name, guild_channel.kind
                    ))));
                }

                let guild_name = match http.get_guild(guild_channel.guild_id).await {
                    Ok(guild) => guild.name,
                    Err(e) => {
                        warn!(guild_id = %guild_channel.guild_id, error = %e, "Could not resolve guild name");
                        guild_channel.guild_id.to_string()
                    }
                };
                ChannelInfo::new(
                    channel_id,
                    Some(guild_channel.name.clone()),
                    Some(GuildInfo::new(guild_channel.guild_id.to_string(), guild_name)),
                )
            }
            Channel::Private(_) => direct_message_info(channel_id),
            other => {
                return Err(DiscordError::new(DiscordErrorKind::NotTextBased(
                    other.id().to_string(),
                )));
            }
        };

        info!(
            channel = info.display_name(),
            guild = info.guild_name().unwrap_or("direct message"),
            "Resolved channel"
        );
        Ok(Self {
            http,
            channel_id: id,
            info,
        })
    }

    async fn fetch(&self, direction: &FetchDirection, limit: u8) -> DiscordResult<Vec<MessageRecord>> {
        let request = page_request(direction, limit)?;
        let messages = self.channel_id.messages(self.http.as_ref(), request).await?;
        debug!(%direction, count = messages.len(), "Fetched page from Discord");

        messages.iter().map(message_record).collect()
    }
}

#[async_trait]
impl MessageSource for DiscordChannel {
    fn channel(&self) -> &ChannelInfo {
        &self.info
    }

    async fn fetch_page(
        &self,
        direction: &FetchDirection,
        limit: u8,
    ) -> AnnalistResult<Vec<MessageRecord>> {
        let records = self.fetch(direction, limit).await.map_err(SourceError::from)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_rejects_bad_cursor() {
        let Err(err) = page_request(&FetchDirection::After("not-an-id".to_string()), 100) else {
            panic!("Malformed cursor should be rejected");
        };
        assert!(matches!(err.kind(), DiscordErrorKind::InvalidId(_)));
    }

    #[test]
    fn test_page_request_accepts_snowflake_cursors() {
        assert!(page_request(&FetchDirection::Latest, 100).is_ok());
        assert!(page_request(&FetchDirection::Before("1200000000000000000".to_string()), 50).is_ok());
        assert!(page_request(&FetchDirection::After("1200000000000000000".to_string()), 0).is_ok());
    }

    #[test]
    fn test_direct_message_is_named_after_its_id() {
        let info = direct_message_info("1300000000000000000");
        assert_eq!(info.display_name(), "1300000000000000000");
        assert_eq!(info.name, None);
        assert!(info.guild.is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_empty_token() {
        let Err(err) = login("   ").await else {
            panic!("Blank token should be rejected");
        };
        assert_eq!(err.kind(), &DiscordErrorKind::InvalidToken);
    }
}
