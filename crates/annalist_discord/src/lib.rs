//! Discord integration for Annalist.
//!
//! Provides [`DiscordChannel`], a [`MessageSource`](annalist_sync::MessageSource)
//! backed by Serenity's HTTP client, and the conversions from Serenity
//! messages into export records.
//!
//! # Usage
//!
//! ```rust,ignore
//! use annalist_discord::{DiscordChannel, login};
//!
//! let http = login(std::env::var("DISCORD_TOKEN")?).await?;
//! let channel = DiscordChannel::connect(http, "1100000000000000000").await?;
//! let report = engine.sync(&channel).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod conversions;
mod error;

pub use channel::{DiscordChannel, direct_message_info, login, page_request};
pub use conversions::{
    DISCORD_EPOCH_MS, UNNAMED_ATTACHMENT, attachment_record, is_text_based, message_record,
    parse_snowflake, resolve_display_name, snowflake_timestamp,
};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
