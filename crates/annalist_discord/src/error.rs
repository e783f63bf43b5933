//! Discord-specific error types.
//!
//! Errors raised while talking to the Discord API. At the sync boundary they
//! are folded into [`SourceError`] so the engine stays platform-agnostic.

use annalist_error::{SourceError, SourceErrorKind};
use derive_getters::Getters;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Serenity API error (e.g., HTTP error, rate limit, permissions).
    #[display("Serenity API error: {_0}")]
    SerenityError(String),

    /// Channel not found or not visible to the bot.
    #[display("Channel not found: {_0}")]
    ChannelNotFound(String),

    /// Channel exists but does not carry a message history.
    #[display("Channel is not text-based: {_0}")]
    NotTextBased(String),

    /// Invalid Discord snowflake ID format.
    #[display("Invalid ID: {_0}")]
    InvalidId(String),

    /// Bot token is empty.
    #[display("Invalid or missing bot token")]
    InvalidToken,

    /// Login with the bot token failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// A message could not be converted into a record.
    #[display("Malformed message: {_0}")]
    MalformedMessage(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use annalist_discord::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::InvalidToken);
    /// assert_eq!(err.kind(), &DiscordErrorKind::InvalidToken);
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        DiscordError::new(DiscordErrorKind::SerenityError(err.to_string()))
    }
}

impl From<DiscordError> for SourceError {
    #[track_caller]
    fn from(err: DiscordError) -> Self {
        let message = err.kind.to_string();
        let kind = match err.kind {
            DiscordErrorKind::ChannelNotFound(_) | DiscordErrorKind::NotTextBased(_) => {
                SourceErrorKind::ChannelUnavailable(message)
            }
            DiscordErrorKind::MalformedMessage(_) => SourceErrorKind::MalformedMessage(message),
            _ => SourceErrorKind::FetchFailed(message),
        };
        SourceError::new(kind)
    }
}
