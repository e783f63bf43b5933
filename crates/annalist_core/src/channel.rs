//! Live channel and guild metadata.

use serde::{Deserialize, Serialize};

/// Owning guild of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct GuildInfo {
    /// Guild snowflake ID
    pub id: String,
    /// Guild name
    pub name: String,
}

/// Metadata describing the channel being exported, as seen at sync time.
///
/// Direct-message channels have no guild and may have no name.
///
/// # Examples
///
/// ```
/// use annalist_core::{ChannelInfo, GuildInfo};
///
/// let dm = ChannelInfo::new("1100000000000000000", None, None);
/// assert_eq!(dm.display_name(), "1100000000000000000");
///
/// let general = ChannelInfo::new(
///     "1100000000000000000",
///     Some("general".to_string()),
///     Some(GuildInfo::new("9".to_string(), "Guild".to_string())),
/// );
/// assert_eq!(general.display_name(), "general");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Channel snowflake ID
    pub id: String,
    /// Channel name, if the channel kind has one
    pub name: Option<String>,
    /// Owning guild, absent for direct messages
    pub guild: Option<GuildInfo>,
}

impl ChannelInfo {
    /// Create channel metadata.
    pub fn new(id: impl Into<String>, name: Option<String>, guild: Option<GuildInfo>) -> Self {
        Self {
            id: id.into(),
            name,
            guild,
        }
    }

    /// Channel name, falling back to the channel ID.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Owning guild ID, if any.
    pub fn guild_id(&self) -> Option<&str> {
        self.guild.as_ref().map(|g| g.id.as_str())
    }

    /// Owning guild name, if any.
    pub fn guild_name(&self) -> Option<&str> {
        self.guild.as_ref().map(|g| g.name.as_str())
    }
}
