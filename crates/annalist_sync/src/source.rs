//! The remote side of a sync pass.

use annalist_core::{ChannelInfo, MessageRecord};
use annalist_error::AnnalistResult;
use async_trait::async_trait;

/// Which slice of history a page fetch asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FetchDirection {
    /// The newest messages in the channel
    #[display("latest")]
    Latest,
    /// Messages strictly older than the given message ID
    #[display("before {_0}")]
    Before(String),
    /// Messages strictly newer than the given message ID
    #[display("after {_0}")]
    After(String),
}

/// A channel whose history can be paged through.
///
/// Implemented by the Discord connection and by test doubles.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Live channel metadata.
    fn channel(&self) -> &ChannelInfo;

    /// Fetch up to `limit` messages in `direction`.
    ///
    /// An empty page means there is nothing more in that direction. Messages
    /// within a page may arrive in any order.
    async fn fetch_page(
        &self,
        direction: &FetchDirection,
        limit: u8,
    ) -> AnnalistResult<Vec<MessageRecord>>;
}
