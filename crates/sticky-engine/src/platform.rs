use async_trait::async_trait;
use thiserror::Error;

use sticky_types::StickyContent;

/// A message as seen on the chat platform. Only its identity matters here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum PlatformError {
    /// The channel is gone, or the bot may not read or post in it.
    #[error("channel {0} is unavailable")]
    ChannelUnavailable(String),

    /// The referenced message does not exist (anymore).
    #[error("message {0} not found")]
    MessageNotFound(String),

    /// Rate limits, 5xx, network trouble.
    #[error("platform request failed: {0}")]
    Transport(String),
}

/// Outbound messaging surface of the chat platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Most recent message in the channel, `None` if the channel is empty.
    async fn latest_message(&self, channel_id: &str) -> Result<Option<PostedMessage>, PlatformError>;

    /// `Ok(None)` when the message has been deleted.
    async fn fetch_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Option<PostedMessage>, PlatformError>;

    /// Post `content` and return the new message id.
    async fn send_message(&self, channel_id: &str, content: &StickyContent) -> Result<String, PlatformError>;

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        content: &StickyContent,
    ) -> Result<(), PlatformError>;

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<(), PlatformError>;

    async fn send_direct_message(&self, user_id: &str, content: &StickyContent) -> Result<(), PlatformError>;
}
