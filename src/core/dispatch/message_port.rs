use crate::core::errors::Error;
use async_trait::async_trait;
use serenity::model::Permissions;

/// A chat message as the dispatcher sees it. Ids are plain `u64` so the core
/// stays independent of the client library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub content: String,
    pub author_id: u64,
    pub author_is_bot: bool,
    /// Set when the message was posted through a webhook.
    pub webhook_id: Option<u64>,
    pub channel_id: u64,
    /// `None` for direct messages.
    pub guild_id: Option<u64>,
    /// The bot's own user id, used to recognise mentions.
    pub bot_id: u64,
}

impl IncomingMessage {
    pub fn is_direct(&self) -> bool {
        self.guild_id.is_none()
    }
}

/// Everything the dispatcher and command handlers need from the platform
/// for a single message.
#[async_trait]
pub trait MessagePort: Send + Sync {
    /// Reply to the triggering message.
    async fn reply(&self, content: &str) -> Result<(), Error>;

    /// Post in the triggering channel without referencing the message.
    async fn send(&self, content: &str) -> Result<(), Error>;

    async fn send_typing(&self) -> Result<(), Error>;

    /// Delete the triggering message.
    async fn delete_trigger(&self) -> Result<(), Error>;

    /// The author's guild-level permissions, `None` outside guilds.
    async fn member_permissions(&self) -> Result<Option<Permissions>, Error>;

    /// The author's permissions in the channel, overwrites applied.
    async fn member_channel_permissions(&self) -> Result<Option<Permissions>, Error>;

    /// The bot's permissions in the channel, overwrites applied.
    async fn bot_channel_permissions(&self) -> Result<Option<Permissions>, Error>;
}
