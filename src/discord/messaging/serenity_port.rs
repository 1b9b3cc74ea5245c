// `MessagePort` backed by a live serenity message.

use crate::core::dispatch::MessagePort;
use crate::core::errors::{Error, PlatformError};
use async_trait::async_trait;
use serenity::all::{Context, Message, Permissions, UserId};
use serenity::http::HttpError;

impl From<serenity::Error> for PlatformError {
    fn from(error: serenity::Error) -> Self {
        let mut platform = PlatformError::new("DiscordError", error.to_string());
        if let serenity::Error::Http(http_error) = &error {
            let http_error: &HttpError = http_error;
            if let HttpError::UnsuccessfulRequest(response) = http_error {
                platform.kind = "DiscordAPIError";
                platform.code = Some(response.error.code as i64);
                platform.status = Some(response.status_code.as_u16());
            }
        }
        platform
    }
}

fn platform(error: serenity::Error) -> Error {
    Box::new(PlatformError::from(error))
}

pub struct SerenityMessagePort<'a> {
    ctx: &'a Context,
    message: &'a Message,
}

impl<'a> SerenityMessagePort<'a> {
    pub fn new(ctx: &'a Context, message: &'a Message) -> Self {
        Self { ctx, message }
    }

    /// Effective permissions of `user_id` in the message's channel, overwrites
    /// applied. Threads use their parent channel.
    async fn channel_permissions_of(
        &self,
        user_id: UserId,
    ) -> Result<Option<Permissions>, Error> {
        let Some(guild_id) = self.message.guild_id else {
            return Ok(None);
        };
        let member = guild_id.member(self.ctx, user_id).await.map_err(platform)?;

        let Some(guild) = self.ctx.cache.guild(guild_id) else {
            return Ok(None);
        };
        let channel_id = self.message.channel_id;
        let channel = guild.channels.get(&channel_id).or_else(|| {
            guild
                .threads
                .iter()
                .find(|thread| thread.id == channel_id)
                .and_then(|thread| thread.parent_id)
                .and_then(|parent| guild.channels.get(&parent))
        });

        #[allow(deprecated)]
        let permissions = match channel {
            Some(channel) => guild.user_permissions_in(channel, &member),
            None => guild.member_permissions(&member),
        };
        Ok(Some(permissions))
    }
}

#[async_trait]
impl MessagePort for SerenityMessagePort<'_> {
    async fn reply(&self, content: &str) -> Result<(), Error> {
        self.message.reply(self.ctx, content).await.map_err(platform)?;
        Ok(())
    }

    async fn send(&self, content: &str) -> Result<(), Error> {
        self.message
            .channel_id
            .say(&self.ctx.http, content)
            .await
            .map_err(platform)?;
        Ok(())
    }

    async fn send_typing(&self) -> Result<(), Error> {
        self.message
            .channel_id
            .broadcast_typing(&self.ctx.http)
            .await
            .map_err(platform)
    }

    async fn delete_trigger(&self) -> Result<(), Error> {
        self.message.delete(self.ctx).await.map_err(platform)
    }

    async fn member_permissions(&self) -> Result<Option<Permissions>, Error> {
        let Some(guild_id) = self.message.guild_id else {
            return Ok(None);
        };
        let member = guild_id
            .member(self.ctx, self.message.author.id)
            .await
            .map_err(platform)?;

        let Some(guild) = self.ctx.cache.guild(guild_id) else {
            return Ok(None);
        };
        #[allow(deprecated)]
        let permissions = guild.member_permissions(&member);
        Ok(Some(permissions))
    }

    async fn member_channel_permissions(&self) -> Result<Option<Permissions>, Error> {
        self.channel_permissions_of(self.message.author.id).await
    }

    async fn bot_channel_permissions(&self) -> Result<Option<Permissions>, Error> {
        let bot_id = self.ctx.cache.current_user().id;
        self.channel_permissions_of(bot_id).await
    }
}
