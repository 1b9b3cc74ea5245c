// Delivers error reports to a Discord webhook.

use crate::core::config::WebhookConfig;
use crate::core::errors::{Error, ErrorAttachment, ErrorEmbed, ErrorPayload, ErrorSink};
use async_trait::async_trait;
use serenity::all::{
    ChannelId, CreateAttachment, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    ExecuteWebhook, Http, Webhook,
};
use std::sync::Arc;
use tokio::sync::OnceCell;

pub struct WebhookSink {
    http: Arc<Http>,
    url: String,
    username: Option<String>,
    avatar: Option<String>,
    thread_id: Option<u64>,
    /// Resolved on first delivery so startup does not depend on the webhook.
    webhook: OnceCell<Webhook>,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, config: &WebhookConfig) -> Self {
        Self {
            // Webhook calls authenticate with the token in the URL.
            http: Arc::new(Http::new("")),
            url: url.into(),
            username: config.username.clone(),
            avatar: config.avatar.clone(),
            thread_id: config.threads.bugs,
            webhook: OnceCell::new(),
        }
    }

    async fn webhook(&self) -> Result<&Webhook, Error> {
        let webhook = self
            .webhook
            .get_or_try_init(|| Webhook::from_url(&*self.http, &self.url))
            .await?;
        Ok(webhook)
    }

    fn builder(&self, payload: ErrorPayload) -> ExecuteWebhook {
        let mut builder = match payload {
            ErrorPayload::Embed(embed) => ExecuteWebhook::new().embed(build_embed(embed)),
            ErrorPayload::Attachment(attachment) => attach(attachment),
        };
        if let Some(username) = &self.username {
            builder = builder.username(username);
        }
        if let Some(avatar) = &self.avatar {
            builder = builder.avatar_url(avatar);
        }
        if let Some(thread_id) = self.thread_id {
            builder = builder.in_thread(ChannelId::new(thread_id));
        }
        builder
    }
}

#[async_trait]
impl ErrorSink for WebhookSink {
    async fn deliver(&self, payload: ErrorPayload) -> Result<(), Error> {
        let webhook = self.webhook().await?;
        webhook
            .execute(&*self.http, false, self.builder(payload))
            .await?;
        Ok(())
    }
}

fn build_embed(embed: ErrorEmbed) -> CreateEmbed {
    let mut footer = CreateEmbedFooter::new(embed.footer_text);
    if let Some(icon) = embed.footer_icon {
        footer = footer.icon_url(icon);
    }

    let mut builder = CreateEmbed::new()
        .author(CreateEmbedAuthor::new(embed.author))
        .title(embed.title)
        .description(embed.description)
        .color(embed.color)
        .footer(footer);
    for field in embed.fields {
        builder = builder.field(field.name, field.value, false);
    }
    builder
}

fn attach(attachment: ErrorAttachment) -> ExecuteWebhook {
    let file = CreateAttachment::bytes(attachment.bytes, attachment.file_name)
        .description(attachment.description);
    ExecuteWebhook::new()
        .content(attachment.content)
        .add_file(file)
}
