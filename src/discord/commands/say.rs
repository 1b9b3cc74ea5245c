use crate::core::commands::{Command, CommandHandler, Invocation};
use crate::core::errors::Error;
use async_trait::async_trait;
use serenity::model::Permissions;
use std::time::Duration;

struct Say;

#[async_trait]
impl CommandHandler for Say {
    async fn run(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        let text = invocation.args.join(" ");
        if text.is_empty() {
            let command = invocation.command;
            let usage = command.usage.as_deref().unwrap_or_default();
            return invocation
                .reply(format!("Usage: `{}{} {usage}`", invocation.prefix(), command.name))
                .await;
        }

        if let Err(e) = invocation.port.delete_trigger().await {
            tracing::warn!("Could not delete say trigger: {}", e);
        }
        invocation.port.send(&text).await
    }
}

pub fn command() -> Command {
    Command::new("say", Say)
        .description("Make the bot repeat a message.")
        .usage("<message>")
        .category("utility")
        .required_permissions(Permissions::MANAGE_MESSAGES)
        .bot_permissions(Permissions::SEND_MESSAGES)
        .cooldown(Duration::from_secs(2))
}
