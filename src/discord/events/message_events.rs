// Gateway message events, translated for the core dispatcher.

use crate::discord::messaging::SerenityMessagePort;
use crate::core::dispatch::IncomingMessage;
use crate::discord::Data;
use serenity::all::{Context, Message};
use std::sync::Arc;

pub fn to_incoming(message: &Message, bot_id: u64) -> IncomingMessage {
    IncomingMessage {
        content: message.content.clone(),
        author_id: message.author.id.get(),
        author_is_bot: message.author.bot,
        webhook_id: message.webhook_id.map(|id| id.get()),
        channel_id: message.channel_id.get(),
        guild_id: message.guild_id.map(|id| id.get()),
        bot_id,
    }
}

/// Runs a new message through the dispatcher under the crash policy.
pub async fn handle_message_create(ctx: &Context, message: &Message, data: &Data) {
    let bot_id = ctx.cache.current_user().id.get();
    let incoming = to_incoming(message, bot_id);

    let ctx = ctx.clone();
    let message = message.clone();
    let dispatcher = Arc::clone(&data.dispatcher);
    data.crash_policy
        .guard("messageCreate", async move {
            let port = SerenityMessagePort::new(&ctx, &message);
            dispatcher.handle_message(&incoming, &port).await;
        })
        .await;
}
