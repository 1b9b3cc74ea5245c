use super::uptime::format_duration;
use crate::core::commands::{Command, CommandHandler, Invocation};
use crate::core::errors::Error;
use crate::core::extensions::StrExt;
use async_trait::async_trait;
use std::time::Duration;

struct Stats;

#[async_trait]
impl CommandHandler for Stats {
    async fn run(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        let dispatcher = invocation.dispatcher;
        let total = dispatcher.usage().total_commands().await?;

        let lines = [
            "📊 **Bot statistics**".to_string(),
            format!(
                "Commands used: **{total}** ({})",
                total.to_string().to_persian_digits()
            ),
            format!("Uptime: **{}**", format_duration(dispatcher.uptime())),
            format!("Commands available: **{}**", dispatcher.registry().len()),
        ];
        invocation.reply(lines.join("\n")).await
    }
}

pub fn command() -> Command {
    Command::new("stats", Stats)
        .aliases(["botinfo"])
        .description("Show usage and uptime statistics.")
        .category("info")
        .dm_allowed()
        .cooldown(Duration::from_secs(5))
}

#[cfg(test)]
mod tests {
    use crate::core::dispatch::test_port::TestPort;
    use crate::core::dispatch::DispatchOutcome;
    use crate::discord::commands::testing::{dispatcher, message};

    #[tokio::test]
    async fn counts_itself_among_commands_used() {
        let dispatcher = dispatcher();
        let port = TestPort::guild();

        dispatcher.handle_message(&message("!ping", 1), &port).await;
        let outcome = dispatcher
            .handle_message(&message("!BotInfo", 2), &port)
            .await;

        assert_eq!(outcome, DispatchOutcome::Executed("stats".into()));
        let reply = &port.replies()[1];
        assert!(reply.contains("Commands used: **2** (۲)"));
        assert!(reply.contains("Commands available: **5**"));
    }
}
