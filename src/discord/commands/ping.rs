use crate::core::commands::{Command, CommandHandler, Invocation};
use crate::core::errors::Error;
use async_trait::async_trait;
use std::time::{Duration, Instant};

struct Ping;

#[async_trait]
impl CommandHandler for Ping {
    async fn run(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        // A typing request is the cheapest REST call that touches the channel.
        let started = Instant::now();
        invocation.port.send_typing().await?;
        let latency = started.elapsed();

        invocation
            .reply(format!("🏓 Pong! REST latency: `{}ms`", latency.as_millis()))
            .await
    }
}

pub fn command() -> Command {
    Command::new("ping", Ping)
        .description("Check that the bot is responsive.")
        .category("info")
        .dm_allowed()
        .cooldown(Duration::from_secs(3))
}

#[cfg(test)]
mod tests {
    use crate::core::dispatch::test_port::TestPort;
    use crate::core::dispatch::DispatchOutcome;
    use crate::discord::commands::testing::{dispatcher, message};

    #[tokio::test]
    async fn replies_with_latency() {
        let dispatcher = dispatcher();
        let port = TestPort::guild();

        let outcome = dispatcher.handle_message(&message("!ping", 1), &port).await;

        assert_eq!(outcome, DispatchOutcome::Executed("ping".into()));
        let replies = port.replies();
        assert!(replies[0].starts_with("🏓 Pong! REST latency: `"));
        // One typing request from dispatch, one timed by the command.
        assert_eq!(port.typing_count(), 2);
    }

    #[tokio::test]
    async fn second_ping_hits_the_cooldown() {
        let dispatcher = dispatcher();
        let port = TestPort::guild();

        dispatcher.handle_message(&message("!ping", 1), &port).await;
        let outcome = dispatcher.handle_message(&message("!ping", 1), &port).await;

        assert!(matches!(outcome, DispatchOutcome::OnCooldown(ref name, _) if name == "ping"));
        assert_eq!(port.replies()[1], "Please wait 3s before reusing `ping`.");
    }
}
