use crate::core::commands::{Command, CommandHandler, Invocation};
use crate::core::errors::Error;
use async_trait::async_trait;
use std::time::Duration;

/// `1d 2h 3m 4s`, leaving out leading zero units.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        (total % 86_400) / 3_600,
        (total % 3_600) / 60,
        total % 60,
    );

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{seconds}s"));
    parts.join(" ")
}

struct Uptime;

#[async_trait]
impl CommandHandler for Uptime {
    async fn run(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        let uptime = invocation.dispatcher.uptime();
        let since = chrono::Utc::now().timestamp() - uptime.as_secs() as i64;
        invocation
            .reply(format!(
                "⏰ Online for **{}** (since <t:{since}:R>)",
                format_duration(uptime)
            ))
            .await
    }
}

pub fn command() -> Command {
    Command::new("uptime", Uptime)
        .description("How long the bot has been running.")
        .category("owner")
        .owner_only()
        .dm_allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::test_port::TestPort;
    use crate::core::dispatch::DispatchOutcome;
    use crate::discord::commands::testing::{dispatcher, message, OWNER};

    #[test]
    fn formats_only_significant_units() {
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
        assert_eq!(format_duration(Duration::from_secs(3_600)), "1h 0m 0s");
        assert_eq!(format_duration(Duration::from_secs(90_061)), "1d 1h 1m 1s");
    }

    #[tokio::test]
    async fn owners_get_the_uptime() {
        let dispatcher = dispatcher();
        let port = TestPort::guild();

        let outcome = dispatcher
            .handle_message(&message("!uptime", OWNER), &port)
            .await;

        assert_eq!(outcome, DispatchOutcome::Executed("uptime".into()));
        assert!(port.replies()[0].starts_with("⏰ Online for **"));
    }

    #[tokio::test]
    async fn everyone_else_is_ignored() {
        let dispatcher = dispatcher();
        let port = TestPort::guild();

        let outcome = dispatcher.handle_message(&message("!uptime", 1), &port).await;

        assert_eq!(outcome, DispatchOutcome::OwnerOnly("uptime".into()));
        assert!(port.replies().is_empty());
    }
}
