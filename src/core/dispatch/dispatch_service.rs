// Message dispatch - decides whether a chat message is a command and, if so,
// runs it through the gates (channel type, owner, permissions, cooldown)
// before executing it.
//
// Like the other core services this knows nothing about serenity; it talks to
// the platform through `MessagePort`.

use super::message_port::{IncomingMessage, MessagePort};
use super::PrefixMatcher;
use crate::core::commands::{CommandRegistry, Invocation};
use crate::core::cooldowns::{remaining_seconds, CooldownService, CooldownStatus};
use crate::core::errors::{Error, ErrorReporter};
use crate::core::permissions::deny_if_missing;
use crate::core::usage::UsageService;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// Dispatch-related configuration.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub prefix: String,
    /// Users allowed to run owner-only commands.
    pub owners: HashSet<u64>,
    /// Whether direct messages are considered at all.
    pub allow_dm_commands: bool,
}

/// What happened to a message. Logged at debug level; mostly useful in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Direct message, webhook or bot author.
    Ignored,
    NotCommand,
    /// A bare mention; the prefix hint was sent.
    PrefixHint,
    UnknownCommand(String),
    /// The command cannot be invoked through a message.
    MessageDisabled(String),
    DmDisallowed(String),
    OwnerOnly(String),
    MissingPermissions(String),
    OnCooldown(String, Duration),
    Executed(String),
    /// Something went wrong and was handed to the error reporter.
    Failed,
}

pub struct Dispatcher {
    registry: CommandRegistry,
    cooldowns: CooldownService,
    usage: UsageService,
    reporter: Arc<ErrorReporter>,
    settings: DispatchSettings,
    started_at: Instant,
    matcher: OnceLock<PrefixMatcher>,
}

impl Dispatcher {
    pub fn new(
        registry: CommandRegistry,
        cooldowns: CooldownService,
        usage: UsageService,
        reporter: Arc<ErrorReporter>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            registry,
            cooldowns,
            usage,
            reporter,
            settings,
            started_at: Instant::now(),
            matcher: OnceLock::new(),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn usage(&self) -> &UsageService {
        &self.usage
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn is_owner(&self, user_id: u64) -> bool {
        self.settings.owners.contains(&user_id)
    }

    /// The bot id does not change within a login, so the matcher built for
    /// the first message serves every later one.
    fn matcher(&self, bot_id: u64) -> Result<&PrefixMatcher, Error> {
        if let Some(matcher) = self.matcher.get() {
            return Ok(matcher);
        }
        let built = PrefixMatcher::new(&self.settings.prefix, bot_id)?;
        Ok(self.matcher.get_or_init(|| built))
    }

    /// Entry point for every incoming message. Errors never escape: they are
    /// reported and the message is dropped.
    pub async fn handle_message(
        &self,
        message: &IncomingMessage,
        port: &dyn MessagePort,
    ) -> DispatchOutcome {
        match self.dispatch(message, port).await {
            Ok(outcome) => {
                tracing::debug!(?outcome, channel_id = message.channel_id, "Message dispatched");
                outcome
            }
            Err(e) => {
                self.reporter.report(&e).await;
                DispatchOutcome::Failed
            }
        }
    }

    async fn dispatch(
        &self,
        message: &IncomingMessage,
        port: &dyn MessagePort,
    ) -> Result<DispatchOutcome, Error> {
        let direct = message.is_direct();
        if (direct && !self.settings.allow_dm_commands)
            || message.webhook_id.is_some()
            || message.author_is_bot
        {
            return Ok(DispatchOutcome::Ignored);
        }

        let Some(parsed) = self.matcher(message.bot_id)?.parse(&message.content) else {
            return Ok(DispatchOutcome::NotCommand);
        };

        if parsed.name.is_empty() {
            if !parsed.by_mention {
                return Ok(DispatchOutcome::NotCommand);
            }
            let prefix = &self.settings.prefix;
            port.reply(&format!("My prefix is `{prefix}` | `{prefix}help`"))
                .await?;
            return Ok(DispatchOutcome::PrefixHint);
        }

        let Some(command) = self.registry.resolve(&parsed.name) else {
            return Ok(DispatchOutcome::UnknownCommand(parsed.name));
        };
        let name = command.name.clone();

        if !command.message_enabled {
            return Ok(DispatchOutcome::MessageDisabled(name));
        }
        if direct && !command.dm_allowed {
            return Ok(DispatchOutcome::DmDisallowed(name));
        }

        port.send_typing().await?;

        if command.owner_only && !self.is_owner(message.author_id) {
            return Ok(DispatchOutcome::OwnerOnly(name));
        }

        if !direct && deny_if_missing(port, command).await?.is_some() {
            return Ok(DispatchOutcome::MissingPermissions(name));
        }

        let status = self
            .cooldowns
            .check(message.author_id, &command.name, command.cooldown);
        if let CooldownStatus::OnCooldown(remaining) = status {
            port.reply(&format!(
                "Please wait {}s before reusing `{}`.",
                remaining_seconds(remaining),
                command.name
            ))
            .await?;
            return Ok(DispatchOutcome::OnCooldown(name, remaining));
        }

        self.usage.record_command().await?;

        let invocation = Invocation {
            message,
            port,
            command,
            dispatcher: self,
            args: parsed.args,
        };
        command.handler.run(&invocation).await?;

        Ok(DispatchOutcome::Executed(name))
    }
}
