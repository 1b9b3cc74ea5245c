use crate::core::dispatch::{Dispatcher, IncomingMessage, MessagePort};
use crate::core::errors::Error;
use async_trait::async_trait;
use serenity::model::Permissions;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// The code behind a command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(&self, invocation: &Invocation<'_>) -> Result<(), Error>;
}

/// A named, invocable command. Built once at startup and never mutated after
/// it has been registered.
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    /// Argument hint shown by `help`, e.g. `"<message>"`.
    pub usage: Option<String>,
    pub category: String,
    /// Guild-level permissions the invoking member must hold.
    pub required_permissions: Permissions,
    /// Permissions the member must hold in the invoking channel.
    pub channel_permissions: Permissions,
    /// Permissions the bot itself needs in the invoking channel.
    pub bot_permissions: Permissions,
    pub owner_only: bool,
    /// Whether the command can be invoked through a prefixed message.
    pub message_enabled: bool,
    pub dm_allowed: bool,
    pub cooldown: Duration,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        Self {
            name: name.into().to_lowercase(),
            aliases: Vec::new(),
            description: String::new(),
            usage: None,
            category: "general".to_string(),
            required_permissions: Permissions::empty(),
            channel_permissions: Permissions::empty(),
            bot_permissions: Permissions::empty(),
            owner_only: false,
            message_enabled: true,
            dm_allowed: false,
            cooldown: Duration::ZERO,
            handler: Arc::new(handler),
        }
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases
            .into_iter()
            .map(|alias| alias.into().to_lowercase())
            .collect();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn required_permissions(mut self, permissions: Permissions) -> Self {
        self.required_permissions = permissions;
        self
    }

    pub fn channel_permissions(mut self, permissions: Permissions) -> Self {
        self.channel_permissions = permissions;
        self
    }

    pub fn bot_permissions(mut self, permissions: Permissions) -> Self {
        self.bot_permissions = permissions;
        self
    }

    pub fn owner_only(mut self) -> Self {
        self.owner_only = true;
        self
    }

    pub fn slash_only(mut self) -> Self {
        self.message_enabled = false;
        self
    }

    pub fn dm_allowed(mut self) -> Self {
        self.dm_allowed = true;
        self
    }

    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn has_cooldown(&self) -> bool {
        !self.cooldown.is_zero()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("owner_only", &self.owner_only)
            .field("cooldown", &self.cooldown)
            .finish_non_exhaustive()
    }
}

/// Everything a handler gets to see for a single invocation.
pub struct Invocation<'a> {
    pub message: &'a IncomingMessage,
    pub port: &'a dyn MessagePort,
    pub command: &'a Command,
    pub dispatcher: &'a Dispatcher,
    pub args: Vec<String>,
}

impl Invocation<'_> {
    /// The configured text prefix (not the mention form).
    pub fn prefix(&self) -> &str {
        self.dispatcher.settings().prefix.as_str()
    }

    pub async fn reply(&self, content: impl Into<String>) -> Result<(), Error> {
        self.port.reply(&content.into()).await
    }
}
