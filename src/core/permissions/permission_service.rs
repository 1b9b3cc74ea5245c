// Permission gate for commands.
//
// The platform works out the effective permission sets (roles, channel
// overwrites); this module only compares them against what a command declares.

use crate::core::commands::Command;
use crate::core::dispatch::MessagePort;
use crate::core::errors::Error;
use serenity::model::Permissions;

/// Which side of the check came up short, and with what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDenial {
    /// The member lacks guild-level permissions.
    Member(Permissions),
    /// The member lacks permissions in this channel.
    Channel(Permissions),
    /// The bot itself lacks permissions in this channel.
    Bot(Permissions),
}

impl PermissionDenial {
    pub fn missing(&self) -> Permissions {
        match self {
            Self::Member(missing) | Self::Channel(missing) | Self::Bot(missing) => *missing,
        }
    }

    /// The reply sent to the invoker.
    pub fn message(&self) -> String {
        let names = self.missing().get_permission_names().join("`, `");
        match self {
            Self::Member(_) => {
                format!("You need the following permission(s) to use this command: `{names}`")
            }
            Self::Channel(_) => {
                format!("You need the following permission(s) in this channel: `{names}`")
            }
            Self::Bot(_) => format!("I need the following permission(s) to do that: `{names}`"),
        }
    }
}

/// Permissions in `required` that `granted` does not cover. Administrator
/// covers everything.
pub fn missing_permissions(required: Permissions, granted: Permissions) -> Permissions {
    if granted.contains(Permissions::ADMINISTRATOR) {
        return Permissions::empty();
    }
    required.difference(granted)
}

/// Compares the invoker's and the bot's grants against the command.
///
/// Only the permission sets the command actually declares are looked up.
/// A set the platform cannot resolve counts as empty.
pub async fn find_denial(
    port: &dyn MessagePort,
    command: &Command,
) -> Result<Option<PermissionDenial>, Error> {
    if !command.required_permissions.is_empty() {
        let granted = port.member_permissions().await?.unwrap_or_default();
        let missing = missing_permissions(command.required_permissions, granted);
        if !missing.is_empty() {
            return Ok(Some(PermissionDenial::Member(missing)));
        }
    }

    if !command.channel_permissions.is_empty() {
        let granted = port.member_channel_permissions().await?.unwrap_or_default();
        let missing = missing_permissions(command.channel_permissions, granted);
        if !missing.is_empty() {
            return Ok(Some(PermissionDenial::Channel(missing)));
        }
    }

    if !command.bot_permissions.is_empty() {
        let granted = port.bot_channel_permissions().await?.unwrap_or_default();
        let missing = missing_permissions(command.bot_permissions, granted);
        if !missing.is_empty() {
            return Ok(Some(PermissionDenial::Bot(missing)));
        }
    }

    Ok(None)
}

/// Returns the denial when the command must not run, after telling the
/// invoker which permissions are missing.
pub async fn deny_if_missing(
    port: &dyn MessagePort,
    command: &Command,
) -> Result<Option<PermissionDenial>, Error> {
    let denial = find_denial(port, command).await?;
    if let Some(denial) = &denial {
        port.reply(&denial.message()).await?;
    }
    Ok(denial)
}
