// Discord layer - the serenity side of the bot: message events, the
// `MessagePort` implementation, built-in commands and startup handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "events/message_events.rs"]
pub mod events;

#[path = "handlers/handler_list.rs"]
pub mod handlers;

#[path = "messaging/serenity_port.rs"]
pub mod messaging;

use crate::core::config::BotConfig;
use crate::core::dispatch::Dispatcher;
use crate::core::errors::{CrashPolicy, ErrorReporter};
use std::sync::Arc;

pub use crate::core::errors::Error;

/// Shared state handed to every framework callback.
pub struct Data {
    pub config: Arc<BotConfig>,
    pub dispatcher: Arc<Dispatcher>,
    pub reporter: Arc<ErrorReporter>,
    pub crash_policy: Arc<CrashPolicy>,
}
