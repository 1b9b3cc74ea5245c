// Startup handlers. Each entry wires one concern into the bot before login;
// they run in order and a failure aborts startup.

use crate::core::commands::CommandRegistry;
use crate::core::config::BotConfig;
use crate::core::errors::{CrashPolicy, Error};
use crate::discord::commands::builtin_commands;

/// State handlers may modify while the bot is being assembled.
pub struct SetupState<'a> {
    pub config: &'a BotConfig,
    pub registry: &'a mut CommandRegistry,
    pub crash_policy: &'a CrashPolicy,
}

pub struct HandlerEntry {
    pub name: &'static str,
    pub load: fn(&mut SetupState<'_>) -> Result<(), Error>,
}

pub fn handlers() -> Vec<HandlerEntry> {
    vec![
        HandlerEntry {
            name: "commands",
            load: load_commands,
        },
        HandlerEntry {
            name: "anti_crash",
            load: load_anti_crash,
        },
    ]
}

/// Runs every handler in order and returns how many were loaded.
pub fn load_all(state: &mut SetupState<'_>) -> Result<usize, Error> {
    let handlers = handlers();
    for handler in &handlers {
        (handler.load)(state)
            .map_err(|e| format!("Handler {} failed to load: {}", handler.name, e))?;
        tracing::debug!(handler = handler.name, "Handler loaded");
    }
    Ok(handlers.len())
}

fn load_commands(state: &mut SetupState<'_>) -> Result<(), Error> {
    for command in builtin_commands() {
        state.registry.register(command)?;
    }
    tracing::info!("{} commands registered", state.registry.len());
    Ok(())
}

fn load_anti_crash(state: &mut SetupState<'_>) -> Result<(), Error> {
    if !state.config.source.anti_crash {
        tracing::info!("Anti-crash disabled");
        return Ok(());
    }
    if state.crash_policy.install_panic_hook() {
        tracing::info!("Anti-crash panic hook installed");
    }
    Ok(())
}
