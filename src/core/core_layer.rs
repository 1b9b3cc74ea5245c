// The core module contains all bot logic that does not depend on the chat
// client: dispatch, gates, error reporting and helpers.
// Each feature gets its own submodule.

#[path = "commands/mod.rs"]
pub mod commands;

#[path = "config/config_models.rs"]
pub mod config;

#[path = "cooldowns/cooldown_service.rs"]
pub mod cooldowns;

#[path = "dispatch/mod.rs"]
pub mod dispatch;

#[path = "errors/mod.rs"]
pub mod errors;

#[path = "extensions/text_extensions.rs"]
pub mod extensions;

#[path = "permissions/permission_service.rs"]
pub mod permissions;

#[path = "usage/usage_service.rs"]
pub mod usage;
