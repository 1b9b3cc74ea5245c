// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "config/json_config.rs"]
pub mod config;

#[path = "cooldowns/in_memory.rs"]
pub mod cooldowns;

#[path = "errors/webhook_sink.rs"]
pub mod errors;

#[path = "usage/usage_store.rs"]
pub mod usage;
