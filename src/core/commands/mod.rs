pub mod command_models;
pub mod command_registry;

pub use command_models::{Command, CommandHandler, Invocation};
pub use command_registry::CommandRegistry;
