// Built-in message commands.
// Each command gets its own file exposing a `command()` constructor.

pub mod help;
pub mod ping;
pub mod presence;
pub mod say;
pub mod stats;
pub mod uptime;

use crate::core::commands::Command;

/// Every built-in command, in the order `help` lists them.
pub fn builtin_commands() -> Vec<Command> {
    vec![
        help::command(),
        ping::command(),
        stats::command(),
        say::command(),
        uptime::command(),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::CommandRegistry;

    #[test]
    fn builtins_register_without_collisions() {
        let mut registry = CommandRegistry::new();
        for command in builtin_commands() {
            registry.register(command).unwrap();
        }
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.resolve("botinfo").unwrap().name, "stats");
        assert_eq!(registry.resolve("h").unwrap().name, "help");
    }
}
