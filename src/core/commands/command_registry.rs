use super::command_models::Command;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command name cannot be empty")]
    EmptyName,

    #[error("A command named `{0}` is already registered")]
    DuplicateName(String),

    #[error("`{name}` of command `{command}` collides with command `{existing}`")]
    NameCollision {
        name: String,
        command: String,
        existing: String,
    },
}

/// Name and alias lookup for every registered command.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<Command>>,
    /// alias -> primary name
    aliases: HashMap<String, String>,
    /// Primary names in registration order, for help listings.
    order: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, keeping names and aliases globally unique.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        let name = command.name.to_lowercase();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.commands.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        if let Some(owner) = self.aliases.get(&name) {
            return Err(RegistryError::NameCollision {
                name: name.clone(),
                command: name,
                existing: owner.clone(),
            });
        }

        if let Some((alias, existing)) = self.alias_collision(&name, &command.aliases) {
            return Err(RegistryError::NameCollision {
                name: alias,
                command: name,
                existing,
            });
        }

        for alias in &command.aliases {
            self.aliases.insert(alias.clone(), name.clone());
        }
        self.order.push(name.clone());
        self.commands.insert(name, Arc::new(command));
        Ok(())
    }

    /// Finds the first alias that repeats the command's own name or another
    /// alias, or is already taken by a registered command.
    fn alias_collision(&self, name: &str, aliases: &[String]) -> Option<(String, String)> {
        aliases.iter().enumerate().find_map(|(index, alias)| {
            let existing = if alias == name || aliases[..index].contains(alias) {
                Some(name.to_string())
            } else if self.commands.contains_key(alias) {
                Some(alias.clone())
            } else {
                self.aliases.get(alias).cloned()
            };
            existing.map(|existing| (alias.clone(), existing))
        })
    }

    /// Looks a command up by exact name first, then by alias.
    pub fn resolve(&self, name: &str) -> Option<&Arc<Command>> {
        self.commands.get(name).or_else(|| {
            self.aliases
                .get(name)
                .and_then(|primary| self.commands.get(primary))
        })
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
