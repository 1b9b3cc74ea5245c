use crate::core::commands::{Command, CommandHandler, Invocation};
use crate::core::errors::Error;
use crate::core::extensions::{SliceExt, StrExt};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

const DETAIL_TEMPLATE: &str =
    "**{prefix}{name}** {usage}\n{description}\nAliases: {aliases}\nCooldown: {cooldown}";

const COMMANDS_PER_LINE: usize = 6;

const TIPS: &[&str] = &[
    "You can mention me instead of typing the prefix.",
    "Command names are not case sensitive.",
    "Use `{prefix}help <command>` to see aliases and cooldowns.",
];

struct Help;

#[async_trait]
impl CommandHandler for Help {
    async fn run(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        let reply = match invocation.args.first() {
            Some(name) => describe(invocation, &name.to_lowercase()),
            None => overview(invocation),
        };
        invocation.reply(reply).await
    }
}

/// Commands the invoker may see; owner-only ones are hidden from others.
fn visible<'a>(invocation: &'a Invocation<'_>) -> impl Iterator<Item = &'a Command> {
    let is_owner = invocation
        .dispatcher
        .is_owner(invocation.message.author_id);
    invocation
        .dispatcher
        .registry()
        .iter()
        .map(|command| command.as_ref())
        .filter(move |command| command.message_enabled && (is_owner || !command.owner_only))
}

fn overview(invocation: &Invocation<'_>) -> String {
    let prefix = invocation.prefix();
    let mut categories: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for command in visible(invocation) {
        categories
            .entry(command.category.as_str())
            .or_default()
            .push(format!("`{prefix}{}`", command.name));
    }

    let mut lines = vec!["📖 **Commands**".to_string()];
    for (category, names) in categories {
        let rows: Vec<String> = names
            .chunk(COMMANDS_PER_LINE)
            .iter()
            .map(|row| row.join(" "))
            .collect();
        lines.push(format!("**{}**: {}", category.to_capitalize(), rows.join("\n")));
    }
    lines.push(format!(
        "Use `{prefix}help <command>` for details on a single command."
    ));
    if let Some(tip) = TIPS.random_element() {
        lines.push(format!("Tip: {}", tip.replace_values([("prefix", prefix)])));
    }
    lines.join("\n")
}

fn describe(invocation: &Invocation<'_>, name: &str) -> String {
    let command = invocation
        .dispatcher
        .registry()
        .resolve(name)
        .map(|command| command.as_ref())
        .filter(|command| visible(invocation).any(|shown| shown.name == command.name));
    let Some(command) = command else {
        return format!("No command named `{name}`.");
    };

    let aliases = if command.aliases.is_empty() {
        "none".to_string()
    } else {
        command.aliases.join(", ")
    };
    let cooldown = if command.has_cooldown() {
        format_cooldown(command.cooldown)
    } else {
        "none".to_string()
    };

    DETAIL_TEMPLATE.replace_values([
        ("prefix", invocation.prefix().to_string()),
        ("name", command.name.clone()),
        ("usage", command.usage.clone().unwrap_or_default()),
        ("description", command.description.clone()),
        ("aliases", aliases),
        ("cooldown", cooldown),
    ])
}

fn format_cooldown(cooldown: Duration) -> String {
    format!("{}s", cooldown.as_secs_f64())
}

pub fn command() -> Command {
    Command::new("help", Help)
        .aliases(["h", "commands"])
        .description("List commands or show details for one.")
        .usage("[command]")
        .category("info")
        .dm_allowed()
}
