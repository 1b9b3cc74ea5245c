// Bot configuration. Loaded from a JSON file (see `infra::config`) and then
// patched from environment variables.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_USAGE_DB_PATH: &str = "data/usage.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub discord: DiscordConfig,
    pub source: SourceConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    pub prefix: String,
    pub allow_dm_commands: bool,
    pub support: SupportConfig,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            allow_dm_commands: false,
            support: SupportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// User ids allowed to run owner-only commands.
    pub owners: Vec<u64>,
    pub webhook: WebhookConfig,
}

/// Where error reports go.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub avatar: Option<String>,
    pub username: Option<String>,
    pub threads: ThreadsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadsConfig {
    /// Forum thread error reports are posted into.
    pub bugs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Send error reports to the webhook.
    pub logger: bool,
    /// Report panics instead of letting them take the process down.
    pub anti_crash: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            logger: true,
            anti_crash: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub usage_db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            usage_db_path: DEFAULT_USAGE_DB_PATH.to_string(),
        }
    }
}

impl BotConfig {
    /// Applies environment overrides. `lookup` is `std::env::var(..).ok()` in
    /// production; tests pass a map.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(prefix) = lookup("BOT_PREFIX") {
            self.discord.prefix = prefix;
        }
        if let Some(owners) = lookup("BOT_OWNERS") {
            self.discord.support.owners = parse_owners(&owners)?;
        }

        let webhook = &mut self.discord.support.webhook;
        if let Some(url) = lookup("ERROR_WEBHOOK_URL") {
            webhook.url = Some(url);
        }
        if let Some(username) = lookup("ERROR_WEBHOOK_USERNAME") {
            webhook.username = Some(username);
        }
        if let Some(avatar) = lookup("ERROR_WEBHOOK_AVATAR") {
            webhook.avatar = Some(avatar);
        }
        if let Some(thread) = lookup("ERROR_WEBHOOK_THREAD") {
            webhook.threads.bugs = Some(parse_value("ERROR_WEBHOOK_THREAD", &thread)?);
        }

        if let Some(logger) = lookup("BOT_LOGGER") {
            self.source.logger = parse_flag("BOT_LOGGER", &logger)?;
        }
        if let Some(anti_crash) = lookup("BOT_ANTI_CRASH") {
            self.source.anti_crash = parse_flag("BOT_ANTI_CRASH", &anti_crash)?;
        }
        if let Some(path) = lookup("USAGE_DB_PATH") {
            self.storage.usage_db_path = path;
        }

        self.normalize();
        Ok(())
    }

    /// Blank strings count as unset; an empty prefix falls back to the default.
    pub fn normalize(&mut self) {
        if self.discord.prefix.trim().is_empty() {
            tracing::warn!("Empty command prefix configured, using {DEFAULT_PREFIX:?}");
            self.discord.prefix = DEFAULT_PREFIX.to_string();
        }
        let webhook = &mut self.discord.support.webhook;
        for field in [&mut webhook.url, &mut webhook.username, &mut webhook.avatar] {
            if field.as_deref().is_some_and(|value| value.trim().is_empty()) {
                *field = None;
            }
        }
    }

    pub fn owners(&self) -> HashSet<u64> {
        self.discord.support.owners.iter().copied().collect()
    }

    /// Error reports go to the webhook only when logging is on and a URL is set.
    pub fn webhook_url(&self) -> Option<&str> {
        if !self.source.logger {
            return None;
        }
        self.discord.support.webhook.url.as_deref()
    }
}

fn parse_owners(raw: &str) -> Result<Vec<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| parse_value("BOT_OWNERS", id))
        .collect()
}

fn parse_value(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_a_fresh_install() {
        let config = BotConfig::default();
        assert_eq!(config.discord.prefix, "!");
        assert!(!config.discord.allow_dm_commands);
        assert!(config.source.logger);
        assert!(config.source.anti_crash);
        assert!(config.owners().is_empty());
        assert_eq!(config.webhook_url(), None);
        assert_eq!(config.storage.usage_db_path, "data/usage.db");
    }

    #[test]
    fn partial_json_keeps_defaults_for_the_rest() {
        let config: BotConfig =
            serde_json::from_str(r#"{ "discord": { "prefix": "?" } }"#).unwrap();
        assert_eq!(config.discord.prefix, "?");
        assert!(config.source.anti_crash);
    }

    #[test]
    fn env_overrides_win() {
        let mut config = BotConfig::default();
        config
            .apply_env(env(&[
                ("BOT_PREFIX", "$"),
                ("BOT_OWNERS", "1, 2,,3"),
                ("ERROR_WEBHOOK_URL", "https://discord.com/api/webhooks/1/abc"),
                ("ERROR_WEBHOOK_THREAD", "55"),
                ("BOT_ANTI_CRASH", "off"),
            ]))
            .unwrap();

        assert_eq!(config.discord.prefix, "$");
        assert_eq!(config.owners(), HashSet::from([1, 2, 3]));
        assert_eq!(
            config.webhook_url(),
            Some("https://discord.com/api/webhooks/1/abc")
        );
        assert_eq!(config.discord.support.webhook.threads.bugs, Some(55));
        assert!(!config.source.anti_crash);
    }

    #[test]
    fn logger_off_disables_the_webhook() {
        let mut config = BotConfig::default();
        config
            .apply_env(env(&[
                ("ERROR_WEBHOOK_URL", "https://discord.com/api/webhooks/1/abc"),
                ("BOT_LOGGER", "false"),
            ]))
            .unwrap();
        assert_eq!(config.webhook_url(), None);
    }

    #[test]
    fn bad_values_are_rejected_with_their_key() {
        let mut config = BotConfig::default();
        let err = config
            .apply_env(env(&[("BOT_OWNERS", "12,abc")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "BOT_OWNERS", .. }));

        let err = config
            .apply_env(env(&[("BOT_LOGGER", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("BOT_LOGGER"));
    }

    #[test]
    fn blank_prefix_and_webhook_fall_back() {
        let mut config = BotConfig::default();
        config
            .apply_env(env(&[("BOT_PREFIX", "  "), ("ERROR_WEBHOOK_URL", "")]))
            .unwrap();
        assert_eq!(config.discord.prefix, "!");
        assert_eq!(config.webhook_url(), None);
    }
}
