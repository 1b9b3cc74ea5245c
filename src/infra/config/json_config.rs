use crate::core::config::{BotConfig, ConfigError};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Reads the JSON config at `path` (defaults when the file does not exist),
/// then applies environment overrides from `lookup`.
pub fn load_config(
    path: impl AsRef<Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<BotConfig, ConfigError> {
    let path = path.as_ref();
    let mut config = if path.exists() {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file))?
    } else {
        tracing::info!(path = %path.display(), "No config file found, using defaults");
        BotConfig::default()
    };

    config.apply_env(lookup)?;
    Ok(config)
}

/// `load_config` against the real environment, honouring `BOT_CONFIG`.
pub fn load_from_env() -> Result<BotConfig, ConfigError> {
    let path = std::env::var("BOT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path, |key| std::env::var(key).ok())
}
