// Entry point of the bot.
//
// **Architecture Overview:**
// - `core/` = Dispatch, gates, error reporting (platform-agnostic)
// - `infra/` = Implementations of core traits (SQLite, webhook, config file)
// - `discord/` = Discord-specific adapters (events, commands, handlers)
//
// This file loads configuration, wires the services together, runs the
// startup handlers and logs the bot in.

#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::commands::CommandRegistry;
use crate::core::config::BotConfig;
use crate::core::cooldowns::CooldownService;
use crate::core::dispatch::{DispatchSettings, Dispatcher};
use crate::core::errors::{CrashPolicy, ErrorReporter, ErrorSink, PlatformError, ReportStyle};
use crate::core::usage::UsageService;
use crate::discord::commands::presence;
use crate::discord::events::handle_message_create;
use crate::discord::handlers::{self, SetupState};
use crate::discord::{Data, Error};
use crate::infra::cooldowns::InMemoryCooldownStore;
use crate::infra::errors::WebhookSink;
use crate::infra::usage::SqliteUsageStore;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for gateway events. Only messages matter here.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        handle_message_create(ctx, new_message, data).await;
    }
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::EventHandler {
            error, framework, ..
        } => {
            framework.user_data.reporter.report(&error).await;
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

fn build_reporter(config: &BotConfig) -> ErrorReporter {
    let sink = config.webhook_url().map(|url| {
        Arc::new(WebhookSink::new(url, &config.discord.support.webhook)) as Arc<dyn ErrorSink>
    });
    if sink.is_none() {
        tracing::info!("No error webhook configured, errors go to the log only");
    }
    ErrorReporter::new(sink, ReportStyle::default())
}

/// Runs the startup handlers and builds the shared state.
async fn bootstrap(
    config: Arc<BotConfig>,
    reporter: Arc<ErrorReporter>,
    crash_policy: Arc<CrashPolicy>,
) -> anyhow::Result<Data> {
    let mut registry = CommandRegistry::new();
    let loaded = handlers::load_all(&mut SetupState {
        config: &config,
        registry: &mut registry,
        crash_policy: &crash_policy,
    })
    .map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("{} handlers loaded", loaded);

    // Keep runtime databases in a dedicated folder so the repo root stays tidy.
    std::fs::create_dir_all("data")?;
    let usage_store = SqliteUsageStore::new(&config.storage.usage_db_path).await?;

    let dispatcher = Dispatcher::new(
        registry,
        CooldownService::new(InMemoryCooldownStore::new()),
        UsageService::new(usage_store),
        Arc::clone(&reporter),
        DispatchSettings {
            prefix: config.discord.prefix.clone(),
            owners: config.owners(),
            allow_dm_commands: config.discord.allow_dm_commands,
        },
    );

    Ok(Data {
        config,
        dispatcher: Arc::new(dispatcher),
        reporter,
        crash_policy,
    })
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    tracing::info!(
        "Welcome to {} | Version: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = match infra::config::load_from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let reporter = Arc::new(build_reporter(&config));
    let crash_policy = Arc::new(CrashPolicy::new(
        config.source.anti_crash,
        Arc::clone(&reporter),
    ));

    let Ok(token) = std::env::var("DISCORD_TOKEN") else {
        tracing::error!(
            "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token."
        );
        std::process::exit(1);
    };

    let data = match bootstrap(Arc::clone(&config), Arc::clone(&reporter), crash_policy).await {
        Ok(data) => data,
        Err(e) => {
            reporter.report(e).await;
            std::process::exit(1);
        }
    };

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Prefix commands go through our own dispatcher, not poise's parser.
            prefix_options: poise::PrefixFrameworkOptions {
                mention_as_prefix: false,
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!("Logged in as {}", ready.user.name);
                presence::on_ready(ctx, &data.config.discord.prefix);
                Ok(data)
            })
        })
        .build();

    let mut client = match serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            let error: Error = Box::new(PlatformError::from(e));
            reporter.report(&error).await;
            std::process::exit(1);
        }
    };

    tracing::info!("Logging into the bot...");
    if let Err(e) = client.start().await {
        tracing::error!("The bot token is invalid or the bot's intents are disabled");
        let error: Error = Box::new(PlatformError::from(e));
        reporter.report(&error).await;
        client.shard_manager.shutdown_all().await;
        std::process::exit(1);
    }
}
