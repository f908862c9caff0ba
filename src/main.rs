mod commands;
mod config;
mod conversation_state;
mod discord_manager;
mod form_controller;
mod session_store;
mod support;



use std::process;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::BotConfig;
use crate::discord_manager::DiscordManager;
use crate::session_store::InMemorySessionStore;
use crate::support::Support;


#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calorie_form_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(why) = dotenv() {
        warn!(error = %why, ".env file not loaded, using process environment");
    }

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(why) => {
            error!(error = %why, "Invalid configuration");
            process::exit(1);
        }
    };

    let store = Arc::new(InMemorySessionStore::new());
    let support = Arc::new(Support::new(store, config.commands.clone()));
    let mut discord = DiscordManager::new(&config.discord_token, support).await?;

    info!(start_command = %config.commands.start_form, "Starting calorie form bot");
    discord.start().await?;

    Ok(())
}
