use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::bot::handler::Handler;
use crate::error::AppError;
use crate::scheduler::queue_dashboard;
use crate::state::AppState;

/// Starts the Discord bot in a blocking manner
///
/// This function creates and starts the Discord bot client. It should be called from within
/// a tokio::spawn task since it will block until the bot shuts down. The queue dashboard
/// scheduler is started once the client (and therefore its HTTP handle) exists.
///
/// # Arguments
/// - `state` - Shared application state
///
/// # Returns
/// - `Ok(())` if the bot starts and runs successfully
/// - `Err(AppError)` if bot initialization or connection fails
pub async fn start_bot(state: Arc<AppState>) -> Result<(), AppError> {
    // Configure gateway intents - what events the bot will receive
    // MESSAGE_CONTENT is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    // Create the event handler with shared state
    let handler = Handler {
        state: state.clone(),
    };

    // Build the client
    let mut client = Client::builder(&state.config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    queue_dashboard::start_scheduler(state, client.http.clone()).await?;

    tracing::info!("Starting Discord bot...");

    // Start the bot (this blocks until shutdown)
    client.start().await?;

    Ok(())
}
