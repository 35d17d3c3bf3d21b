//! Discord gateway event handler.
//!
//! The `Handler` delegates each gateway event to its own module; the modules
//! reply to the user on domain rejections and log everything else.

mod interaction;
mod message;
mod ready;

use serenity::all::{Context, EventHandler, Interaction, Message, Ready};
use serenity::async_trait;
use std::sync::Arc;

use crate::state::AppState;

pub struct Handler {
    pub state: Arc<AppState>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle(&self.state, &ctx, &ready).await;
    }

    /// Called for every message the bot can see
    async fn message(&self, ctx: Context, msg: Message) {
        message::handle(&self.state, &ctx, &msg).await;
    }

    /// Called for slash commands, buttons, and modal submissions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle(&self.state, &ctx, interaction).await;
    }
}
