use serenity::all::{
    ActivityData, Command, CommandOptionType, Context, CreateCommand, CreateCommandOption, Ready,
};
use std::sync::Arc;

use crate::state::AppState;

/// Logs the connection and registers the global slash commands.
pub async fn handle(_state: &Arc<AppState>, ctx: &Context, ready: &Ready) {
    tracing::info!("{} is connected to Discord!", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("the ticket queue")));

    let commands = vec![
        CreateCommand::new("add")
            .description("Add a user to this ticket")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "User to add")
                    .required(true),
            ),
        CreateCommand::new("remove")
            .description("Remove a user from this ticket")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "User to remove")
                    .required(true),
            ),
        CreateCommand::new("queue").description("Show this ticket's position in the queue"),
        CreateCommand::new("tourney-panel")
            .description("Post the tournament ticket panel in this channel"),
        CreateCommand::new("pre-tourney-panel")
            .description("Post the pre-tournament ticket panel in this channel"),
        CreateCommand::new("hall-of-fame")
            .description("Post the staff hall of fame for the current session")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "prize",
                    "Prize pool to split 50/25/15/10 across the top four",
                )
                .min_int_value(1)
                .required(true),
            ),
    ];

    if let Err(e) = Command::set_global_commands(&ctx.http, commands).await {
        tracing::error!("Failed to register slash commands: {:?}", e);
    }
}
