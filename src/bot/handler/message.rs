use serenity::all::{Context, GuildChannel, Message};
use std::sync::Arc;

use crate::bot::commands;
use crate::error::{ticket::TicketError, AppError};
use crate::service::session::SessionStatsService;
use crate::state::AppState;

/// Handles guild messages: session telemetry plus the staff prefix commands.
pub async fn handle(state: &Arc<AppState>, ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    let channel = match msg.channel_id.to_channel(&ctx.http).await {
        Ok(channel) => match channel.guild() {
            Some(guild_channel) => guild_channel,
            None => return,
        },
        Err(e) => {
            tracing::warn!("Failed to resolve channel {}: {:?}", msg.channel_id, e);
            return;
        }
    };

    // Every message inside a ticket category counts toward the session
    if channel
        .parent_id
        .is_some_and(|parent| state.config.is_ticket_category(parent))
    {
        SessionStatsService::new(&state.db).spawn_message_count();
    }

    if !msg.content.starts_with('!') {
        return;
    }

    if let Err(e) = dispatch(state, ctx, msg, &channel).await {
        if let AppError::TicketErr(_) = e {
            // Domain rejection with a user-facing message
        } else {
            tracing::error!("Prefix command failed: {:?}", e);
        }
        if let Err(reply_err) = msg.reply(&ctx.http, e.user_facing()).await {
            tracing::warn!("Failed to send error reply: {:?}", reply_err);
        }
    }
}

/// Routes a prefix command. All prefix commands are staff-only.
async fn dispatch(
    state: &Arc<AppState>,
    ctx: &Context,
    msg: &Message,
    channel: &GuildChannel,
) -> Result<(), AppError> {
    let command = msg.content.split_whitespace().next().unwrap_or("");
    let known = matches!(
        command,
        "!close" | "!c" | "!lock" | "!unlock" | "!reopen" | "!starttourney" | "!endtourney"
    );
    if !known {
        return Ok(());
    }

    let is_staff = msg
        .member
        .as_ref()
        .is_some_and(|member| state.config.is_staff(&member.roles));
    if !is_staff {
        return Err(TicketError::NotStaff.into());
    }

    match command {
        "!close" | "!c" => commands::close::close_ticket(state, ctx, channel, &msg.author).await,
        "!lock" => commands::lock::lock_general(state, ctx, msg).await,
        "!unlock" => commands::lock::unlock_general(state, ctx, msg).await,
        // In an archived ticket, !reopen reopens the ticket; elsewhere it
        // reopens the locked general channel
        "!reopen" => {
            let is_closed_ticket = channel
                .parent_id
                .is_some_and(|parent| state.config.kind_of_archive_category(parent).is_some());
            if is_closed_ticket {
                commands::reopen::reopen_ticket(state, ctx, channel).await
            } else {
                commands::lock::unlock_general(state, ctx, msg).await
            }
        }
        "!starttourney" => commands::tourney::start_tournament(state, ctx, msg).await,
        "!endtourney" => commands::tourney::end_tournament(state, ctx, msg).await,
        _ => Ok(()),
    }
}
