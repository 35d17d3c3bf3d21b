use serenity::all::{
    Context, GuildChannel, PermissionOverwrite, PermissionOverwriteType, Permissions, User,
};
use std::sync::Arc;

use crate::error::{ticket::TicketError, AppError};
use crate::state::AppState;

/// Grants `user` view and send access to a ticket channel.
pub async fn add_user(
    state: &Arc<AppState>,
    ctx: &Context,
    channel: &GuildChannel,
    user: &User,
) -> Result<String, AppError> {
    require_ticket_channel(state, channel)?;

    channel
        .id
        .create_permission(
            &ctx.http,
            PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::READ_MESSAGE_HISTORY,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(user.id),
            },
        )
        .await?;

    Ok(format!("Added <@{}> to this ticket.", user.id.get()))
}

/// Removes `user`'s access to a ticket channel.
pub async fn remove_user(
    state: &Arc<AppState>,
    ctx: &Context,
    channel: &GuildChannel,
    user: &User,
) -> Result<String, AppError> {
    require_ticket_channel(state, channel)?;

    channel
        .id
        .delete_permission(&ctx.http, PermissionOverwriteType::Member(user.id))
        .await?;

    Ok(format!("Removed <@{}> from this ticket.", user.id.get()))
}

fn require_ticket_channel(state: &AppState, channel: &GuildChannel) -> Result<(), AppError> {
    let parent = channel.parent_id.ok_or(TicketError::NotTicketChannel)?;
    if !state.config.is_ticket_category(parent) {
        return Err(TicketError::NotTicketChannel.into());
    }
    Ok(())
}
