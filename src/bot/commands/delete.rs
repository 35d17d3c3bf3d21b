use serenity::all::{Context, GuildChannel, User};
use std::sync::Arc;

use crate::error::AppError;
use crate::service::ticket::lifecycle::TicketLifecycleService;
use crate::state::AppState;

/// Archives a ticket (transcript, DM, audit log) and deletes the channel.
pub async fn delete_ticket(
    state: &Arc<AppState>,
    ctx: &Context,
    channel: &GuildChannel,
    actor: &User,
) -> Result<(), AppError> {
    let lifecycle = TicketLifecycleService::new(state.clone(), ctx.http.clone());
    lifecycle.delete(channel, &actor.name).await
}
