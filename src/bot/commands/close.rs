use serenity::all::{Context, GuildChannel, User};
use std::sync::Arc;

use crate::bot::ui;
use crate::error::AppError;
use crate::service::ticket::lifecycle::TicketLifecycleService;
use crate::state::AppState;

/// Closes an open ticket and posts the follow-up actions message.
pub async fn close_ticket(
    state: &Arc<AppState>,
    ctx: &Context,
    channel: &GuildChannel,
    staff: &User,
) -> Result<(), AppError> {
    let lifecycle = TicketLifecycleService::new(state.clone(), ctx.http.clone());
    lifecycle.close(channel, staff).await?;

    channel
        .id
        .send_message(&ctx.http, ui::close_reply(staff))
        .await?;

    Ok(())
}
