use serenity::all::{Context, GuildChannel};
use std::sync::Arc;

use crate::error::AppError;
use crate::service::ticket::lifecycle::TicketLifecycleService;
use crate::state::AppState;

/// Moves a closed ticket back to its active category.
pub async fn reopen_ticket(
    state: &Arc<AppState>,
    ctx: &Context,
    channel: &GuildChannel,
) -> Result<(), AppError> {
    let lifecycle = TicketLifecycleService::new(state.clone(), ctx.http.clone());
    lifecycle.reopen(channel).await?;

    channel
        .id
        .say(&ctx.http, "🔓 This ticket has been reopened.")
        .await?;

    Ok(())
}
