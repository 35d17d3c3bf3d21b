use serenity::all::{Context, Message};
use std::sync::Arc;

use crate::error::AppError;
use crate::service::ticket::lifecycle::{TicketLifecycleService, LOCK_DURATION_HOURS};
use crate::state::AppState;

/// Hides the general ticket channel from members; it reopens automatically
/// after the lock timer expires.
pub async fn lock_general(
    state: &Arc<AppState>,
    ctx: &Context,
    msg: &Message,
) -> Result<(), AppError> {
    let lifecycle = TicketLifecycleService::new(state.clone(), ctx.http.clone());
    lifecycle.lock_general_channel().await?;

    msg.reply(
        &ctx.http,
        format!(
            "🔒 Ticket channel locked. It will reopen automatically in {} hours.",
            LOCK_DURATION_HOURS
        ),
    )
    .await?;

    Ok(())
}

/// Reopens the general ticket channel ahead of its timer.
pub async fn unlock_general(
    state: &Arc<AppState>,
    ctx: &Context,
    msg: &Message,
) -> Result<(), AppError> {
    let lifecycle = TicketLifecycleService::new(state.clone(), ctx.http.clone());
    lifecycle.unlock_general_channel().await?;

    msg.reply(&ctx.http, "🔓 Ticket channel reopened.").await?;

    Ok(())
}
