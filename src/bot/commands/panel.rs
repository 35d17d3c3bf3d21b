use serenity::all::{ChannelId, Context};
use std::sync::Arc;

use crate::bot::ui;
use crate::error::AppError;
use crate::model::ticket::TicketKind;
use crate::state::AppState;

/// Posts a ticket panel (embed plus open-ticket button) in `channel`.
pub async fn post_panel(
    _state: &Arc<AppState>,
    ctx: &Context,
    channel: ChannelId,
    kind: TicketKind,
) -> Result<String, AppError> {
    channel
        .send_message(&ctx.http, ui::panel_message(kind))
        .await?;

    Ok(format!("{} ticket panel posted.", kind.label()))
}
