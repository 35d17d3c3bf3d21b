use serenity::all::{Context, GuildChannel};
use std::sync::Arc;

use crate::error::AppError;
use crate::service::ticket::queue::QueueDashboardService;
use crate::state::AppState;

/// Answers a position-in-queue query for the invoking ticket channel.
pub async fn queue_position(
    state: &Arc<AppState>,
    ctx: &Context,
    channel: &GuildChannel,
) -> Result<String, AppError> {
    let dashboard = QueueDashboardService::new(state.clone(), ctx.http.clone());
    dashboard.position_reply(channel).await
}
