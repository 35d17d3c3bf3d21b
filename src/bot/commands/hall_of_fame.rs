use serenity::all::Context;
use std::sync::Arc;

use crate::bot::ui;
use crate::error::AppError;
use crate::service::session::SessionStatsService;
use crate::state::AppState;

/// Posts the hall of fame for the current session without ending it,
/// splitting `prize_total` across the top staff.
pub async fn post_hall_of_fame(
    state: &Arc<AppState>,
    ctx: &Context,
    prize_total: i64,
) -> Result<String, AppError> {
    let Some(report) = SessionStatsService::new(&state.db).active_report().await? else {
        return Ok("No tournament session is currently active.".to_string());
    };

    state
        .config
        .hall_of_fame_channel_id
        .send_message(&ctx.http, ui::hall_of_fame_message(&report, prize_total))
        .await?;

    Ok("Hall of fame posted.".to_string())
}
