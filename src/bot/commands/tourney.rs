use serenity::all::{
    ChannelId, Context, CreateMessage, EditChannel, GetMessages, Message, PermissionOverwrite,
    PermissionOverwriteType, Permissions, RoleId,
};
use std::sync::Arc;

use crate::bot::ui;
use crate::error::AppError;
use crate::model::ticket::TicketKind;
use crate::service::session::SessionStatsService;
use crate::service::ticket::lifecycle::TicketLifecycleService;
use crate::state::{lock, AppState};

/// Starts a tournament run.
///
/// Flips the support channels over to tournament mode: the general ticket
/// channel and the pre-tournament support channel are hidden, the tournament
/// support channel opens with a fresh panel, both support channels are
/// purged, and every leftover pre-tournament ticket is archived away. A new
/// stats session starts recording and the ticket counters reset.
pub async fn start_tournament(
    state: &Arc<AppState>,
    ctx: &Context,
    msg: &Message,
) -> Result<(), AppError> {
    let session = SessionStatsService::new(&state.db).start_session().await?;
    lock(&state.counters)?.reset_all();

    let member_role = member_role(state);
    let config = &state.config;
    let lifecycle = TicketLifecycleService::new(state.clone(), ctx.http.clone());

    lifecycle.hide_general_channel().await?;
    set_visibility(ctx, config.tourney_support_channel_id, member_role, true).await?;
    set_visibility(ctx, config.pre_tourney_support_channel_id, member_role, false).await?;

    purge_channel(ctx, config.tourney_support_channel_id).await?;
    purge_channel(ctx, config.pre_tourney_support_channel_id).await?;

    config
        .tourney_support_channel_id
        .send_message(&ctx.http, ui::panel_message(TicketKind::Tournament))
        .await?;

    spawn_rename(ctx, config.tourney_support_channel_id, "🟢┃tournament-support");
    spawn_rename(ctx, config.pre_tourney_support_channel_id, "🔴┃pre-tournament-support");

    let cleared = lifecycle
        .archive_all(TicketKind::PreTournament, "Tournament start")
        .await?;

    tracing::info!(
        "Tournament session {} started by {} ({} pre-tournament tickets cleared)",
        session.id,
        msg.author.name,
        cleared
    );

    msg.reply(
        &ctx.http,
        "🏁 Tournament started. Support channels flipped, counters reset, statistics recording.",
    )
    .await?;

    Ok(())
}

/// Ends the active tournament run.
///
/// Reverses the channel flip from `start_tournament`, archives every
/// tournament ticket, and posts the session's final report.
pub async fn end_tournament(
    state: &Arc<AppState>,
    ctx: &Context,
    msg: &Message,
) -> Result<(), AppError> {
    let member_role = member_role(state);
    let config = &state.config;
    let lifecycle = TicketLifecycleService::new(state.clone(), ctx.http.clone());

    lifecycle.unlock_general_channel().await?;
    set_visibility(ctx, config.tourney_support_channel_id, member_role, false).await?;
    set_visibility(ctx, config.pre_tourney_support_channel_id, member_role, true).await?;

    config
        .pre_tourney_support_channel_id
        .send_message(&ctx.http, ui::panel_message(TicketKind::PreTournament))
        .await?;

    spawn_rename(ctx, config.tourney_support_channel_id, "🔴┃tournament-support");
    spawn_rename(ctx, config.pre_tourney_support_channel_id, "🟢┃pre-tournament-support");

    let cleared = lifecycle
        .archive_all(TicketKind::Tournament, "Tournament end")
        .await?;

    let Some(report) = SessionStatsService::new(&state.db).end_session().await? else {
        msg.reply(
            &ctx.http,
            format!(
                "Support channels reset and {} ticket(s) archived, but no session was active.",
                cleared
            ),
        )
        .await?;
        return Ok(());
    };

    tracing::info!(
        "Tournament session {} ended by {} ({} tickets archived)",
        report.session.id,
        msg.author.name,
        cleared
    );

    msg.channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(ui::session_report_embed(&report)),
        )
        .await?;

    Ok(())
}

/// Role whose visibility the tournament flip toggles.
fn member_role(state: &AppState) -> RoleId {
    state
        .config
        .member_role_id
        .unwrap_or_else(|| RoleId::new(state.config.guild_id.get()))
}

async fn set_visibility(
    ctx: &Context,
    channel: ChannelId,
    role: RoleId,
    visible: bool,
) -> Result<(), AppError> {
    let overwrite = if visible {
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL,
            deny: Permissions::SEND_MESSAGES,
            kind: PermissionOverwriteType::Role(role),
        }
    } else {
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(role),
        }
    };

    channel.create_permission(&ctx.http, overwrite).await?;
    Ok(())
}

/// Clears up to one page of recent messages from a support channel.
async fn purge_channel(ctx: &Context, channel: ChannelId) -> Result<(), AppError> {
    let messages = channel
        .messages(&ctx.http, GetMessages::new().limit(100))
        .await?;

    match messages.len() {
        0 => {}
        1 => {
            channel.delete_message(&ctx.http, messages[0].id).await?;
        }
        _ => {
            let ids: Vec<_> = messages.iter().map(|m| m.id).collect();
            channel.delete_messages(&ctx.http, ids).await?;
        }
    }

    Ok(())
}

/// Background rename; support channel names are cosmetic and never on the
/// critical path.
fn spawn_rename(ctx: &Context, channel: ChannelId, name: &'static str) {
    let http = ctx.http.clone();
    tokio::spawn(async move {
        if let Err(e) = channel.edit(&http, EditChannel::new().name(name)).await {
            tracing::warn!("Failed to rename channel {} to {}: {:?}", channel, name, e);
        }
    });
}
