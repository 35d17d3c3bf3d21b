use serenity::all::{
    ActionRowComponent, CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, GuildChannel, Interaction, ModalInteraction, ResolvedValue,
};
use std::sync::Arc;

use crate::bot::{commands, ui};
use crate::error::{ticket::TicketError, AppError};
use crate::model::ticket::{TicketKind, TicketMetadata};
use crate::service::ticket::lifecycle::TicketLifecycleService;
use crate::state::AppState;

/// Routes slash commands, button clicks, and modal submissions.
pub async fn handle(state: &Arc<AppState>, ctx: &Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(cmd) => {
            if let Err(e) = handle_command(state, ctx, &cmd).await {
                log_unless_domain(&e);
                respond_command(ctx, &cmd, e.user_facing()).await;
            }
        }
        Interaction::Component(component) => {
            if let Err(e) = handle_component(state, ctx, &component).await {
                log_unless_domain(&e);
                respond_component(ctx, &component, e.user_facing()).await;
            }
        }
        Interaction::Modal(modal) => {
            if let Err(e) = handle_modal(state, ctx, &modal).await {
                log_unless_domain(&e);
                respond_modal(ctx, &modal, e.user_facing()).await;
            }
        }
        _ => {}
    }
}

async fn handle_command(
    state: &Arc<AppState>,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    let channel = resolve_guild_channel(ctx, cmd.channel_id).await?;

    let is_staff = cmd
        .member
        .as_ref()
        .is_some_and(|member| state.config.is_staff(&member.roles));

    let reply = match cmd.data.name.as_str() {
        "queue" => commands::queue::queue_position(state, ctx, &channel).await?,
        "add" | "remove" => {
            if !is_staff {
                return Err(TicketError::NotStaff.into());
            }
            let Some(ResolvedValue::User(user, _)) =
                cmd.data.options().first().map(|opt| opt.value.clone())
            else {
                return Err(AppError::InternalError(
                    "missing user option on membership command".to_string(),
                ));
            };
            if cmd.data.name == "add" {
                commands::membership::add_user(state, ctx, &channel, user).await?
            } else {
                commands::membership::remove_user(state, ctx, &channel, user).await?
            }
        }
        "tourney-panel" => {
            if !is_staff {
                return Err(TicketError::NotStaff.into());
            }
            commands::panel::post_panel(state, ctx, cmd.channel_id, TicketKind::Tournament).await?
        }
        "pre-tourney-panel" => {
            if !is_staff {
                return Err(TicketError::NotStaff.into());
            }
            commands::panel::post_panel(state, ctx, cmd.channel_id, TicketKind::PreTournament)
                .await?
        }
        "hall-of-fame" => {
            if !is_staff {
                return Err(TicketError::NotStaff.into());
            }
            let Some(ResolvedValue::Integer(prize_total)) =
                cmd.data.options().first().map(|opt| opt.value.clone())
            else {
                return Err(AppError::InternalError(
                    "missing prize option on hall-of-fame command".to_string(),
                ));
            };
            commands::hall_of_fame::post_hall_of_fame(state, ctx, prize_total).await?
        }
        other => {
            tracing::warn!("Unknown slash command: {}", other);
            return Ok(());
        }
    };

    respond_command(ctx, cmd, reply).await;
    Ok(())
}

async fn handle_component(
    state: &Arc<AppState>,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    match component.data.custom_id.as_str() {
        ui::BTN_OPEN_TOURNEY => {
            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Modal(ui::ticket_modal(TicketKind::Tournament)),
                )
                .await?;
        }
        ui::BTN_OPEN_PRETOURNEY => {
            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Modal(ui::ticket_modal(TicketKind::PreTournament)),
                )
                .await?;
        }
        ui::BTN_DELETE_TICKET => {
            require_staff_component(state, component)?;
            let channel = resolve_guild_channel(ctx, component.channel_id).await?;
            // Acknowledge before the channel disappears under the interaction
            component
                .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
                .await?;
            commands::delete::delete_ticket(state, ctx, &channel, &component.user).await?;
        }
        ui::BTN_REOPEN_TICKET => {
            require_staff_component(state, component)?;
            let channel = resolve_guild_channel(ctx, component.channel_id).await?;
            let lifecycle = TicketLifecycleService::new(state.clone(), ctx.http.clone());
            lifecycle.reopen(&channel).await?;
            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .content("🔓 This ticket has been reopened."),
                    ),
                )
                .await?;
        }
        other => {
            tracing::warn!("Unknown component interaction: {}", other);
        }
    }

    Ok(())
}

async fn handle_modal(
    state: &Arc<AppState>,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let kind = match modal.data.custom_id.as_str() {
        ui::MODAL_OPEN_TOURNEY => TicketKind::Tournament,
        ui::MODAL_OPEN_PRETOURNEY => TicketKind::PreTournament,
        other => {
            tracing::warn!("Unknown modal submission: {}", other);
            return Ok(());
        }
    };

    let mut team = None;
    let mut bracket = None;
    let mut issue = None;
    for row in &modal.data.components {
        for component in &row.components {
            if let ActionRowComponent::InputText(input) = component {
                let value = input.value.clone().filter(|v| !v.trim().is_empty());
                match input.custom_id.as_str() {
                    ui::INPUT_TEAM => team = value,
                    ui::INPUT_BRACKET => bracket = value,
                    ui::INPUT_ISSUE => issue = value,
                    _ => {}
                }
            }
        }
    }

    let metadata = TicketMetadata::new(modal.user.id, team.clone(), bracket.clone(), issue.clone());

    let lifecycle = TicketLifecycleService::new(state.clone(), ctx.http.clone());
    let ticket = lifecycle.create(kind, &modal.user, metadata).await?;

    ticket
        .id
        .send_message(
            &ctx.http,
            ui::ticket_intro_message(
                &modal.user,
                team.as_deref(),
                bracket.as_deref(),
                issue.as_deref(),
            ),
        )
        .await?;

    // Tournament disputes need evidence up front
    if kind == TicketKind::Tournament {
        ticket
            .id
            .send_message(&ctx.http, ui::proof_request_message(&modal.user))
            .await?;
    }

    respond_modal(
        ctx,
        modal,
        format!("🎫 Your ticket has been created: <#{}>", ticket.id.get()),
    )
    .await;

    Ok(())
}

fn require_staff_component(
    state: &AppState,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let is_staff = component
        .member
        .as_ref()
        .is_some_and(|member| state.config.is_staff(&member.roles));
    if is_staff {
        Ok(())
    } else {
        Err(TicketError::NotStaff.into())
    }
}

async fn resolve_guild_channel(
    ctx: &Context,
    channel_id: serenity::all::ChannelId,
) -> Result<GuildChannel, AppError> {
    channel_id
        .to_channel(&ctx.http)
        .await?
        .guild()
        .ok_or_else(|| TicketError::NotGuildChannel.into())
}

fn log_unless_domain(e: &AppError) {
    if !matches!(e, AppError::TicketErr(_)) {
        tracing::error!("Interaction failed: {:?}", e);
    }
}

async fn respond_command(ctx: &Context, cmd: &CommandInteraction, content: String) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    if let Err(e) = cmd.create_response(&ctx.http, response).await {
        tracing::warn!("Failed to respond to slash command: {:?}", e);
    }
}

async fn respond_component(ctx: &Context, component: &ComponentInteraction, content: String) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::warn!("Failed to respond to component interaction: {:?}", e);
    }
}

async fn respond_modal(ctx: &Context, modal: &ModalInteraction, content: String) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    if let Err(e) = modal.create_response(&ctx.http, response).await {
        tracing::warn!("Failed to respond to modal submission: {:?}", e);
    }
}
