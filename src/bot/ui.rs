//! Message, embed, modal, and button builders for the ticket UI.
//!
//! All interaction custom ids live here so handlers and builders can never
//! drift apart.

use serenity::all::{
    ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateInputText,
    CreateMessage, CreateModal, InputTextStyle, User,
};

use crate::model::ticket::TicketKind;
use crate::service::session::SessionReport;

pub const BTN_OPEN_TOURNEY: &str = "tourney_open_ticket";
pub const BTN_OPEN_PRETOURNEY: &str = "pretourney_open_ticket";
pub const BTN_DELETE_TICKET: &str = "tourney_delete_ticket";
pub const BTN_REOPEN_TICKET: &str = "tourney_reopen_ticket";

pub const MODAL_OPEN_TOURNEY: &str = "tourney_ticket_modal";
pub const MODAL_OPEN_PRETOURNEY: &str = "pretourney_ticket_modal";

pub const INPUT_TEAM: &str = "team_name";
pub const INPUT_BRACKET: &str = "bracket_number";
pub const INPUT_ISSUE: &str = "issue_description";

/// Ticket panel posted in a support channel: explains the flow and carries
/// the open-ticket button.
pub fn panel_message(kind: TicketKind) -> CreateMessage {
    let (title, description, button_id) = match kind {
        TicketKind::Tournament => (
            "🎟️ Tournament Support",
            "Having an issue during the tournament? Open a ticket and a staff \
             member will assist you.\n\nLimits: 3 open tickets per person, one \
             new ticket every 3 minutes.",
            BTN_OPEN_TOURNEY,
        ),
        TicketKind::PreTournament => (
            "🎟️ Pre-Tournament Support",
            "Questions about registration, seeding, or scheduling before the \
             tournament starts? Open a ticket here.",
            BTN_OPEN_PRETOURNEY,
        ),
    };

    let embed = CreateEmbed::new()
        .title(title)
        .description(description)
        .colour(Colour::BLURPLE);

    let button = CreateButton::new(button_id)
        .label("Open a Ticket")
        .style(ButtonStyle::Primary)
        .emoji('🎫');

    CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![button])])
}

/// Modal shown when a user clicks the open-ticket button.
///
/// Tournament tickets ask for a bracket number; pre-tournament tickets skip
/// it since no bracket exists yet.
pub fn ticket_modal(kind: TicketKind) -> CreateModal {
    let (modal_id, title) = match kind {
        TicketKind::Tournament => (MODAL_OPEN_TOURNEY, "Open a Tournament Ticket"),
        TicketKind::PreTournament => (MODAL_OPEN_PRETOURNEY, "Open a Pre-Tournament Ticket"),
    };

    let mut rows = vec![CreateActionRow::InputText(
        CreateInputText::new(InputTextStyle::Short, "Team Name", INPUT_TEAM)
            .max_length(100)
            .required(true),
    )];

    if kind == TicketKind::Tournament {
        rows.push(CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Match/Bracket Number", INPUT_BRACKET)
                .max_length(50)
                .required(false),
        ));
    }

    rows.push(CreateActionRow::InputText(
        CreateInputText::new(InputTextStyle::Paragraph, "Describe your issue", INPUT_ISSUE)
            .max_length(1000)
            .required(true),
    ));

    CreateModal::new(modal_id, title).components(rows)
}

/// First message posted inside a fresh ticket channel.
pub fn ticket_intro_message(
    opener: &User,
    team: Option<&str>,
    bracket: Option<&str>,
    issue: Option<&str>,
) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("New Support Ticket")
        .description(format!(
            "Thanks <@{}>, a staff member will be with you shortly.",
            opener.id.get()
        ))
        .field("Team", team.unwrap_or("Unknown"), true)
        .field("Match/Bracket", bracket.unwrap_or("Not specified"), true)
        .field("Issue", issue.unwrap_or("Not specified"), false)
        .colour(Colour::DARK_GREEN);

    CreateMessage::new()
        .content(format!("<@{}>", opener.id.get()))
        .embed(embed)
}

/// Evidence request posted in fresh tournament tickets. Match disputes
/// cannot be handled without a screenshot or replay.
pub fn proof_request_message(opener: &User) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("📸 Proof Required")
        .description(format!(
            "<@{}>, please attach a screenshot or replay link supporting your \
             report. Staff cannot rule on match disputes without evidence.",
            opener.id.get()
        ))
        .colour(Colour::ORANGE);

    CreateMessage::new().embed(embed)
}

/// Confirmation posted after a ticket is closed, with follow-up actions.
pub fn close_reply(closed_by: &User) -> CreateMessage {
    let embed = CreateEmbed::new()
        .description(format!(
            "✅ Ticket closed by <@{}>. Staff can delete it (with transcript) \
             or reopen it below.",
            closed_by.id.get()
        ))
        .colour(Colour::DARK_GREY);

    let delete = CreateButton::new(BTN_DELETE_TICKET)
        .label("Delete Ticket")
        .style(ButtonStyle::Danger)
        .emoji('🗑');
    let reopen = CreateButton::new(BTN_REOPEN_TICKET)
        .label("Reopen")
        .style(ButtonStyle::Secondary)
        .emoji('🔓');

    CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![delete, reopen])])
}

/// Final statistics embed posted when a tournament run ends.
pub fn session_report_embed(report: &SessionReport) -> CreateEmbed {
    let session = &report.session;

    let mut leaderboard = String::new();
    for (rank, staff) in report.top_staff.iter().enumerate() {
        leaderboard.push_str(&format!(
            "{}. **{}** — {} closure(s)\n",
            rank + 1,
            staff.staff_name,
            staff.closures
        ));
    }
    if leaderboard.is_empty() {
        leaderboard.push_str("No tickets were closed this session.");
    }

    CreateEmbed::new()
        .title("🏁 Tournament Session Report")
        .field("Tickets opened", session.ticket_count.to_string(), true)
        .field("Messages seen", session.message_count.to_string(), true)
        .field("Peak queue size", session.queue_peak.to_string(), true)
        .field("Top staff", leaderboard, false)
        .colour(Colour::GOLD)
}

/// Percentage split of the prize pool across the top four staff.
pub const PRIZE_SPLIT: [i64; 4] = [50, 25, 15, 10];

/// Hall-of-fame post honoring the most active staff of a session, splitting
/// a prize total 50/25/15/10 across the top four.
pub fn hall_of_fame_message(report: &SessionReport, prize_total: i64) -> CreateMessage {
    let mut body = String::new();
    for (rank, staff) in report.top_staff.iter().take(PRIZE_SPLIT.len()).enumerate() {
        body.push_str(&format!(
            "{} **{}** — {} closure(s) — {} ({}%)\n",
            match rank {
                0 => "🥇",
                1 => "🥈",
                2 => "🥉",
                _ => "🏅",
            },
            staff.staff_name,
            staff.closures,
            prize_total * PRIZE_SPLIT[rank] / 100,
            PRIZE_SPLIT[rank]
        ));
    }
    if body.is_empty() {
        body.push_str("No closures were recorded this session.");
    }

    let embed = CreateEmbed::new()
        .title("🏆 Support Hall of Fame")
        .description(body)
        .field("Prize pool", prize_total.to_string(), true)
        .colour(Colour::GOLD);

    CreateMessage::new().embed(embed)
}
