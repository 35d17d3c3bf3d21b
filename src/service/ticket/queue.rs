use chrono::Utc;
use serenity::all::{EditMessage, GetMessages, GuildChannel, Http};
use std::sync::Arc;

use crate::error::{ticket::TicketError, AppError};
use crate::model::queue::QueueSnapshot;
use crate::model::ticket::{is_ticket_channel_name, ticket_number_from_name, TicketKind};
use crate::state::{lock, AppState};

/// Maintains the live queue dashboard and answers position queries.
///
/// The dashboard reads only channel-listing state, so it needs no persistence
/// and recovers from any restart on its next tick.
pub struct QueueDashboardService {
    state: Arc<AppState>,
    http: Arc<Http>,
}

impl QueueDashboardService {
    pub fn new(state: Arc<AppState>, http: Arc<Http>) -> Self {
        Self { state, http }
    }

    /// Recomputes the queue estimate and refreshes the dashboard message.
    ///
    /// The existing message is edited in place only while it is still the
    /// newest message in the channel; otherwise the stale one is deleted and
    /// a fresh message is posted at the bottom, keeping the dashboard pinned
    /// to the conversation's tail.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let snapshot = self.estimate(TicketKind::Tournament).await?;
        let body = render_dashboard(snapshot, Utc::now().timestamp());

        let dashboard_channel = self.state.config.general_ticket_channel_id;
        let previous = *lock(&self.state.dashboard_message)?;

        let newest = dashboard_channel
            .messages(&self.http, GetMessages::new().limit(1))
            .await?
            .first()
            .map(|msg| msg.id);

        if let Some(message_id) = previous {
            if newest == Some(message_id) {
                dashboard_channel
                    .edit_message(&self.http, message_id, EditMessage::new().content(body))
                    .await?;
                return Ok(());
            }

            // Stale dashboard below newer messages; replace it at the bottom
            if let Err(e) = dashboard_channel.delete_message(&self.http, message_id).await {
                tracing::warn!("Failed to delete stale dashboard message: {:?}", e);
            }
        }

        let sent = dashboard_channel.say(&self.http, body).await?;
        *lock(&self.state.dashboard_message)? = Some(sent.id);

        Ok(())
    }

    /// Computes the current queue snapshot for one pipeline.
    pub async fn estimate(&self, kind: TicketKind) -> Result<QueueSnapshot, AppError> {
        let channels = self.state.config.guild_id.channels(&self.http).await?;

        let active_category = self.state.config.active_category(kind);
        let archive_category = self.state.config.archive_category(kind);

        let active_numbers: Vec<u16> = channels
            .values()
            .filter(|channel| channel.parent_id == Some(active_category))
            .filter_map(|channel| ticket_number_from_name(&channel.name))
            .collect();

        let max_closed = channels
            .values()
            .filter(|channel| channel.parent_id == Some(archive_category))
            .filter_map(|channel| ticket_number_from_name(&channel.name))
            .max();

        Ok(QueueSnapshot::estimate(&active_numbers, max_closed))
    }

    /// Answers a position-in-queue query for one ticket channel.
    ///
    /// Recomputes independently of the dashboard: tickets in the channel's
    /// own category, ordered by creation time, 1-based index.
    pub async fn position_reply(&self, channel: &GuildChannel) -> Result<String, AppError> {
        let parent = channel.parent_id.ok_or(TicketError::NotTicketChannel)?;
        if !self.state.config.is_ticket_category(parent) {
            return Err(TicketError::NotTicketChannel.into());
        }

        let mut siblings: Vec<GuildChannel> = self
            .state
            .config
            .guild_id
            .channels(&self.http)
            .await?
            .into_values()
            .filter(|ch| ch.parent_id == Some(parent) && is_ticket_channel_name(&ch.name))
            .collect();
        // Snowflake ids are monotonic, so id order is creation order
        siblings.sort_by_key(|ch| ch.id.get());

        let total = siblings.len();
        let position = siblings
            .iter()
            .position(|ch| ch.id == channel.id)
            .map(|idx| idx + 1)
            .ok_or(TicketError::NotTicketChannel)?;

        if position == 1 {
            Ok(format!(
                "This ticket is **now being served** ({} ticket(s) in the category).",
                total
            ))
        } else {
            Ok(format!(
                "This ticket is **#{} of {}** in the queue.",
                position, total
            ))
        }
    }
}

/// Renders the dashboard body for a queue snapshot.
///
/// Always prefixed with a relative "last updated" timestamp so stale
/// dashboards are self-evident.
pub fn render_dashboard(snapshot: QueueSnapshot, now_unix: i64) -> String {
    let header = format!("🎫 **Ticket Queue** — updated <t:{}:R>\n", now_unix);
    match snapshot {
        QueueSnapshot::Empty => format!("{}The queue is currently empty. 🎉", header),
        QueueSnapshot::Serving { number, waiting } => format!(
            "{}Now serving: **ticket-{:03}**\nWaiting: **{}**",
            header, number, waiting
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dashboard_has_timestamp_and_empty_notice() {
        let body = render_dashboard(QueueSnapshot::Empty, 1_700_000_000);
        assert!(body.starts_with("🎫 **Ticket Queue** — updated <t:1700000000:R>"));
        assert!(body.contains("queue is currently empty"));
    }

    #[test]
    fn serving_dashboard_shows_number_and_waiting() {
        let snapshot = QueueSnapshot::Serving {
            number: 5,
            waiting: 2,
        };
        let body = render_dashboard(snapshot, 1_700_000_000);
        assert!(body.contains("Now serving: **ticket-005**"));
        assert!(body.contains("Waiting: **2**"));
    }
}
