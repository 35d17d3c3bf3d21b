use chrono::{DateTime, Utc};
use serenity::all::{
    ChannelId, CreateAttachment, CreateMessage, GetMessages, GuildChannel, Http, UserId,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::model::ticket::{strip_status_glyph, TicketMetadata};

/// One message rendered into a transcript.
#[derive(Clone, Debug)]
pub struct TranscriptLine {
    pub timestamp: DateTime<Utc>,
    pub author_name: String,
    pub author_id: u64,
    pub content: String,
    pub attachments: Vec<String>,
}

/// Renders the full plain-text transcript for a ticket.
///
/// The header echoes the ticket's identity metadata with explicit fallbacks,
/// followed by one line per message in chronological order. An empty history
/// gets a sentinel line so the artifact is never just a header.
pub fn build_transcript(
    channel_name: &str,
    metadata: &TicketMetadata,
    lines: &[TranscriptLine],
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Transcript of #{}\n",
        strip_status_glyph(channel_name)
    ));
    out.push_str(&format!(
        "Team: {}\n",
        metadata.team.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!(
        "Match/Bracket: {}\n",
        metadata.bracket.as_deref().unwrap_or("Not specified")
    ));
    out.push_str(&format!(
        "Issue: {}\n",
        metadata.issue.as_deref().unwrap_or("Not specified")
    ));
    out.push_str("----------------------------------------\n");

    if lines.is_empty() {
        out.push_str("No messages in this ticket.\n");
        return out;
    }

    for line in lines {
        out.push_str(&format!(
            "[{}] {}({}): {}",
            line.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            line.author_name,
            line.author_id,
            line.content
        ));
        if !line.attachments.is_empty() {
            out.push_str(&format!(" [Attachments: {}]", line.attachments.join(", ")));
        }
        out.push('\n');
    }

    out
}

/// Serializes a ticket channel's history, delivers it, then deletes the
/// channel.
pub struct TranscriptArchiver {
    http: Arc<Http>,
    log_channel: ChannelId,
}

impl TranscriptArchiver {
    pub fn new(http: Arc<Http>, log_channel: ChannelId) -> Self {
        Self { http, log_channel }
    }

    /// Archives `channel` and deletes it.
    ///
    /// Delivery order is fixed: the opener's direct message is attempted
    /// first (failures swallowed), then the audit-log post is awaited, and
    /// only then is the channel deleted, so the transcript always reflects
    /// the channel's final history.
    ///
    /// # Arguments
    /// - `channel` - The ticket channel to archive and delete
    /// - `deleted_by` - Display name of whoever triggered the deletion
    pub async fn archive_and_delete(
        &self,
        channel: &GuildChannel,
        deleted_by: &str,
    ) -> Result<(), AppError> {
        let metadata = channel
            .topic
            .as_deref()
            .map(TicketMetadata::parse_topic)
            .unwrap_or_default();

        let lines = self.fetch_history(channel.id).await?;
        let transcript = build_transcript(&channel.name, &metadata, &lines);
        let filename = format!("{}.txt", strip_status_glyph(&channel.name));

        if let Some(opener) = metadata.opener {
            self.try_dm_opener(opener, &channel.name, &transcript, &filename)
                .await;
        }

        let opener_mention = match metadata.opener {
            Some(id) => format!("<@{}>", id.get()),
            None => "Unknown".to_string(),
        };
        let log_message = CreateMessage::new()
            .content(format!(
                "Ticket **#{}** deleted by **{}** (opened by {}).",
                strip_status_glyph(&channel.name),
                deleted_by,
                opener_mention
            ))
            .add_file(CreateAttachment::bytes(
                transcript.into_bytes(),
                filename,
            ));
        self.log_channel.send_message(&self.http, log_message).await?;

        channel.id.delete(&self.http).await?;

        Ok(())
    }

    /// Fetches the channel's complete message history, oldest first.
    ///
    /// Discord returns history newest-first in pages of at most 100, so this
    /// walks backwards with a `before` cursor and reverses at the end.
    async fn fetch_history(&self, channel: ChannelId) -> Result<Vec<TranscriptLine>, AppError> {
        let mut lines = Vec::new();
        let mut cursor = None;

        loop {
            let mut request = GetMessages::new().limit(100);
            if let Some(before) = cursor {
                request = request.before(before);
            }

            let batch = channel.messages(&self.http, request).await?;
            if batch.is_empty() {
                break;
            }
            cursor = batch.last().map(|msg| msg.id);

            for msg in &batch {
                lines.push(TranscriptLine {
                    timestamp: msg.timestamp.to_utc(),
                    author_name: msg.author.name.clone(),
                    author_id: msg.author.id.get(),
                    content: msg.content.clone(),
                    attachments: msg
                        .attachments
                        .iter()
                        .map(|attachment| attachment.url.clone())
                        .collect(),
                });
            }

            if batch.len() < 100 {
                break;
            }
        }

        lines.reverse();
        Ok(lines)
    }

    /// Sends the transcript to the opener by direct message.
    ///
    /// Failures (DMs disabled, user gone) are logged and swallowed; archival
    /// never fails because the opener could not be reached.
    async fn try_dm_opener(&self, opener: UserId, channel_name: &str, transcript: &str, filename: &str) {
        let user = match opener.to_user(&self.http).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Could not resolve ticket opener {}: {:?}", opener, e);
                return;
            }
        };

        let message = CreateMessage::new()
            .content(format!(
                "Your ticket **#{}** has been closed. A transcript is attached.",
                strip_status_glyph(channel_name)
            ))
            .add_file(CreateAttachment::bytes(
                transcript.as_bytes().to_vec(),
                filename.to_string(),
            ));

        if let Err(e) = user.direct_message(&self.http, message).await {
            tracing::warn!("Could not DM transcript to {}: {:?}", opener, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meta() -> TicketMetadata {
        TicketMetadata::new(
            UserId::new(42),
            Some("XYZ".to_string()),
            Some("12".to_string()),
            Some("Score dispute".to_string()),
        )
    }

    #[test]
    fn header_includes_metadata() {
        let text = build_transcript("「❗」ticket-007", &meta(), &[]);
        assert!(text.starts_with("Transcript of #ticket-007\n"));
        assert!(text.contains("Team: XYZ\n"));
        assert!(text.contains("Match/Bracket: 12\n"));
        assert!(text.contains("Issue: Score dispute\n"));
    }

    #[test]
    fn missing_metadata_uses_fallbacks() {
        let text = build_transcript("ticket-001", &TicketMetadata::default(), &[]);
        assert!(text.contains("Team: Unknown\n"));
        assert!(text.contains("Match/Bracket: Not specified\n"));
        assert!(text.contains("Issue: Not specified\n"));
    }

    #[test]
    fn empty_history_gets_sentinel() {
        let text = build_transcript("ticket-001", &meta(), &[]);
        assert!(text.ends_with("No messages in this ticket.\n"));
    }

    #[test]
    fn message_lines_are_formatted() {
        let lines = vec![TranscriptLine {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 10, 14, 30, 0).unwrap(),
            author_name: "alice".to_string(),
            author_id: 99,
            content: "we lost the lobby code".to_string(),
            attachments: vec![],
        }];
        let text = build_transcript("ticket-002", &meta(), &lines);
        assert!(text.contains("[2026-01-10 14:30:00 UTC] alice(99): we lost the lobby code\n"));
        assert!(!text.contains("No messages in this ticket."));
    }

    #[test]
    fn attachments_are_appended() {
        let lines = vec![TranscriptLine {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 10, 14, 30, 0).unwrap(),
            author_name: "bob".to_string(),
            author_id: 7,
            content: "screenshot".to_string(),
            attachments: vec!["https://cdn.example/a.png".to_string()],
        }];
        let text = build_transcript("ticket-003", &meta(), &lines);
        assert!(text.contains("screenshot [Attachments: https://cdn.example/a.png]\n"));
    }
}
