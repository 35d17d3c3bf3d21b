use serenity::all::UserId;

/// Status glyph prefixed to an open ticket's channel name.
pub const OPEN_GLYPH: &str = "「❗」";
/// Status glyph prefixed to a closed ticket's channel name.
pub const CLOSED_GLYPH: &str = "「👍」";

/// Highest ticket number before the counter wraps back to 1.
pub const MAX_TICKET_NUMBER: u16 = 999;

/// Which of the two ticket pipelines a ticket belongs to.
///
/// Tournament and pre-tournament tickets each have their own active/archive
/// category pair; the pairs are never cross-mapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketKind {
    Tournament,
    PreTournament,
}

impl TicketKind {
    pub fn label(&self) -> &'static str {
        match self {
            TicketKind::Tournament => "Tournament",
            TicketKind::PreTournament => "Pre-Tournament",
        }
    }
}

/// Builds the channel name for a freshly opened ticket, e.g. `「❗」ticket-042`.
pub fn ticket_channel_name(number: u16) -> String {
    format!("{}ticket-{:03}", OPEN_GLYPH, number)
}

/// Strips a leading `「..」` status glyph, leaving the rest of the name intact.
pub fn strip_status_glyph(name: &str) -> &str {
    if name.contains('「') {
        if let Some((_, rest)) = name.split_once('」') {
            return rest;
        }
    }
    name
}

/// Channel name after a Close transition (open glyph replaced, rest preserved).
pub fn closed_channel_name(name: &str) -> String {
    format!("{}{}", CLOSED_GLYPH, strip_status_glyph(name))
}

/// Channel name after a Reopen transition.
pub fn reopened_channel_name(name: &str) -> String {
    format!("{}{}", OPEN_GLYPH, strip_status_glyph(name))
}

/// Extracts the numeric suffix from a `ticket-XXX` channel name, if any.
pub fn ticket_number_from_name(name: &str) -> Option<u16> {
    let (_, tail) = name.split_once("ticket-")?;
    let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Returns true for channels that look like ticket channels (used when sweeping
/// whole categories; the support/panel channels never match).
pub fn is_ticket_channel_name(name: &str) -> bool {
    name.contains("ticket-")
}

/// Durable ticket identity, encoded into the channel topic.
///
/// The topic is the authoritative record of ownership; the channel name is
/// cosmetic and may be renamed at any time. Wire format is pipe-delimited
/// `key:value` pairs: `tourney-opener:<id>|team:<t>|bracket:<b>|issue:<i>`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TicketMetadata {
    pub opener: Option<UserId>,
    pub team: Option<String>,
    pub bracket: Option<String>,
    pub issue: Option<String>,
}

impl TicketMetadata {
    pub fn new(
        opener: UserId,
        team: Option<String>,
        bracket: Option<String>,
        issue: Option<String>,
    ) -> Self {
        Self {
            opener: Some(opener),
            team,
            bracket,
            issue,
        }
    }

    /// Encodes the metadata into a channel-topic string.
    pub fn encode_topic(&self) -> String {
        let mut parts = Vec::new();
        if let Some(opener) = self.opener {
            parts.push(format!("tourney-opener:{}", opener.get()));
        }
        if let Some(team) = &self.team {
            parts.push(format!("team:{}", team));
        }
        if let Some(bracket) = &self.bracket {
            parts.push(format!("bracket:{}", bracket));
        }
        if let Some(issue) = &self.issue {
            parts.push(format!("issue:{}", issue));
        }
        parts.join("|")
    }

    /// Parses a channel topic back into metadata.
    ///
    /// Unknown keys are ignored and a malformed opener id yields `None` for
    /// the opener rather than an error; topics are user-adjacent data and the
    /// callers all have explicit fallbacks for missing fields.
    pub fn parse_topic(topic: &str) -> Self {
        let mut meta = Self::default();
        for part in topic.split('|') {
            let Some((key, value)) = part.split_once(':') else {
                continue;
            };
            match key.trim() {
                "tourney-opener" => {
                    meta.opener = value.trim().parse::<u64>().ok().map(UserId::new);
                }
                "team" => meta.team = Some(value.to_string()),
                "bracket" => meta.bracket = Some(value.to_string()),
                "issue" => meta.issue = Some(value.to_string()),
                _ => {}
            }
        }
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_name_is_zero_padded() {
        assert_eq!(ticket_channel_name(7), "「❗」ticket-007");
        assert_eq!(ticket_channel_name(42), "「❗」ticket-042");
        assert_eq!(ticket_channel_name(999), "「❗」ticket-999");
    }

    #[test]
    fn close_rename_replaces_glyph_and_preserves_rest() {
        assert_eq!(closed_channel_name("「❗」ticket-042"), "「👍」ticket-042");
        // Already-closed names keep a single glyph
        assert_eq!(closed_channel_name("「👍」ticket-042"), "「👍」ticket-042");
        // Names without a glyph are prefixed as-is
        assert_eq!(closed_channel_name("ticket-042"), "「👍」ticket-042");
    }

    #[test]
    fn reopen_rename_restores_open_glyph() {
        assert_eq!(reopened_channel_name("「👍」ticket-042"), "「❗」ticket-042");
    }

    #[test]
    fn ticket_number_parses_from_name() {
        assert_eq!(ticket_number_from_name("「👍」ticket-042"), Some(42));
        assert_eq!(ticket_number_from_name("ticket-999"), Some(999));
        assert_eq!(ticket_number_from_name("general"), None);
        assert_eq!(ticket_number_from_name("ticket-"), None);
    }

    #[test]
    fn topic_round_trips_full_metadata() {
        let meta = TicketMetadata::new(
            UserId::new(12345),
            Some("XYZ".to_string()),
            Some("23".to_string()),
            Some("No-show opponent".to_string()),
        );
        let topic = meta.encode_topic();
        assert_eq!(topic, "tourney-opener:12345|team:XYZ|bracket:23|issue:No-show opponent");
        assert_eq!(TicketMetadata::parse_topic(&topic), meta);
    }

    #[test]
    fn topic_without_bracket_round_trips() {
        // Pre-tourney tickets have no bracket field
        let meta = TicketMetadata::new(
            UserId::new(1),
            Some("N/A".to_string()),
            None,
            Some("Registration question".to_string()),
        );
        assert_eq!(TicketMetadata::parse_topic(&meta.encode_topic()), meta);
    }

    #[test]
    fn malformed_opener_id_parses_as_none() {
        let meta = TicketMetadata::parse_topic("tourney-opener:not-a-number|team:ABC");
        assert_eq!(meta.opener, None);
        assert_eq!(meta.team.as_deref(), Some("ABC"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let meta = TicketMetadata::parse_topic("foo:bar|tourney-opener:9");
        assert_eq!(meta.opener, Some(UserId::new(9)));
    }
}
