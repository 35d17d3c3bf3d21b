use serenity::all::{ChannelId, GuildId, RoleId};

use crate::error::{config::ConfigError, AppError};
use crate::model::ticket::TicketKind;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    pub guild_id: GuildId,

    pub tourney_active_category_id: ChannelId,
    pub tourney_archive_category_id: ChannelId,
    pub pre_tourney_active_category_id: ChannelId,
    pub pre_tourney_archive_category_id: ChannelId,

    pub tourney_support_channel_id: ChannelId,
    pub pre_tourney_support_channel_id: ChannelId,
    pub general_ticket_channel_id: ChannelId,

    pub log_channel_id: ChannelId,
    pub admin_alert_channel_id: ChannelId,
    pub hall_of_fame_channel_id: ChannelId,

    pub staff_role_ids: Vec<RoleId>,
    pub admin_alert_role_id: RoleId,
    pub member_role_id: Option<RoleId>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: require_var("DATABASE_URL")?,
            discord_bot_token: require_var("DISCORD_BOT_TOKEN")?,
            guild_id: GuildId::new(u64_var("GUILD_ID")?),
            tourney_active_category_id: channel_id_var("TOURNEY_ACTIVE_CATEGORY_ID")?,
            tourney_archive_category_id: channel_id_var("TOURNEY_ARCHIVE_CATEGORY_ID")?,
            pre_tourney_active_category_id: channel_id_var("PRE_TOURNEY_ACTIVE_CATEGORY_ID")?,
            pre_tourney_archive_category_id: channel_id_var("PRE_TOURNEY_ARCHIVE_CATEGORY_ID")?,
            tourney_support_channel_id: channel_id_var("TOURNEY_SUPPORT_CHANNEL_ID")?,
            pre_tourney_support_channel_id: channel_id_var("PRE_TOURNEY_SUPPORT_CHANNEL_ID")?,
            general_ticket_channel_id: channel_id_var("GENERAL_TICKET_CHANNEL_ID")?,
            log_channel_id: channel_id_var("LOG_CHANNEL_ID")?,
            admin_alert_channel_id: channel_id_var("ADMIN_ALERT_CHANNEL_ID")?,
            hall_of_fame_channel_id: channel_id_var("HALL_OF_FAME_CHANNEL_ID")?,
            staff_role_ids: role_id_list_var("STAFF_ROLE_IDS")?,
            admin_alert_role_id: RoleId::new(u64_var("ADMIN_ALERT_ROLE_ID")?),
            member_role_id: optional_u64_var("MEMBER_ROLE_ID")?.map(RoleId::new),
        })
    }

    /// Active ticket category for the given pipeline.
    pub fn active_category(&self, kind: TicketKind) -> ChannelId {
        match kind {
            TicketKind::Tournament => self.tourney_active_category_id,
            TicketKind::PreTournament => self.pre_tourney_active_category_id,
        }
    }

    /// Archive category for the given pipeline.
    pub fn archive_category(&self, kind: TicketKind) -> ChannelId {
        match kind {
            TicketKind::Tournament => self.tourney_archive_category_id,
            TicketKind::PreTournament => self.pre_tourney_archive_category_id,
        }
    }

    /// Pipeline whose ACTIVE category is `category`, if any.
    pub fn kind_of_active_category(&self, category: ChannelId) -> Option<TicketKind> {
        if category == self.tourney_active_category_id {
            Some(TicketKind::Tournament)
        } else if category == self.pre_tourney_active_category_id {
            Some(TicketKind::PreTournament)
        } else {
            None
        }
    }

    /// Pipeline whose ARCHIVE category is `category`, if any.
    pub fn kind_of_archive_category(&self, category: ChannelId) -> Option<TicketKind> {
        if category == self.tourney_archive_category_id {
            Some(TicketKind::Tournament)
        } else if category == self.pre_tourney_archive_category_id {
            Some(TicketKind::PreTournament)
        } else {
            None
        }
    }

    /// True if `category` is any of the four ticket categories.
    pub fn is_ticket_category(&self, category: ChannelId) -> bool {
        self.kind_of_active_category(category).is_some()
            || self.kind_of_archive_category(category).is_some()
    }

    /// True if the role set includes any configured staff role.
    pub fn is_staff(&self, roles: &[RoleId]) -> bool {
        roles.iter().any(|role| self.staff_role_ids.contains(role))
    }
}

fn require_var(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()).into())
}

fn u64_var(name: &str) -> Result<u64, AppError> {
    let raw = require_var(name)?;
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar(name.to_string(), raw).into())
}

fn channel_id_var(name: &str) -> Result<ChannelId, AppError> {
    Ok(ChannelId::new(u64_var(name)?))
}

fn optional_u64_var(name: &str) -> Result<Option<u64>, AppError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar(name.to_string(), raw.clone()))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

/// Parses a comma-separated list of role ids, e.g. `STAFF_ROLE_IDS=1,2,3`.
fn role_id_list_var(name: &str) -> Result<Vec<RoleId>, AppError> {
    let raw = require_var(name)?;
    raw.split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .map(RoleId::new)
                .map_err(|_| ConfigError::InvalidEnvVar(name.to_string(), raw.clone()).into())
        })
        .collect()
}
