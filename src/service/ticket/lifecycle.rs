use chrono::Utc;
use serenity::all::{
    ChannelId, ChannelType, CreateChannel, CreateMessage, EditChannel, GuildChannel, Http,
    PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, User, UserId,
};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ticket::TicketError, AppError};
use crate::model::ticket::{
    closed_channel_name, reopened_channel_name, ticket_channel_name, TicketKind, TicketMetadata,
};
use crate::service::session::SessionStatsService;
use crate::service::ticket::capacity::{
    check_admission, eviction_count, spawn_capacity_alert, Admission, HARD_CAPACITY,
};
use crate::service::ticket::transcript::TranscriptArchiver;
use crate::state::{lock, AppState};

/// Pause between archive evictions, to stay under the platform's rate limits.
const EVICTION_PAUSE_MS: u64 = 1500;

/// How long a locked channel stays locked before it reopens itself.
pub const LOCK_DURATION_HOURS: u64 = 6;

/// State machine for ticket channels.
///
/// A ticket is `Open` while its channel sits in an active category and
/// `Closed` while it sits in the paired archive category; the category is the
/// source of truth, the name glyph is cosmetic. Category moves and permission
/// edits are awaited on the critical path; renames and telemetry are detached.
pub struct TicketLifecycleService {
    state: Arc<AppState>,
    http: Arc<Http>,
}

impl TicketLifecycleService {
    pub fn new(state: Arc<AppState>, http: Arc<Http>) -> Self {
        Self { state, http }
    }

    fn archiver(&self) -> TranscriptArchiver {
        TranscriptArchiver::new(self.http.clone(), self.state.config.log_channel_id)
    }

    /// Lists the channels currently under `category`.
    pub async fn category_channels(
        &self,
        category: ChannelId,
    ) -> Result<Vec<GuildChannel>, AppError> {
        let channels = self.state.config.guild_id.channels(&self.http).await?;
        Ok(channels
            .into_values()
            .filter(|channel| channel.parent_id == Some(category))
            .collect())
    }

    /// Creates a new ticket channel for `opener`.
    ///
    /// Runs the rate-limit and capacity gates, allocates the next ticket
    /// number, and creates the channel at the top of the active category with
    /// visibility restricted to the opener and staff. The identity metadata
    /// is written into the channel topic so it survives renames.
    ///
    /// # Arguments
    /// - `kind` - Which pipeline the ticket belongs to
    /// - `opener` - The user opening the ticket
    /// - `metadata` - Identity metadata captured from the modal
    ///
    /// # Returns
    /// - `Ok(GuildChannel)` - The created ticket channel
    /// - `Err(AppError::TicketErr)` - Gate rejection with a user-facing message
    pub async fn create(
        &self,
        kind: TicketKind,
        opener: &User,
        metadata: TicketMetadata,
    ) -> Result<GuildChannel, AppError> {
        lock(&self.state.rate_limiter)?.check(opener.id, Utc::now())?;

        let active_category = self.state.config.active_category(kind);
        let size = self.category_channels(active_category).await?.len();
        match check_admission(size) {
            Admission::Deny => {
                self.alert_capacity(kind, size);
                return Err(TicketError::CategoryFull {
                    count: size,
                    max: HARD_CAPACITY,
                }
                .into());
            }
            Admission::AllowWithWarning => self.alert_capacity(kind, size),
            Admission::Allow => {}
        }

        let number = lock(&self.state.counters)?.for_kind(kind).take();

        let overwrites = self.ticket_overwrites(opener.id);
        let builder = CreateChannel::new(ticket_channel_name(number))
            .kind(ChannelType::Text)
            .category(active_category)
            .topic(metadata.encode_topic())
            .permissions(overwrites)
            .position(0);

        let channel = self
            .state
            .config
            .guild_id
            .create_channel(&self.http, builder)
            .await?;

        lock(&self.state.rate_limiter)?.register(opener.id, channel.id, Utc::now());
        SessionStatsService::new(&self.state.db).spawn_ticket_opened(true);

        tracing::info!(
            "Created {} ticket #{} for {} ({})",
            kind.label(),
            number,
            opener.name,
            opener.id
        );

        Ok(channel)
    }

    /// Closes an open ticket.
    ///
    /// Evicts the oldest archived tickets first if the archive category is
    /// near capacity, then moves the channel, frees the opener's rate-limit
    /// slot, and revokes the opener's send permission (unless the opener is
    /// staff). The glyph rename is dispatched in the background.
    pub async fn close(&self, channel: &GuildChannel, staff: &User) -> Result<(), AppError> {
        let kind = channel
            .parent_id
            .and_then(|parent| self.state.config.kind_of_active_category(parent))
            .ok_or(TicketError::NotActiveTicket)?;

        let archive_category = self.state.config.archive_category(kind);
        self.evict_for_room(archive_category).await?;

        channel
            .id
            .edit(&self.http, EditChannel::new().category(Some(archive_category)))
            .await?;

        let metadata = channel
            .topic
            .as_deref()
            .map(TicketMetadata::parse_topic)
            .unwrap_or_default();

        if let Some(opener) = metadata.opener {
            lock(&self.state.rate_limiter)?.unregister(opener, channel.id);
        }

        self.cancel_lock_timer(channel.id)?;
        self.spawn_rename(channel.id, closed_channel_name(&channel.name));

        if let Some(opener) = metadata.opener {
            if !self.is_staff_member(opener).await {
                channel
                    .id
                    .create_permission(
                        &self.http,
                        PermissionOverwrite {
                            allow: Permissions::VIEW_CHANNEL,
                            deny: Permissions::SEND_MESSAGES,
                            kind: PermissionOverwriteType::Member(opener),
                        },
                    )
                    .await?;
            }
        }

        SessionStatsService::new(&self.state.db)
            .spawn_ticket_closed(staff.id.get(), staff.name.clone());

        tracing::info!("Closed ticket {} ({})", channel.name, channel.id);

        Ok(())
    }

    /// Reopens a closed ticket.
    ///
    /// Refused outright when the active category is at the hard ceiling;
    /// reopening never evicts. Restores the opener's send permission, cancels
    /// any pending lock timer, and re-registers the opener with the rate
    /// limiter.
    pub async fn reopen(&self, channel: &GuildChannel) -> Result<(), AppError> {
        let kind = channel
            .parent_id
            .and_then(|parent| self.state.config.kind_of_archive_category(parent))
            .ok_or(TicketError::NotClosedTicket)?;

        let active_category = self.state.config.active_category(kind);
        let size = self.category_channels(active_category).await?.len();
        if size >= HARD_CAPACITY {
            return Err(TicketError::ReopenCategoryFull {
                count: size,
                max: HARD_CAPACITY,
            }
            .into());
        }

        self.cancel_lock_timer(channel.id)?;

        channel
            .id
            .edit(
                &self.http,
                EditChannel::new().category(Some(active_category)).position(0),
            )
            .await?;

        let metadata = channel
            .topic
            .as_deref()
            .map(TicketMetadata::parse_topic)
            .unwrap_or_default();

        if let Some(opener) = metadata.opener {
            channel
                .id
                .create_permission(
                    &self.http,
                    PermissionOverwrite {
                        allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
                        deny: Permissions::empty(),
                        kind: PermissionOverwriteType::Member(opener),
                    },
                )
                .await?;
            lock(&self.state.rate_limiter)?.register(opener, channel.id, Utc::now());
        }

        self.spawn_rename(channel.id, reopened_channel_name(&channel.name));
        SessionStatsService::new(&self.state.db).spawn_ticket_opened(false);

        tracing::info!("Reopened ticket {} ({})", channel.name, channel.id);

        Ok(())
    }

    /// Archives and irrevocably deletes a ticket, open or closed.
    ///
    /// The transcript is built and delivered before the delete call is
    /// issued, so it always reflects the channel's final history.
    pub async fn delete(&self, channel: &GuildChannel, actor_name: &str) -> Result<(), AppError> {
        let parent = channel.parent_id.ok_or(TicketError::NotTicketChannel)?;
        if !self.state.config.is_ticket_category(parent) {
            return Err(TicketError::NotTicketChannel.into());
        }
        let was_open = self.state.config.kind_of_active_category(parent).is_some();

        self.archiver().archive_and_delete(channel, actor_name).await?;

        let metadata = channel
            .topic
            .as_deref()
            .map(TicketMetadata::parse_topic)
            .unwrap_or_default();
        if let Some(opener) = metadata.opener {
            lock(&self.state.rate_limiter)?.unregister(opener, channel.id);
        }
        self.cancel_lock_timer(channel.id)?;

        if was_open {
            SessionStatsService::new(&self.state.db).spawn_queue_delta(-1);
        }

        tracing::info!("Deleted ticket {} ({})", channel.name, channel.id);

        Ok(())
    }

    /// Hides the general ticket channel from members and arms the six-hour
    /// auto-reopen timer.
    ///
    /// Locking again while a timer is pending restarts the countdown.
    pub async fn lock_general_channel(&self) -> Result<(), AppError> {
        let channel = self.state.config.general_ticket_channel_id;

        channel
            .create_permission(
                &self.http,
                PermissionOverwrite {
                    allow: Permissions::empty(),
                    deny: Permissions::VIEW_CHANNEL,
                    kind: PermissionOverwriteType::Role(self.member_role()),
                },
            )
            .await?;

        self.schedule_unlock(channel)?;

        tracing::info!("Locked general ticket channel {}", channel);

        Ok(())
    }

    /// Hides the general ticket channel for the duration of a tournament.
    ///
    /// Unlike [`lock_general_channel`](Self::lock_general_channel) no timer
    /// is armed; a pending one is cancelled so it cannot reopen the channel
    /// mid-tournament.
    pub async fn hide_general_channel(&self) -> Result<(), AppError> {
        let channel = self.state.config.general_ticket_channel_id;

        self.cancel_lock_timer(channel)?;

        channel
            .create_permission(
                &self.http,
                PermissionOverwrite {
                    allow: Permissions::empty(),
                    deny: Permissions::VIEW_CHANNEL,
                    kind: PermissionOverwriteType::Role(self.member_role()),
                },
            )
            .await?;

        Ok(())
    }

    /// Restores member visibility of the general ticket channel and cancels
    /// any pending auto-reopen timer.
    pub async fn unlock_general_channel(&self) -> Result<(), AppError> {
        let channel = self.state.config.general_ticket_channel_id;

        self.cancel_lock_timer(channel)?;

        channel
            .create_permission(
                &self.http,
                PermissionOverwrite {
                    allow: Permissions::VIEW_CHANNEL,
                    deny: Permissions::empty(),
                    kind: PermissionOverwriteType::Role(self.member_role()),
                },
            )
            .await?;

        tracing::info!("Unlocked general ticket channel {}", channel);

        Ok(())
    }

    /// Role whose visibility the channel lock toggles: the configured member
    /// role, or @everyone when none is configured.
    fn member_role(&self) -> RoleId {
        self.state
            .config
            .member_role_id
            .unwrap_or_else(|| RoleId::new(self.state.config.guild_id.get()))
    }

    /// Replaces any pending auto-reopen timer for `channel` with a fresh one.
    fn schedule_unlock(&self, channel: ChannelId) -> Result<(), AppError> {
        let state = self.state.clone();
        let http = self.http.clone();
        let role = self.member_role();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(LOCK_DURATION_HOURS * 3600)).await;

            let overwrite = PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(role),
            };
            if let Err(e) = channel.create_permission(&http, overwrite).await {
                tracing::error!("Failed to auto-reopen channel {}: {:?}", channel, e);
                return;
            }

            let notice =
                CreateMessage::new().content("🔓 This channel has been reopened automatically.");
            if let Err(e) = channel.send_message(&http, notice).await {
                tracing::warn!("Failed to announce reopen in {}: {:?}", channel, e);
            }

            if let Ok(mut tasks) = state.lock_tasks.lock() {
                tasks.remove(&channel);
            }
        });

        if let Some(previous) = lock(&self.state.lock_tasks)?.insert(channel, handle) {
            previous.abort();
        }

        Ok(())
    }

    /// Archives and deletes every ticket in both of `kind`'s categories.
    ///
    /// Used by the tournament start/end teardown. Best-effort per ticket with
    /// the usual eviction pause between deletions.
    ///
    /// # Returns
    /// - `Ok(usize)` - How many tickets were successfully archived and deleted
    pub async fn archive_all(&self, kind: TicketKind, actor_name: &str) -> Result<usize, AppError> {
        let mut deleted = 0;

        for category in [
            self.state.config.active_category(kind),
            self.state.config.archive_category(kind),
        ] {
            let mut tickets = self.category_channels(category).await?;
            tickets.sort_by_key(|channel| channel.id.get());

            for ticket in &tickets {
                match self.delete(ticket, actor_name).await {
                    Ok(()) => deleted += 1,
                    Err(e) => {
                        tracing::error!("Failed to archive ticket {}: {:?}", ticket.name, e)
                    }
                }
                tokio::time::sleep(Duration::from_millis(EVICTION_PAUSE_MS)).await;
            }
        }

        Ok(deleted)
    }

    /// Aborts and forgets the pending unlock timer for `channel`, if any.
    fn cancel_lock_timer(&self, channel: ChannelId) -> Result<(), AppError> {
        if let Some(handle) = lock(&self.state.lock_tasks)?.remove(&channel) {
            handle.abort();
        }
        Ok(())
    }

    /// Evicts the oldest archived tickets until `archive_category` has room
    /// for one more channel.
    ///
    /// Eviction runs full archival on each victim; a failure for one ticket
    /// is logged and the loop continues with the next. A pause between
    /// deletions keeps the loop inside the platform's rate limits.
    async fn evict_for_room(&self, archive_category: ChannelId) -> Result<(), AppError> {
        let mut archived = self.category_channels(archive_category).await?;
        let to_evict = eviction_count(archived.len());
        if to_evict == 0 {
            return Ok(());
        }

        tracing::warn!(
            "Archive category {} has {} channels; evicting {} oldest",
            archive_category,
            archived.len(),
            to_evict
        );

        // Snowflake ids are monotonic, so id order is creation order
        archived.sort_by_key(|channel| channel.id.get());
        let archiver = self.archiver();

        for victim in archived.iter().take(to_evict) {
            if let Err(e) = archiver
                .archive_and_delete(victim, "Auto-eviction (archive full)")
                .await
            {
                tracing::error!("Failed to evict ticket {}: {:?}", victim.name, e);
            }
            tokio::time::sleep(Duration::from_millis(EVICTION_PAUSE_MS)).await;
        }

        Ok(())
    }

    /// Permission overwrites for a fresh ticket: hidden from everyone,
    /// visible and writable for the opener, fully manageable for staff.
    fn ticket_overwrites(&self, opener: UserId) -> Vec<PermissionOverwrite> {
        let everyone = RoleId::new(self.state.config.guild_id.get());

        let mut overwrites = vec![
            PermissionOverwrite {
                allow: Permissions::empty(),
                deny: Permissions::VIEW_CHANNEL,
                kind: PermissionOverwriteType::Role(everyone),
            },
            PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::READ_MESSAGE_HISTORY,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(opener),
            },
        ];

        for role in &self.state.config.staff_role_ids {
            overwrites.push(PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::READ_MESSAGE_HISTORY
                    | Permissions::MANAGE_CHANNELS
                    | Permissions::MANAGE_MESSAGES,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(*role),
            });
        }

        overwrites
    }

    /// Whether `user` holds a staff role, checked against the live member
    /// record. Lookup failures count as not-staff.
    async fn is_staff_member(&self, user: UserId) -> bool {
        match self.state.config.guild_id.member(&self.http, user).await {
            Ok(member) => self.state.config.is_staff(&member.roles),
            Err(_) => false,
        }
    }

    /// Fire-and-forget channel rename; failures are logged, never surfaced.
    fn spawn_rename(&self, channel: ChannelId, name: String) {
        let http = self.http.clone();
        tokio::spawn(async move {
            if let Err(e) = channel.edit(&http, EditChannel::new().name(name.as_str())).await {
                tracing::warn!("Failed to rename channel {} to {}: {:?}", channel, name, e);
            }
        });
    }

    /// Dispatches a capacity alert for `kind`'s active category.
    fn alert_capacity(&self, kind: TicketKind, size: usize) {
        spawn_capacity_alert(
            self.http.clone(),
            self.state.config.admin_alert_channel_id,
            self.state.config.admin_alert_role_id,
            format!("{} Tickets", kind.label()),
            size,
        );
    }
}
