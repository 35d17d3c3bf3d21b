use sea_orm::DatabaseConnection;

use crate::data::session::TournamentSessionRepository;
use crate::error::AppError;

/// Final statistics for a tournament run, produced when it ends.
pub struct SessionReport {
    pub session: entity::tournament_session::Model,
    pub top_staff: Vec<entity::staff_closure::Model>,
}

/// Session-scoped telemetry.
///
/// The `spawn_*` methods are fire-and-forget: they detach a task that resolves
/// the active session and applies the counter update, logging failures instead
/// of raising them. Ticket operations must never block or fail on telemetry.
pub struct SessionStatsService {
    db: DatabaseConnection,
}

impl SessionStatsService {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    /// Starts a new tournament session, ending any session still active.
    ///
    /// # Returns
    /// - `Ok(Model)` - The newly created active session
    pub async fn start_session(&self) -> Result<entity::tournament_session::Model, AppError> {
        let repo = TournamentSessionRepository::new(&self.db);

        if let Some(stale) = repo.get_active().await? {
            tracing::warn!("Ending stale active session {} before starting a new one", stale.id);
            repo.end(stale.id).await?;
        }

        repo.create().await
    }

    /// Ends the active session and assembles its final report.
    ///
    /// # Returns
    /// - `Ok(Some(SessionReport))` - The finished session with its staff leaderboard
    /// - `Ok(None)` - No session was active
    pub async fn end_session(&self) -> Result<Option<SessionReport>, AppError> {
        let repo = TournamentSessionRepository::new(&self.db);

        let Some(active) = repo.get_active().await? else {
            return Ok(None);
        };

        let top_staff = repo.top_staff_by_closures(active.id, 10).await?;
        let Some(session) = repo.end(active.id).await? else {
            return Ok(None);
        };

        Ok(Some(SessionReport { session, top_staff }))
    }

    /// Returns the active session's statistics without ending it.
    pub async fn active_report(&self) -> Result<Option<SessionReport>, AppError> {
        let repo = TournamentSessionRepository::new(&self.db);

        let Some(session) = repo.get_active().await? else {
            return Ok(None);
        };
        let top_staff = repo.top_staff_by_closures(session.id, 10).await?;

        Ok(Some(SessionReport { session, top_staff }))
    }

    /// Counts one guild message against the active session.
    pub fn spawn_message_count(&self) {
        let db = self.db.clone();
        tokio::spawn(async move {
            let repo = TournamentSessionRepository::new(&db);
            let result = async {
                if let Some(session) = repo.get_active().await? {
                    repo.increment_message_count(session.id).await?;
                }
                Ok::<(), AppError>(())
            }
            .await;

            if let Err(e) = result {
                tracing::warn!("Failed to record message count: {:?}", e);
            }
        });
    }

    /// Counts a newly opened (or reopened) ticket: ticket total and queue +1.
    ///
    /// Reopens pass `count_ticket = false` so the ticket total only counts
    /// distinct creations.
    pub fn spawn_ticket_opened(&self, count_ticket: bool) {
        let db = self.db.clone();
        tokio::spawn(async move {
            let repo = TournamentSessionRepository::new(&db);
            let result = async {
                if let Some(session) = repo.get_active().await? {
                    if count_ticket {
                        repo.increment_ticket_count(session.id).await?;
                    }
                    repo.increment_queue(session.id, 1).await?;
                }
                Ok::<(), AppError>(())
            }
            .await;

            if let Err(e) = result {
                tracing::warn!("Failed to record ticket open: {:?}", e);
            }
        });
    }

    /// Applies a bare queue-size delta with no other side effects.
    ///
    /// Used when a ticket leaves the queue outside the normal close flow,
    /// e.g. direct deletion of an open ticket.
    pub fn spawn_queue_delta(&self, delta: i32) {
        let db = self.db.clone();
        tokio::spawn(async move {
            let repo = TournamentSessionRepository::new(&db);
            let result = async {
                if let Some(session) = repo.get_active().await? {
                    repo.increment_queue(session.id, delta).await?;
                }
                Ok::<(), AppError>(())
            }
            .await;

            if let Err(e) = result {
                tracing::warn!("Failed to record queue change: {:?}", e);
            }
        });
    }

    /// Counts a ticket close: queue -1 plus the closing staff member's tally.
    pub fn spawn_ticket_closed(&self, staff_id: u64, staff_name: String) {
        let db = self.db.clone();
        tokio::spawn(async move {
            let repo = TournamentSessionRepository::new(&db);
            let result = async {
                if let Some(session) = repo.get_active().await? {
                    repo.increment_queue(session.id, -1).await?;
                    repo.record_staff_closure(session.id, &staff_id.to_string(), &staff_name)
                        .await?;
                }
                Ok::<(), AppError>(())
            }
            .await;

            if let Err(e) = result {
                tracing::warn!("Failed to record ticket close: {:?}", e);
            }
        });
    }
}
