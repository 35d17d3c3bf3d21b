//! Tournament session factory for creating test session entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tournament sessions with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::session::SessionFactory;
///
/// let session = SessionFactory::new(&db)
///     .status("finished")
///     .ticket_count(12)
///     .build()
///     .await?;
/// ```
pub struct SessionFactory<'a> {
    db: &'a DatabaseConnection,
    status: String,
    message_count: i64,
    ticket_count: i32,
    queue_current: i32,
    queue_peak: i32,
}

impl<'a> SessionFactory<'a> {
    /// Creates a new SessionFactory with default values.
    ///
    /// Defaults:
    /// - status: `"active"`
    /// - all counters: 0
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            status: "active".to_string(),
            message_count: 0,
            ticket_count: 0,
            queue_current: 0,
            queue_peak: 0,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn message_count(mut self, count: i64) -> Self {
        self.message_count = count;
        self
    }

    pub fn ticket_count(mut self, count: i32) -> Self {
        self.ticket_count = count;
        self
    }

    pub fn queue(mut self, current: i32, peak: i32) -> Self {
        self.queue_current = current;
        self.queue_peak = peak;
        self
    }

    /// Inserts the session into the database.
    pub async fn build(self) -> Result<entity::tournament_session::Model, DbErr> {
        entity::tournament_session::ActiveModel {
            status: ActiveValue::Set(self.status),
            started_at: ActiveValue::Set(Utc::now()),
            ended_at: ActiveValue::Set(None),
            message_count: ActiveValue::Set(self.message_count),
            ticket_count: ActiveValue::Set(self.ticket_count),
            queue_current: ActiveValue::Set(self.queue_current),
            queue_peak: ActiveValue::Set(self.queue_peak),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active tournament session with default values.
pub async fn create_active_session(
    db: &DatabaseConnection,
) -> Result<entity::tournament_session::Model, DbErr> {
    SessionFactory::new(db).build().await
}

/// Creates a finished tournament session with default values.
pub async fn create_finished_session(
    db: &DatabaseConnection,
) -> Result<entity::tournament_session::Model, DbErr> {
    SessionFactory::new(db).status("finished").build().await
}
