use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    ExprTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::error::AppError;
use entity::prelude::{StaffClosure, TournamentSession};
use entity::{staff_closure, tournament_session};

/// Session status stored in the database.
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_FINISHED: &str = "finished";

/// Repository for tournament session records and their per-staff closure
/// counters.
pub struct TournamentSessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TournamentSessionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new active session starting now.
    ///
    /// Callers are responsible for ending any previous active session first;
    /// the repository does not enforce exclusivity.
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted session record
    pub async fn create(&self) -> Result<tournament_session::Model, AppError> {
        let session = tournament_session::ActiveModel {
            status: ActiveValue::Set(STATUS_ACTIVE.to_string()),
            started_at: ActiveValue::Set(Utc::now()),
            ended_at: ActiveValue::Set(None),
            message_count: ActiveValue::Set(0),
            ticket_count: ActiveValue::Set(0),
            queue_current: ActiveValue::Set(0),
            queue_peak: ActiveValue::Set(0),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(session)
    }

    /// Finds the currently active session, if any.
    pub async fn get_active(&self) -> Result<Option<tournament_session::Model>, AppError> {
        let session = TournamentSession::find()
            .filter(tournament_session::Column::Status.eq(STATUS_ACTIVE))
            .one(self.db)
            .await?;

        Ok(session)
    }

    /// Marks a session finished, stamping its end time.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - The updated session record
    /// - `Ok(None)` - No session with that id exists
    pub async fn end(&self, id: i32) -> Result<Option<tournament_session::Model>, AppError> {
        let Some(session) = TournamentSession::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = session.into_active_model();
        active.status = ActiveValue::Set(STATUS_FINISHED.to_string());
        active.ended_at = ActiveValue::Set(Some(Utc::now()));
        let updated = active.update(self.db).await?;

        Ok(Some(updated))
    }

    /// Adds one to the session's message counter.
    pub async fn increment_message_count(&self, id: i32) -> Result<(), AppError> {
        TournamentSession::update_many()
            .col_expr(
                tournament_session::Column::MessageCount,
                Expr::col(tournament_session::Column::MessageCount).add(1),
            )
            .filter(tournament_session::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Adds one to the session's ticket counter.
    pub async fn increment_ticket_count(&self, id: i32) -> Result<(), AppError> {
        TournamentSession::update_many()
            .col_expr(
                tournament_session::Column::TicketCount,
                Expr::col(tournament_session::Column::TicketCount).add(1),
            )
            .filter(tournament_session::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Applies `delta` to the session's current queue size.
    ///
    /// The current size is clamped at zero and the peak high-water mark is
    /// raised in the same transaction, so the peak can never lag behind an
    /// observed current value.
    pub async fn increment_queue(&self, id: i32, delta: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        if let Some(session) = TournamentSession::find_by_id(id).one(&txn).await? {
            let current = Ord::max(session.queue_current + delta, 0);
            let peak = Ord::max(session.queue_peak, current);

            let mut active = session.into_active_model();
            active.queue_current = ActiveValue::Set(current);
            active.queue_peak = ActiveValue::Set(peak);
            active.update(&txn).await?;
        }

        txn.commit().await?;

        Ok(())
    }

    /// Upserts a staff member's closure counter for a session.
    ///
    /// Creates the row with a count of 1 on first closure, otherwise adds one
    /// and refreshes the stored display name.
    pub async fn record_staff_closure(
        &self,
        session_id: i32,
        staff_id: &str,
        staff_name: &str,
    ) -> Result<(), AppError> {
        let existing = StaffClosure::find()
            .filter(staff_closure::Column::SessionId.eq(session_id))
            .filter(staff_closure::Column::StaffId.eq(staff_id))
            .one(self.db)
            .await?;

        match existing {
            Some(row) => {
                let closures = row.closures + 1;
                let mut active = row.into_active_model();
                active.closures = ActiveValue::Set(closures);
                active.staff_name = ActiveValue::Set(staff_name.to_string());
                active.update(self.db).await?;
            }
            None => {
                staff_closure::ActiveModel {
                    session_id: ActiveValue::Set(session_id),
                    staff_id: ActiveValue::Set(staff_id.to_string()),
                    staff_name: ActiveValue::Set(staff_name.to_string()),
                    closures: ActiveValue::Set(1),
                    ..Default::default()
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(())
    }

    /// Lists the staff with the most closures in a session, descending.
    pub async fn top_staff_by_closures(
        &self,
        session_id: i32,
        limit: u64,
    ) -> Result<Vec<staff_closure::Model>, AppError> {
        let rows = StaffClosure::find()
            .filter(staff_closure::Column::SessionId.eq(session_id))
            .order_by_desc(staff_closure::Column::Closures)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(rows)
    }
}
