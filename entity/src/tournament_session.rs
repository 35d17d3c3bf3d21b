use sea_orm::entity::prelude::*;

/// One tournament run, from `!starttourney` to `!endtourney`.
///
/// Aggregate counters are mutated fire-and-forget while the run is active;
/// `queue_peak` is the high-water mark of `queue_current`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tournament_session")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// "active" or "finished".
    pub status: String,
    pub started_at: DateTimeUtc,
    pub ended_at: Option<DateTimeUtc>,
    pub message_count: i64,
    pub ticket_count: i32,
    pub queue_current: i32,
    pub queue_peak: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::staff_closure::Entity")]
    StaffClosure,
}

impl Related<super::staff_closure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffClosure.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
