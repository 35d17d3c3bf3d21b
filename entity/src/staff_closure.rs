use sea_orm::entity::prelude::*;

/// Per-staff ticket closure counter scoped to one tournament session.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_closure")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub session_id: i32,
    /// Discord user ID (u64, stored as string).
    pub staff_id: String,
    /// Display name at the time of the most recent closure.
    pub staff_name: String,
    pub closures: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tournament_session::Entity",
        from = "Column::SessionId",
        to = "super::tournament_session::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TournamentSession,
}

impl Related<super::tournament_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TournamentSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
