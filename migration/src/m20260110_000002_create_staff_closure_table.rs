use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000001_create_tournament_session_table::TournamentSession;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffClosure::Table)
                    .if_not_exists()
                    .col(pk_auto(StaffClosure::Id))
                    .col(integer(StaffClosure::SessionId).not_null())
                    .col(string(StaffClosure::StaffId).not_null())
                    .col(string(StaffClosure::StaffName).not_null())
                    .col(integer(StaffClosure::Closures).default(0).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_closure_session_id")
                            .from(StaffClosure::Table, StaffClosure::SessionId)
                            .to(TournamentSession::Table, TournamentSession::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One counter row per staff member per session
        manager
            .create_index(
                Index::create()
                    .name("idx_staff_closure_unique")
                    .table(StaffClosure::Table)
                    .col(StaffClosure::SessionId)
                    .col(StaffClosure::StaffId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_staff_closure_unique")
                    .table(StaffClosure::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StaffClosure::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum StaffClosure {
    Table,
    Id,
    SessionId,
    StaffId,
    StaffName,
    Closures,
}
