use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TournamentSession::Table)
                    .if_not_exists()
                    .col(pk_auto(TournamentSession::Id))
                    .col(string(TournamentSession::Status).not_null())
                    .col(
                        timestamp(TournamentSession::StartedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(TournamentSession::EndedAt))
                    .col(big_integer(TournamentSession::MessageCount).default(0).not_null())
                    .col(integer(TournamentSession::TicketCount).default(0).not_null())
                    .col(integer(TournamentSession::QueueCurrent).default(0).not_null())
                    .col(integer(TournamentSession::QueuePeak).default(0).not_null())
                    .to_owned(),
            )
            .await?;

        // Index for the frequent "find the active session" lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_tournament_session_status")
                    .table(TournamentSession::Table)
                    .col(TournamentSession::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tournament_session_status")
                    .table(TournamentSession::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TournamentSession::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TournamentSession {
    Table,
    Id,
    Status,
    StartedAt,
    EndedAt,
    MessageCount,
    TicketCount,
    QueueCurrent,
    QueuePeak,
}
