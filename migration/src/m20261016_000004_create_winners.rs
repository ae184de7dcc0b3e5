use sea_orm_migration::prelude::*;

use super::m20261016_000001_create_boards::Boards;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Winners::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Winners::BoardId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Winners::Quarter).small_integer().not_null())
                    .col(ColumnDef::new(Winners::PlayerName).string_len(255).not_null())
                    .col(ColumnDef::new(Winners::ScoreHome).integer().not_null())
                    .col(ColumnDef::new(Winners::ScoreAway).integer().not_null())
                    .col(ColumnDef::new(Winners::Payout).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Winners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(Winners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_board_id")
                            .from(Winners::Table, Winners::BoardId)
                            .to(Boards::Table, Boards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one winner per quarter; recording again overwrites
        manager
            .create_index(
                Index::create()
                    .name("idx_winners_board_quarter")
                    .table(Winners::Table)
                    .col(Winners::BoardId)
                    .col(Winners::Quarter)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Winners::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Winners {
    Table,
    Id,
    BoardId,
    Quarter,
    PlayerName,
    ScoreHome,
    ScoreAway,
    Payout,
    CreatedAt,
    UpdatedAt,
}
