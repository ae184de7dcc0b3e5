use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Boards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Boards::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Boards::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Boards::GameId)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Boards::TeamHome)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Boards::TeamAway)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Boards::CostPerSquare)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Boards::PayoutQ1).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Boards::PayoutQ2).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Boards::PayoutQ3).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Boards::PayoutQ4).decimal_len(5, 2).not_null())
                    .col(
                        ColumnDef::new(Boards::Status)
                            .string_len(16)
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(Boards::IsFinalized)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // JSON arrays holding a permutation of 0-9, set on finalize
                    .col(ColumnDef::new(Boards::RowNumbers).text().null())
                    .col(ColumnDef::new(Boards::ColNumbers).text().null())
                    .col(
                        ColumnDef::new(Boards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(Boards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        // Status filter on the board listing
        manager
            .create_index(
                Index::create()
                    .name("idx_boards_status")
                    .table(Boards::Table)
                    .col(Boards::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Boards::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Boards {
    Table,
    Id,
    Name,
    GameId,
    TeamHome,
    TeamAway,
    CostPerSquare,
    PayoutQ1,
    PayoutQ2,
    PayoutQ3,
    PayoutQ4,
    Status,
    IsFinalized,
    RowNumbers,
    ColNumbers,
    CreatedAt,
    UpdatedAt,
}
