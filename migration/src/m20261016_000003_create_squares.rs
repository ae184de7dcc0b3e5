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
                    .table(Squares::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Squares::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Squares::BoardId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Squares::Row).small_integer().not_null())
                    .col(ColumnDef::new(Squares::Col).small_integer().not_null())
                    .col(ColumnDef::new(Squares::PlayerName).string_len(255).null())
                    .col(ColumnDef::new(Squares::PaymentMethod).string_len(16).null())
                    .col(
                        ColumnDef::new(Squares::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Squares::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_squares_board_id")
                            .from(Squares::Table, Squares::BoardId)
                            .to(Boards::Table, Boards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One claim per cell. Concurrent claims for the same cell are
        // serialized here; the loser gets a unique violation.
        manager
            .create_index(
                Index::create()
                    .name("idx_squares_board_row_col")
                    .table(Squares::Table)
                    .col(Squares::BoardId)
                    .col(Squares::Row)
                    .col(Squares::Col)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Squares::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Squares {
    Table,
    Id,
    BoardId,
    Row,
    Col,
    PlayerName,
    PaymentMethod,
    IsPaid,
    CreatedAt,
}
