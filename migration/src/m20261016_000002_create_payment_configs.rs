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
                    .table(PaymentConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentConfigs::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentConfigs::BoardId)
                            .string_len(36)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentConfigs::AllowPaypal)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PaymentConfigs::AllowVenmo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PaymentConfigs::AllowCash)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(PaymentConfigs::PaypalUsername).string_len(128).null())
                    .col(ColumnDef::new(PaymentConfigs::VenmoUsername).string_len(128).null())
                    // Declared inline so SQLite gets the constraint too
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_configs_board_id")
                            .from(PaymentConfigs::Table, PaymentConfigs::BoardId)
                            .to(Boards::Table, Boards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentConfigs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PaymentConfigs {
    Table,
    Id,
    BoardId,
    AllowPaypal,
    AllowVenmo,
    AllowCash,
    PaypalUsername,
    VenmoUsername,
}
