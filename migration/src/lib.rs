pub use sea_orm_migration::prelude::*;

mod m20261016_000001_create_boards;
mod m20261016_000002_create_payment_configs;
mod m20261016_000003_create_squares;
mod m20261016_000004_create_winners;
mod m20261016_000005_create_admin_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_boards::Migration),
            Box::new(m20261016_000002_create_payment_configs::Migration),
            Box::new(m20261016_000003_create_squares::Migration),
            Box::new(m20261016_000004_create_winners::Migration),
            Box::new(m20261016_000005_create_admin_settings::Migration),
        ]
    }
}
