//! Full export and restore of pool data

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, TransactionTrait,
};
use tracing::info;

use crate::entities::prelude::{AdminSettings, Boards, PaymentConfigs, Squares, Winners};
use crate::entities::{admin_settings, boards, payment_configs, squares, winners};
use crate::models::backup::{BackupData, BackupDocument, BACKUP_VERSION};
use crate::services::error::PoolError;

pub async fn export_backup(db: &DatabaseConnection) -> Result<BackupDocument, PoolError> {
    let (admin_settings, boards, squares, winners, payment_configs) = tokio::try_join!(
        AdminSettings::find().all(db),
        Boards::find().all(db),
        Squares::find().all(db),
        Winners::find().all(db),
        PaymentConfigs::find().all(db),
    )?;

    info!(
        boards = boards.len(),
        squares = squares.len(),
        winners = winners.len(),
        "Backup exported"
    );

    Ok(BackupDocument {
        version: Some(BACKUP_VERSION.to_string()),
        timestamp: Some(Utc::now()),
        data: Some(BackupData {
            admin_settings,
            boards,
            squares,
            winners,
            payment_configs,
        }),
    })
}

/// Replace all board data with the backup's contents in one transaction.
/// Admin settings are only replaced when the backup carries them.
pub async fn restore_backup(
    db: &DatabaseConnection,
    document: BackupDocument,
) -> Result<(), PoolError> {
    let data = document
        .data
        .ok_or_else(|| PoolError::Validation("Invalid backup format".to_string()))?;

    let txn = db.begin().await?;

    Squares::delete_many().exec(&txn).await?;
    Winners::delete_many().exec(&txn).await?;
    PaymentConfigs::delete_many().exec(&txn).await?;
    Boards::delete_many().exec(&txn).await?;

    // Parents before children
    if !data.boards.is_empty() {
        let rows = data
            .boards
            .iter()
            .cloned()
            .map(|m| m.into_active_model().reset_all());
        Boards::insert_many::<boards::ActiveModel, _>(rows)
            .exec_without_returning(&txn)
            .await?;
    }
    if !data.payment_configs.is_empty() {
        let rows = data
            .payment_configs
            .iter()
            .cloned()
            .map(|m| m.into_active_model().reset_all());
        PaymentConfigs::insert_many::<payment_configs::ActiveModel, _>(rows)
            .exec_without_returning(&txn)
            .await?;
    }
    if !data.squares.is_empty() {
        let rows = data
            .squares
            .iter()
            .cloned()
            .map(|m| m.into_active_model().reset_all());
        Squares::insert_many::<squares::ActiveModel, _>(rows)
            .exec_without_returning(&txn)
            .await?;
    }
    if !data.winners.is_empty() {
        let rows = data
            .winners
            .iter()
            .cloned()
            .map(|m| m.into_active_model().reset_all());
        Winners::insert_many::<winners::ActiveModel, _>(rows)
            .exec_without_returning(&txn)
            .await?;
    }
    if !data.admin_settings.is_empty() {
        AdminSettings::delete_many().exec(&txn).await?;
        let rows = data
            .admin_settings
            .iter()
            .cloned()
            .map(|m| m.into_active_model().reset_all());
        AdminSettings::insert_many::<admin_settings::ActiveModel, _>(rows)
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;

    info!(
        boards = data.boards.len(),
        squares = data.squares.len(),
        winners = data.winners.len(),
        payment_configs = data.payment_configs.len(),
        admin_settings_restored = !data.admin_settings.is_empty(),
        "Backup restored"
    );

    Ok(())
}
