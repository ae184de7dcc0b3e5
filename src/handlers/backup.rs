use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::handlers::error::{json_body, map_pool_error, ApiError};
use crate::models::backup::BackupDocument;
use crate::models::common::MessageResponse;
use crate::services::backup;
use crate::AppState;

/// GET /backup: full export
pub async fn export_backup(
    State(state): State<AppState>,
) -> Result<Json<BackupDocument>, ApiError> {
    let document = backup::export_backup(&state.db)
        .await
        .map_err(|e| map_pool_error(e, "Failed to create backup"))?;

    Ok(Json(document))
}

/// POST /backup: replace all data with the posted document
pub async fn restore_backup(
    State(state): State<AppState>,
    payload: Result<Json<BackupDocument>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let document = json_body(payload)?;

    backup::restore_backup(&state.db, document)
        .await
        .map_err(|e| map_pool_error(e, "Failed to restore backup"))?;

    Ok(Json(MessageResponse::ok("Backup restored successfully")))
}
