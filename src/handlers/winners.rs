use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::handlers::error::{json_body, map_pool_error, ApiError};
use crate::models::winner::{RecordWinnerRequest, WinnerResponse};
use crate::services::winners;
use crate::AppState;

/// POST /winners: record (or overwrite) the winner of one quarter
pub async fn record_winner(
    State(state): State<AppState>,
    payload: Result<Json<RecordWinnerRequest>, JsonRejection>,
) -> Result<Json<WinnerResponse>, ApiError> {
    let request = json_body(payload)?;
    info!(
        board_id = %request.board_id,
        quarter = request.quarter,
        score_home = request.score_home,
        score_away = request.score_away,
        "Record winner request received"
    );

    let winner = winners::record_winner(&state.db, request)
        .await
        .map_err(|e| map_pool_error(e, "Failed to record winner"))?;

    Ok(Json(WinnerResponse { winner }))
}
