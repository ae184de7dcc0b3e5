//! Square endpoints: `POST /squares` (claim, 409 when taken),
//! `PATCH/DELETE /squares/{id}`

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::handlers::error::{json_body, map_pool_error, ApiError};
use crate::models::common::MessageResponse;
use crate::models::square::{ClaimSquareRequest, SquareResponse, UpdateSquareRequest};
use crate::services::squares;
use crate::AppState;

pub async fn claim_square(
    State(state): State<AppState>,
    payload: Result<Json<ClaimSquareRequest>, JsonRejection>,
) -> Result<Json<SquareResponse>, ApiError> {
    let request = json_body(payload)?;

    let square = squares::claim_square(&state.db, request)
        .await
        .map_err(|e| map_pool_error(e, "Failed to claim square"))?;

    Ok(Json(SquareResponse { square }))
}

pub async fn update_square(
    State(state): State<AppState>,
    Path(square_id): Path<String>,
    payload: Result<Json<UpdateSquareRequest>, JsonRejection>,
) -> Result<Json<SquareResponse>, ApiError> {
    let request = json_body(payload)?;

    let square = squares::update_square(&state.db, &square_id, request)
        .await
        .map_err(|e| map_pool_error(e, "Failed to update square"))?;

    Ok(Json(SquareResponse { square }))
}

pub async fn delete_square(
    State(state): State<AppState>,
    Path(square_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    squares::delete_square(&state.db, &square_id)
        .await
        .map_err(|e| map_pool_error(e, "Failed to delete square"))?;

    Ok(Json(MessageResponse::ok("Square deleted successfully")))
}
