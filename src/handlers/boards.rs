//! Board endpoints
//!
//! - `GET /boards` (`?status=open,closed`), `POST /boards`
//! - `GET/PATCH/DELETE /boards/{id}`
//! - `POST /boards/{id}/finalize`, `POST /boards/{id}/archive`
//! - `GET /boards/{id}/display`

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use tracing::info;

use crate::handlers::error::{json_body, map_pool_error, ApiError};
use crate::models::board::{
    BoardListQuery, BoardListResponse, BoardResponse, CreateBoardRequest, UpdateBoardRequest,
};
use crate::models::common::MessageResponse;
use crate::models::display::BoardDisplayResponse;
use crate::services::{boards, display};
use crate::AppState;

pub async fn list_boards(
    State(state): State<AppState>,
    Query(query): Query<BoardListQuery>,
) -> Result<Json<BoardListResponse>, ApiError> {
    let statuses = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(boards::parse_status_filter)
        .transpose()
        .map_err(|e| map_pool_error(e, "Failed to fetch boards"))?;

    let boards = boards::list_boards(&state.db, statuses)
        .await
        .map_err(|e| map_pool_error(e, "Failed to fetch boards"))?;

    Ok(Json(BoardListResponse { boards }))
}

pub async fn create_board(
    State(state): State<AppState>,
    payload: Result<Json<CreateBoardRequest>, JsonRejection>,
) -> Result<Json<BoardResponse>, ApiError> {
    let request = json_body(payload)?;
    info!(name = %request.name, game_id = ?request.game_id, "Create board request received");

    let board = boards::create_board(&state.db, request)
        .await
        .map_err(|e| map_pool_error(e, "Failed to create board"))?;

    Ok(Json(BoardResponse { board }))
}

pub async fn get_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardResponse>, ApiError> {
    let board = boards::get_board(&state.db, &board_id)
        .await
        .map_err(|e| map_pool_error(e, "Failed to fetch board"))?;

    Ok(Json(BoardResponse { board }))
}

pub async fn update_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    payload: Result<Json<UpdateBoardRequest>, JsonRejection>,
) -> Result<Json<BoardResponse>, ApiError> {
    let request = json_body(payload)?;

    let board = boards::update_board(&state.db, &board_id, request)
        .await
        .map_err(|e| map_pool_error(e, "Failed to update board"))?;

    Ok(Json(BoardResponse { board }))
}

pub async fn delete_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    boards::delete_board(&state.db, &board_id)
        .await
        .map_err(|e| map_pool_error(e, "Failed to delete board"))?;

    Ok(Json(MessageResponse::ok("Board deleted successfully")))
}

pub async fn finalize_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardResponse>, ApiError> {
    info!(board_id = %board_id, "Finalize board request received");

    let board = boards::finalize_board(&state.db, &board_id)
        .await
        .map_err(|e| map_pool_error(e, "Failed to finalize board"))?;

    Ok(Json(BoardResponse { board }))
}

pub async fn archive_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardResponse>, ApiError> {
    let board = boards::archive_board(&state.db, &board_id)
        .await
        .map_err(|e| map_pool_error(e, "Failed to archive board"))?;

    Ok(Json(BoardResponse { board }))
}

pub async fn board_display(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardDisplayResponse>, ApiError> {
    let display = display::board_display(&state.db, state.games.as_ref(), &board_id)
        .await
        .map_err(|e| map_pool_error(e, "Failed to build board display"))?;

    Ok(Json(BoardDisplayResponse { display }))
}
