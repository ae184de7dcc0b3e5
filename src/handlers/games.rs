//! Game endpoints, proxied to the scoreboard gateway

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::handlers::error::{error_response, ApiError};
use crate::models::game::{GameListResponse, GameResponse};
use crate::AppState;

/// GET /games: upcoming games. An upstream outage shows up as an empty list.
pub async fn list_games(State(state): State<AppState>) -> Json<GameListResponse> {
    let games = state.games.upcoming_games().await;
    Json(GameListResponse { games })
}

/// GET /games/{id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    match state.games.game(&game_id).await {
        Some(game) => Ok(Json(GameResponse { game })),
        None => Err(error_response(StatusCode::NOT_FOUND, "Game not found")),
    }
}
