use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{admin, backup, boards, games, health, squares, winners};
use crate::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        // Boards
        .route("/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/boards/{id}",
            get(boards::get_board)
                .patch(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/boards/{id}/finalize", post(boards::finalize_board))
        .route("/boards/{id}/archive", post(boards::archive_board))
        .route("/boards/{id}/display", get(boards::board_display))
        // Squares
        .route("/squares", post(squares::claim_square))
        .route(
            "/squares/{id}",
            patch(squares::update_square).delete(squares::delete_square),
        )
        // Winners
        .route("/winners", post(winners::record_winner))
        // Games
        .route("/games", get(games::list_games))
        .route("/games/{id}", get(games::get_game))
        // Admin
        .route(
            "/admin/setup",
            get(admin::setup_status).post(admin::complete_setup),
        )
        .route("/admin/verify-pin", post(admin::verify_pin))
        .route("/admin/reset-pin", post(admin::reset_pin))
        // Backup
        .route(
            "/backup",
            get(backup::export_backup).post(backup::restore_backup),
        )
}

/// The full application: every endpoint at the root and again under `/api`
pub fn app_router(state: AppState) -> Router {
    let api = api_routes();

    Router::new()
        .route("/health", get(health::health))
        .merge(api.clone())
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
