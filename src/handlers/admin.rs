//! Admin credential endpoints: setup, PIN verification and PIN reset

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::handlers::error::{json_body, map_pool_error, ApiError};
use crate::models::admin::{ResetPinRequest, SetupRequest, SetupStatusResponse, VerifyPinRequest};
use crate::models::common::MessageResponse;
use crate::services::admin_auth;
use crate::AppState;

/// GET /admin/setup
pub async fn setup_status(
    State(state): State<AppState>,
) -> Result<Json<SetupStatusResponse>, ApiError> {
    let setup_complete = admin_auth::is_setup_complete(&state.db)
        .await
        .map_err(|e| map_pool_error(e, "Failed to check setup status"))?;

    Ok(Json(SetupStatusResponse { setup_complete }))
}

/// POST /admin/setup
pub async fn complete_setup(
    State(state): State<AppState>,
    payload: Result<Json<SetupRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = json_body(payload)?;

    admin_auth::complete_setup(&state.db, &request.pin, &request.password)
        .await
        .map_err(|e| map_pool_error(e, "Failed to complete setup"))?;

    Ok(Json(MessageResponse::ok("Setup completed successfully")))
}

/// POST /admin/verify-pin
pub async fn verify_pin(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPinRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = json_body(payload)?;
    let pin = request.pin.unwrap_or_default();

    admin_auth::verify_pin(&state.db, &pin)
        .await
        .map_err(|e| map_pool_error(e, "Failed to verify PIN"))?;

    Ok(Json(MessageResponse::ok("PIN verified successfully")))
}

/// POST /admin/reset-pin
pub async fn reset_pin(
    State(state): State<AppState>,
    payload: Result<Json<ResetPinRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = json_body(payload)?;
    let password = request.password.unwrap_or_default();
    let new_pin = request.new_pin.unwrap_or_default();

    admin_auth::reset_pin(&state.db, &password, &new_pin)
        .await
        .map_err(|e| map_pool_error(e, "Failed to reset PIN"))?;

    Ok(Json(MessageResponse::ok("PIN reset successfully")))
}
