//! Translation of service errors into `{ error }` responses

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use tracing::error;

use crate::models::common::ErrorResponse;
use crate::services::error::PoolError;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a service error to a status code. Storage and internal failures are
/// logged and reported with the generic `fallback` message only.
pub fn map_pool_error(err: PoolError, fallback: &str) -> ApiError {
    match err {
        PoolError::Validation(msg) | PoolError::StateConflict(msg) => {
            error_response(StatusCode::BAD_REQUEST, msg)
        }
        PoolError::Unauthorized(msg) => error_response(StatusCode::UNAUTHORIZED, msg),
        PoolError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
        PoolError::Conflict(msg) => error_response(StatusCode::CONFLICT, msg),
        PoolError::Database(e) => {
            error!(error = %e, "{}", fallback);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, fallback)
        }
        PoolError::Internal(msg) => {
            error!(error = %msg, "{}", fallback);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, fallback)
        }
    }
}

/// Unwrap a JSON body, turning a rejection into a 400 `{ error }`
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", rejection.body_text()),
            )
        })
}
