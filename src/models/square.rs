use serde::{Deserialize, Serialize};

use crate::entities::squares;

/// POST /squares
///
/// Fields are optional at the serde level so a missing field is reported
/// as a validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSquareRequest {
    pub board_id: Option<String>,
    pub row: Option<i64>,
    pub col: Option<i64>,
    pub player_name: Option<String>,
    pub payment_method: Option<String>,
}

/// PATCH /squares/{id} (admin: mark paid, fix a name)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSquareRequest {
    pub is_paid: Option<bool>,
    pub player_name: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquareResponse {
    pub square: squares::Model,
}
