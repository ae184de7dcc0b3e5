use serde::{Deserialize, Serialize};

use crate::entities::winners;

/// POST /winners
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordWinnerRequest {
    pub board_id: String,
    pub quarter: i64,
    pub score_home: i64,
    pub score_away: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerResponse {
    pub winner: winners::Model,
}
