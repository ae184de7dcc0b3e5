//! Board request/response models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{boards, payment_configs, squares, winners};

/// POST /boards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub name: String,
    #[serde(default)]
    pub game_id: Option<String>,
    pub team_home: String,
    pub team_away: String,
    pub cost_per_square: Decimal,
    pub payout_q1: Decimal,
    pub payout_q2: Decimal,
    pub payout_q3: Decimal,
    pub payout_q4: Decimal,
    #[serde(default)]
    pub paypal_username: Option<String>,
    #[serde(default)]
    pub venmo_username: Option<String>,
    /// Defaults to true when omitted
    #[serde(default)]
    pub allow_cash: Option<bool>,
    #[serde(default)]
    pub allow_paypal: Option<bool>,
    #[serde(default)]
    pub allow_venmo: Option<bool>,
}

/// Distinguishes an explicit `null` from an absent field
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// PATCH /boards/{id}. Every field is optional; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardRequest {
    pub name: Option<String>,
    /// `Some(None)` (JSON `null`) unlinks the game
    #[serde(default, deserialize_with = "present_or_null")]
    pub game_id: Option<Option<String>>,
    pub team_home: Option<String>,
    pub team_away: Option<String>,
    pub cost_per_square: Option<Decimal>,
    pub payout_q1: Option<Decimal>,
    pub payout_q2: Option<Decimal>,
    pub payout_q3: Option<Decimal>,
    pub payout_q4: Option<Decimal>,
    pub status: Option<String>,
    pub paypal_username: Option<String>,
    pub venmo_username: Option<String>,
    pub allow_cash: Option<bool>,
    pub allow_paypal: Option<bool>,
    pub allow_venmo: Option<bool>,
}

impl UpdateBoardRequest {
    pub fn touches_payouts(&self) -> bool {
        self.payout_q1.is_some()
            || self.payout_q2.is_some()
            || self.payout_q3.is_some()
            || self.payout_q4.is_some()
    }

    pub fn touches_payment_config(&self) -> bool {
        self.paypal_username.is_some()
            || self.venmo_username.is_some()
            || self.allow_cash.is_some()
            || self.allow_paypal.is_some()
            || self.allow_venmo.is_some()
    }
}

/// GET /boards?status=open,closed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardListQuery {
    /// Comma-separated list of statuses
    pub status: Option<String>,
}

/// A board together with everything hanging off it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: boards::Model,
    pub squares: Vec<squares::Model>,
    pub payment_config: Option<payment_configs::Model>,
    pub winners: Vec<winners::Model>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    pub board: BoardDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardListResponse {
    pub boards: Vec<BoardDetail>,
}
