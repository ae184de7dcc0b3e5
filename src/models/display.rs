//! Kiosk display view of a board

use rust_decimal::Decimal;
use serde::Serialize;

use crate::entities::{boards, winners};
use crate::models::game::GameData;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub row: u8,
    pub col: u8,
    pub player_name: Option<String>,
    pub is_paid: bool,
    pub payment_icon: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterPayout {
    pub quarter: u8,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_pot: Decimal,
    pub squares_sold: usize,
    pub squares_paid: usize,
    /// Money actually collected (paid squares only)
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_collected: Decimal,
    pub payouts: Vec<QuarterPayout>,
}

/// Cell currently winning on the live score
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadingCell {
    pub row: u8,
    pub col: u8,
    pub player_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDisplay {
    pub board: boards::Model,
    pub row_numbers: Option<Vec<u8>>,
    pub col_numbers: Option<Vec<u8>>,
    /// 10 rows of 10 cells
    pub grid: Vec<Vec<GridCell>>,
    pub pot: PotSummary,
    pub winners: Vec<winners::Model>,
    pub game: Option<GameData>,
    pub leading_cell: Option<LeadingCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardDisplayResponse {
    pub display: BoardDisplay,
}
