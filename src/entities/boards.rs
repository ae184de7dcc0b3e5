//! SeaORM Entity for boards
//!
//! A 10x10 squares board tied to one NFL game.

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Board lifecycle: open -> closed (on finalize) -> live -> completed -> archived
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum BoardStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "closed")]
    Closed,
    #[sea_orm(string_value = "live")]
    Live,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl BoardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardStatus::Open => "open",
            BoardStatus::Closed => "closed",
            BoardStatus::Live => "live",
            BoardStatus::Completed => "completed",
            BoardStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(BoardStatus::Open),
            "closed" => Ok(BoardStatus::Closed),
            "live" => Ok(BoardStatus::Live),
            "completed" => Ok(BoardStatus::Completed),
            "archived" => Ok(BoardStatus::Archived),
            other => Err(format!("Unknown board status: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "boards")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// ESPN event id of the game this board follows
    pub game_id: Option<String>,
    pub team_home: String,
    pub team_away: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_per_square: Decimal,
    /// Quarter payouts as percentages of the pot, summing to 100
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub payout_q1: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub payout_q2: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub payout_q3: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub payout_q4: Decimal,
    pub status: BoardStatus,
    pub is_finalized: bool,
    /// JSON array, permutation of 0-9 mapped onto the away team's rows
    #[sea_orm(column_type = "Text", nullable)]
    pub row_numbers: Option<String>,
    /// JSON array, permutation of 0-9 mapped onto the home team's columns
    #[sea_orm(column_type = "Text", nullable)]
    pub col_numbers: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::squares::Entity")]
    Squares,
    #[sea_orm(has_many = "super::winners::Entity")]
    Winners,
    #[sea_orm(has_one = "super::payment_configs::Entity")]
    PaymentConfig,
}

impl Related<super::squares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Squares.def()
    }
}

impl Related<super::winners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Winners.def()
    }
}

impl Related<super::payment_configs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentConfig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Percentage of the pot paid out for `quarter` (1-4)
    pub fn payout_percentage(&self, quarter: u8) -> Option<Decimal> {
        match quarter {
            1 => Some(self.payout_q1),
            2 => Some(self.payout_q2),
            3 => Some(self.payout_q3),
            4 => Some(self.payout_q4),
            _ => None,
        }
    }

    pub fn payouts(&self) -> [Decimal; 4] {
        [self.payout_q1, self.payout_q2, self.payout_q3, self.payout_q4]
    }
}
