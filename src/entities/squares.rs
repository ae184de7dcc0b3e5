//! SeaORM Entity for squares
//!
//! One claimed cell of a board. `(board_id, row, col)` is unique.

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "paypal")]
    Paypal,
    #[sea_orm(string_value = "venmo")]
    Venmo,
    #[sea_orm(string_value = "cash")]
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Venmo => "venmo",
            PaymentMethod::Cash => "cash",
        }
    }

    /// Icon shown on the grid next to a claimed square
    pub fn icon(&self) -> &'static str {
        match self {
            PaymentMethod::Paypal => "💳",
            PaymentMethod::Venmo => "💵",
            PaymentMethod::Cash => "💰",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paypal" => Ok(PaymentMethod::Paypal),
            "venmo" => Ok(PaymentMethod::Venmo),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(format!("Unsupported payment method: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "squares")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub board_id: String,
    /// 0-9, away team axis
    pub row: i16,
    /// 0-9, home team axis
    pub col: i16,
    pub player_name: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub is_paid: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::boards::Entity",
        from = "Column::BoardId",
        to = "super::boards::Column::Id",
        on_delete = "Cascade"
    )]
    Board,
}

impl Related<super::boards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Board.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_parse_is_case_insensitive() {
        assert_eq!("PayPal".parse::<PaymentMethod>(), Ok(PaymentMethod::Paypal));
        assert_eq!(" venmo ".parse::<PaymentMethod>(), Ok(PaymentMethod::Venmo));
        assert_eq!("CASH".parse::<PaymentMethod>(), Ok(PaymentMethod::Cash));
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_each_payment_method_has_its_own_icon() {
        assert_eq!(PaymentMethod::Paypal.icon(), "💳");
        assert_eq!(PaymentMethod::Venmo.icon(), "💵");
        assert_eq!(PaymentMethod::Cash.icon(), "💰");
    }
}
