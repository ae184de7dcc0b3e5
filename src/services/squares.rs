//! Square claims and admin edits
//!
//! Claim exclusivity rests entirely on the `(board_id, row, col)` unique
//! index: the insert either lands or fails with a unique violation, which is
//! reported as a conflict. There is no hold or reservation step.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::boards::BoardStatus;
use crate::entities::prelude::Squares;
use crate::entities::squares::{self, PaymentMethod};
use crate::models::square::{ClaimSquareRequest, UpdateSquareRequest};
use crate::services::boards::find_board;
use crate::services::error::PoolError;
use crate::services::numbers::GRID_SIZE;

pub const SQUARE_TAKEN_MESSAGE: &str =
    "This square has already been claimed. Please select another.";

/// Validated claim ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub board_id: String,
    pub row: i16,
    pub col: i16,
    pub player_name: String,
    pub payment_method: PaymentMethod,
}

fn grid_coordinate(value: i64) -> Option<i16> {
    if (0..GRID_SIZE as i64).contains(&value) {
        Some(value as i16)
    } else {
        None
    }
}

impl Claim {
    pub fn from_request(request: ClaimSquareRequest) -> Result<Self, PoolError> {
        let missing = || PoolError::Validation("Missing required fields".to_string());

        let board_id = request
            .board_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(missing)?;
        let row = request.row.ok_or_else(missing)?;
        let col = request.col.ok_or_else(missing)?;
        let player_name = request
            .player_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(missing)?;
        let payment_method = request.payment_method.ok_or_else(missing)?;

        let (row, col) = match (grid_coordinate(row), grid_coordinate(col)) {
            (Some(row), Some(col)) => (row, col),
            _ => return Err(PoolError::Validation("Invalid square coordinates".to_string())),
        };

        let payment_method = payment_method
            .parse::<PaymentMethod>()
            .map_err(PoolError::Validation)?;

        Ok(Self {
            board_id,
            row,
            col,
            player_name,
            payment_method,
        })
    }
}

/// Claim a cell on an open board. Loses with `Conflict` if someone else
/// already holds the cell, including a concurrent claim that committed first.
pub async fn claim_square(
    db: &DatabaseConnection,
    request: ClaimSquareRequest,
) -> Result<squares::Model, PoolError> {
    let claim = Claim::from_request(request)?;

    let board = find_board(db, &claim.board_id).await?;
    if board.status != BoardStatus::Open {
        return Err(PoolError::StateConflict(
            "Board is not accepting new squares".to_string(),
        ));
    }

    let square = squares::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        board_id: Set(claim.board_id.clone()),
        row: Set(claim.row),
        col: Set(claim.col),
        player_name: Set(Some(claim.player_name.clone())),
        payment_method: Set(Some(claim.payment_method)),
        is_paid: Set(false),
        created_at: Set(Utc::now().fixed_offset()),
    };

    match square.insert(db).await {
        Ok(square) => {
            info!(
                board_id = %square.board_id,
                row = square.row,
                col = square.col,
                player = %claim.player_name,
                "Square claimed"
            );
            Ok(square)
        }
        Err(e) if PoolError::is_unique_violation(&e) => {
            warn!(
                board_id = %claim.board_id,
                row = claim.row,
                col = claim.col,
                "Square claim conflict"
            );
            Err(PoolError::Conflict(SQUARE_TAKEN_MESSAGE.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn find_square(
    db: &DatabaseConnection,
    square_id: &str,
) -> Result<squares::Model, PoolError> {
    Squares::find_by_id(square_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| PoolError::NotFound("Square not found".to_string()))
}

/// Admin edit: toggle paid, fix a name or payment method
pub async fn update_square(
    db: &DatabaseConnection,
    square_id: &str,
    request: UpdateSquareRequest,
) -> Result<squares::Model, PoolError> {
    let square = find_square(db, square_id).await?;

    let payment_method = request
        .payment_method
        .as_deref()
        .map(|m| m.parse::<PaymentMethod>().map_err(PoolError::Validation))
        .transpose()?;

    let mut active = square.into_active_model();
    if let Some(is_paid) = request.is_paid {
        active.is_paid = Set(is_paid);
    }
    if let Some(name) = request.player_name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(PoolError::Validation("Player name cannot be empty".to_string()));
        }
        active.player_name = Set(Some(name));
    }
    if let Some(method) = payment_method {
        active.payment_method = Set(Some(method));
    }

    let square = active.update(db).await?;

    info!(square_id = %square.id, is_paid = square.is_paid, "Square updated");

    Ok(square)
}

pub async fn delete_square(db: &DatabaseConnection, square_id: &str) -> Result<(), PoolError> {
    let result = Squares::delete_by_id(square_id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(PoolError::NotFound("Square not found".to_string()));
    }

    info!(square_id = %square_id, "Square deleted");
    Ok(())
}
