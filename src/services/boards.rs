//! Board lifecycle: create, list, update, finalize, archive, delete

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::boards::{self, BoardStatus};
use crate::entities::prelude::{Boards, PaymentConfigs, Squares, Winners};
use crate::entities::{payment_configs, squares, winners};
use crate::models::board::{BoardDetail, CreateBoardRequest, UpdateBoardRequest};
use crate::services::error::PoolError;
use crate::services::numbers::{self, NumberAssignment};

/// Parse a comma-separated status filter such as `open,closed,live`
pub fn parse_status_filter(raw: &str) -> Result<Vec<BoardStatus>, PoolError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<BoardStatus>().map_err(PoolError::Validation))
        .collect()
}

fn require_text(value: &str, field: &str) -> Result<String, PoolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PoolError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn validate_cost(cost: rust_decimal::Decimal) -> Result<(), PoolError> {
    if cost <= rust_decimal::Decimal::ZERO {
        return Err(PoolError::Validation(
            "Cost per square must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Blank optional text becomes `None`
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fetch a board or fail with NotFound
pub async fn find_board<C: ConnectionTrait>(
    db: &C,
    board_id: &str,
) -> Result<boards::Model, PoolError> {
    Boards::find_by_id(board_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| PoolError::NotFound("Board not found".to_string()))
}

/// Attach squares, payment configs and winners to a set of boards, keeping
/// the boards' order.
async fn load_details<C: ConnectionTrait>(
    db: &C,
    boards: Vec<boards::Model>,
) -> Result<Vec<BoardDetail>, PoolError> {
    if boards.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = boards.iter().map(|b| b.id.clone()).collect();

    let mut squares_by_board: HashMap<String, Vec<squares::Model>> = HashMap::new();
    for square in Squares::find()
        .filter(squares::Column::BoardId.is_in(ids.clone()))
        .order_by_asc(squares::Column::Row)
        .order_by_asc(squares::Column::Col)
        .all(db)
        .await?
    {
        squares_by_board.entry(square.board_id.clone()).or_default().push(square);
    }

    let mut winners_by_board: HashMap<String, Vec<winners::Model>> = HashMap::new();
    for winner in Winners::find()
        .filter(winners::Column::BoardId.is_in(ids.clone()))
        .order_by_asc(winners::Column::Quarter)
        .all(db)
        .await?
    {
        winners_by_board.entry(winner.board_id.clone()).or_default().push(winner);
    }

    let mut configs_by_board: HashMap<String, payment_configs::Model> = PaymentConfigs::find()
        .filter(payment_configs::Column::BoardId.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|config| (config.board_id.clone(), config))
        .collect();

    Ok(boards
        .into_iter()
        .map(|board| BoardDetail {
            squares: squares_by_board.remove(&board.id).unwrap_or_default(),
            winners: winners_by_board.remove(&board.id).unwrap_or_default(),
            payment_config: configs_by_board.remove(&board.id),
            board,
        })
        .collect())
}

async fn load_detail<C: ConnectionTrait>(
    db: &C,
    board: boards::Model,
) -> Result<BoardDetail, PoolError> {
    load_details(db, vec![board])
        .await?
        .pop()
        .ok_or_else(|| PoolError::Internal("Board detail missing after load".to_string()))
}

/// All boards, newest first, optionally restricted to some statuses
pub async fn list_boards(
    db: &DatabaseConnection,
    statuses: Option<Vec<BoardStatus>>,
) -> Result<Vec<BoardDetail>, PoolError> {
    let mut select = Boards::find();
    if let Some(statuses) = statuses {
        select = select
            .filter(boards::Column::Status.is_in(statuses.iter().map(BoardStatus::as_str)));
    }

    let boards = select
        .order_by_desc(boards::Column::CreatedAt)
        .all(db)
        .await?;

    load_details(db, boards).await
}

pub async fn get_board(db: &DatabaseConnection, board_id: &str) -> Result<BoardDetail, PoolError> {
    let board = find_board(db, board_id).await?;
    load_detail(db, board).await
}

/// Create an open board and its payment config in one transaction
pub async fn create_board(
    db: &DatabaseConnection,
    request: CreateBoardRequest,
) -> Result<BoardDetail, PoolError> {
    let name = require_text(&request.name, "Board name")?;
    let team_home = require_text(&request.team_home, "Home team")?;
    let team_away = require_text(&request.team_away, "Away team")?;
    validate_cost(request.cost_per_square)?;
    numbers::validate_payouts([
        request.payout_q1,
        request.payout_q2,
        request.payout_q3,
        request.payout_q4,
    ])
    .map_err(PoolError::Validation)?;

    let now = Utc::now().fixed_offset();
    let board_id = Uuid::new_v4().to_string();

    let txn = db.begin().await?;

    let board = boards::ActiveModel {
        id: Set(board_id.clone()),
        name: Set(name),
        game_id: Set(optional_text(request.game_id)),
        team_home: Set(team_home),
        team_away: Set(team_away),
        cost_per_square: Set(request.cost_per_square),
        payout_q1: Set(request.payout_q1),
        payout_q2: Set(request.payout_q2),
        payout_q3: Set(request.payout_q3),
        payout_q4: Set(request.payout_q4),
        status: Set(BoardStatus::Open),
        is_finalized: Set(false),
        row_numbers: Set(None),
        col_numbers: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    payment_configs::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        board_id: Set(board_id.clone()),
        allow_paypal: Set(request.allow_paypal.unwrap_or(true)),
        allow_venmo: Set(request.allow_venmo.unwrap_or(true)),
        allow_cash: Set(request.allow_cash.unwrap_or(true)),
        paypal_username: Set(optional_text(request.paypal_username)),
        venmo_username: Set(optional_text(request.venmo_username)),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(board_id = %board.id, name = %board.name, "Board created");

    load_detail(db, board).await
}

/// Apply a partial update. Payout percentages are re-validated on the merged
/// values; assigned numbers and the finalized flag cannot be patched.
pub async fn update_board(
    db: &DatabaseConnection,
    board_id: &str,
    request: UpdateBoardRequest,
) -> Result<BoardDetail, PoolError> {
    let board = find_board(db, board_id).await?;

    if request.touches_payouts() {
        numbers::validate_payouts([
            request.payout_q1.unwrap_or(board.payout_q1),
            request.payout_q2.unwrap_or(board.payout_q2),
            request.payout_q3.unwrap_or(board.payout_q3),
            request.payout_q4.unwrap_or(board.payout_q4),
        ])
        .map_err(PoolError::Validation)?;
    }
    if let Some(cost) = request.cost_per_square {
        validate_cost(cost)?;
    }
    let status = request
        .status
        .as_deref()
        .map(|s| s.parse::<BoardStatus>().map_err(PoolError::Validation))
        .transpose()?;
    // Numbers are public once assigned
    if board.is_finalized && status == Some(BoardStatus::Open) {
        return Err(PoolError::StateConflict(
            "Finalized board cannot be reopened".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let mut active = board.into_active_model();
    if let Some(name) = &request.name {
        active.name = Set(require_text(name, "Board name")?);
    }
    if let Some(game_id) = &request.game_id {
        active.game_id = Set(optional_text(game_id.clone()));
    }
    if let Some(team_home) = &request.team_home {
        active.team_home = Set(require_text(team_home, "Home team")?);
    }
    if let Some(team_away) = &request.team_away {
        active.team_away = Set(require_text(team_away, "Away team")?);
    }
    if let Some(cost) = request.cost_per_square {
        active.cost_per_square = Set(cost);
    }
    if let Some(p) = request.payout_q1 {
        active.payout_q1 = Set(p);
    }
    if let Some(p) = request.payout_q2 {
        active.payout_q2 = Set(p);
    }
    if let Some(p) = request.payout_q3 {
        active.payout_q3 = Set(p);
    }
    if let Some(p) = request.payout_q4 {
        active.payout_q4 = Set(p);
    }
    if let Some(status) = status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    let board = active.update(&txn).await?;

    if request.touches_payment_config() {
        let existing = PaymentConfigs::find()
            .filter(payment_configs::Column::BoardId.eq(board_id))
            .one(&txn)
            .await?;

        match existing {
            Some(config) => {
                let mut config = config.into_active_model();
                if request.paypal_username.is_some() {
                    config.paypal_username = Set(optional_text(request.paypal_username.clone()));
                }
                if request.venmo_username.is_some() {
                    config.venmo_username = Set(optional_text(request.venmo_username.clone()));
                }
                if let Some(allow) = request.allow_paypal {
                    config.allow_paypal = Set(allow);
                }
                if let Some(allow) = request.allow_venmo {
                    config.allow_venmo = Set(allow);
                }
                if let Some(allow) = request.allow_cash {
                    config.allow_cash = Set(allow);
                }
                config.update(&txn).await?;
            }
            None => {
                payment_configs::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    board_id: Set(board_id.to_string()),
                    allow_paypal: Set(request.allow_paypal.unwrap_or(true)),
                    allow_venmo: Set(request.allow_venmo.unwrap_or(true)),
                    allow_cash: Set(request.allow_cash.unwrap_or(true)),
                    paypal_username: Set(optional_text(request.paypal_username.clone())),
                    venmo_username: Set(optional_text(request.venmo_username.clone())),
                }
                .insert(&txn)
                .await?;
            }
        }
    }

    txn.commit().await?;

    info!(board_id = %board.id, status = %board.status, "Board updated");

    load_detail(db, board).await
}

/// Assign random row/column numbers and close the board to new claims.
///
/// The update only applies while `is_finalized` is still false, so two
/// racing calls cannot both shuffle: the second sees zero rows affected.
pub async fn finalize_board(
    db: &DatabaseConnection,
    board_id: &str,
) -> Result<BoardDetail, PoolError> {
    let board = find_board(db, board_id).await?;
    if board.is_finalized {
        return Err(PoolError::StateConflict("Board already finalized".to_string()));
    }

    let assignment = NumberAssignment::random();
    let rows = assignment
        .rows_json()
        .map_err(|e| PoolError::Internal(format!("Failed to encode row numbers: {}", e)))?;
    let cols = assignment
        .cols_json()
        .map_err(|e| PoolError::Internal(format!("Failed to encode column numbers: {}", e)))?;

    let result = Boards::update_many()
        .set(boards::ActiveModel {
            is_finalized: Set(true),
            status: Set(BoardStatus::Closed),
            row_numbers: Set(Some(rows)),
            col_numbers: Set(Some(cols)),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        })
        .filter(boards::Column::Id.eq(board_id))
        .filter(boards::Column::IsFinalized.eq(false))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        warn!(board_id = %board_id, "Finalize lost race with a concurrent finalize");
        return Err(PoolError::StateConflict("Board already finalized".to_string()));
    }

    info!(
        board_id = %board_id,
        rows = ?assignment.rows,
        cols = ?assignment.cols,
        "Board finalized"
    );

    get_board(db, board_id).await
}

pub async fn archive_board(
    db: &DatabaseConnection,
    board_id: &str,
) -> Result<BoardDetail, PoolError> {
    let board = find_board(db, board_id).await?;

    let mut active = board.into_active_model();
    active.status = Set(BoardStatus::Archived);
    active.updated_at = Set(Utc::now().fixed_offset());
    let board = active.update(db).await?;

    info!(board_id = %board.id, "Board archived");

    load_detail(db, board).await
}

/// Delete a board with its squares, winners and payment config
pub async fn delete_board(db: &DatabaseConnection, board_id: &str) -> Result<(), PoolError> {
    let txn = db.begin().await?;

    find_board(&txn, board_id).await?;

    let squares = Squares::delete_many()
        .filter(squares::Column::BoardId.eq(board_id))
        .exec(&txn)
        .await?;
    let winners = Winners::delete_many()
        .filter(winners::Column::BoardId.eq(board_id))
        .exec(&txn)
        .await?;
    PaymentConfigs::delete_many()
        .filter(payment_configs::Column::BoardId.eq(board_id))
        .exec(&txn)
        .await?;
    Boards::delete_by_id(board_id.to_string()).exec(&txn).await?;

    txn.commit().await?;

    info!(
        board_id = %board_id,
        squares = squares.rows_affected,
        winners = winners.rows_affected,
        "Board deleted"
    );

    Ok(())
}
