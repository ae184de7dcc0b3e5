//! Quarter winner computation
//!
//! The last digit of each team's score picks a row (away) and a column
//! (home) through the board's assigned numbers. Recording a quarter again
//! replaces the previous result.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::prelude::{Squares, Winners};
use crate::entities::{boards, squares, winners};
use crate::models::winner::RecordWinnerRequest;
use crate::services::boards::find_board;
use crate::services::error::PoolError;
use crate::services::numbers::{self, NumberAssignment};

fn validate_quarter(quarter: i64) -> Result<u8, PoolError> {
    match quarter {
        1..=4 => Ok(quarter as u8),
        _ => Err(PoolError::Validation("Quarter must be between 1 and 4".to_string())),
    }
}

/// Quarters reaching here are already validated; a miss is a bug, not bad input
fn quarter_percentage(board: &boards::Model, quarter: u8) -> Result<Decimal, PoolError> {
    board.payout_percentage(quarter).ok_or_else(|| {
        PoolError::Internal(format!("No payout percentage for quarter {}", quarter))
    })
}

fn validate_score(score: i64, team: &str) -> Result<u32, PoolError> {
    i32::try_from(score)
        .ok()
        .and_then(|s| u32::try_from(s).ok())
        .ok_or_else(|| {
            PoolError::Validation(format!("{} score must be a non-negative integer", team))
        })
}

/// Compute and upsert the winner of one quarter
pub async fn record_winner(
    db: &DatabaseConnection,
    request: RecordWinnerRequest,
) -> Result<winners::Model, PoolError> {
    let quarter = validate_quarter(request.quarter)?;
    let score_home = validate_score(request.score_home, "Home")?;
    let score_away = validate_score(request.score_away, "Away")?;

    let board = find_board(db, &request.board_id).await?;
    let assignment = NumberAssignment::from_board(&board)
        .ok_or_else(|| PoolError::StateConflict("Board not finalized".to_string()))?;

    let (row, col) = assignment
        .winning_cell(score_home, score_away)
        .ok_or_else(|| {
            PoolError::Internal("Assigned numbers do not cover every digit".to_string())
        })?;

    let square = Squares::find()
        .filter(squares::Column::BoardId.eq(board.id.as_str()))
        .filter(squares::Column::Row.eq(row as i16))
        .filter(squares::Column::Col.eq(col as i16))
        .one(db)
        .await?;

    let player_name = square
        .and_then(|s| s.player_name)
        .ok_or_else(|| PoolError::NotFound("No winner found for this square".to_string()))?;

    let percentage = quarter_percentage(&board, quarter)?;
    let payout = numbers::quarter_payout(board.cost_per_square, percentage);

    let now = Utc::now().fixed_offset();
    let winner = winners::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        board_id: Set(board.id.clone()),
        quarter: Set(quarter as i16),
        player_name: Set(player_name.clone()),
        score_home: Set(score_home as i32),
        score_away: Set(score_away as i32),
        payout: Set(payout),
        created_at: Set(now),
        updated_at: Set(now),
    };

    // Upsert on (board_id, quarter): a corrected score overwrites the old row
    Winners::insert(winner)
        .on_conflict(
            OnConflict::columns([winners::Column::BoardId, winners::Column::Quarter])
                .update_columns([
                    winners::Column::PlayerName,
                    winners::Column::ScoreHome,
                    winners::Column::ScoreAway,
                    winners::Column::Payout,
                    winners::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    let winner = Winners::find()
        .filter(winners::Column::BoardId.eq(board.id.as_str()))
        .filter(winners::Column::Quarter.eq(quarter as i16))
        .one(db)
        .await?
        .ok_or_else(|| PoolError::Internal("Winner missing after upsert".to_string()))?;

    info!(
        board_id = %board.id,
        quarter = quarter,
        row = row,
        col = col,
        player = %player_name,
        payout = %payout,
        "Winner recorded"
    );

    Ok(winner)
}
