//! Kiosk display view: grid, pot summary and the live leading cell

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::entities::squares;
use crate::models::display::{BoardDisplay, GridCell, LeadingCell, PotSummary, QuarterPayout};
use crate::models::game::GameData;
use crate::services::boards::get_board;
use crate::services::error::PoolError;
use crate::services::games::GameDataSource;
use crate::services::numbers::{self, NumberAssignment, GRID_SIZE};

fn build_grid(squares: &[squares::Model]) -> Vec<Vec<GridCell>> {
    let mut grid: Vec<Vec<GridCell>> = (0..GRID_SIZE as u8)
        .map(|row| {
            (0..GRID_SIZE as u8)
                .map(|col| GridCell {
                    row,
                    col,
                    player_name: None,
                    is_paid: false,
                    payment_icon: None,
                })
                .collect()
        })
        .collect();

    for square in squares {
        let (Ok(row), Ok(col)) = (usize::try_from(square.row), usize::try_from(square.col)) else {
            continue;
        };
        if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
            cell.player_name = square.player_name.clone();
            cell.is_paid = square.is_paid;
            cell.payment_icon = square.payment_method.map(|m| m.icon());
        }
    }

    grid
}

fn pot_summary(
    cost_per_square: Decimal,
    payouts: [Decimal; 4],
    squares: &[squares::Model],
) -> PotSummary {
    let squares_paid = squares.iter().filter(|s| s.is_paid).count();

    PotSummary {
        total_pot: numbers::total_pot(cost_per_square),
        squares_sold: squares.len(),
        squares_paid,
        amount_collected: cost_per_square * Decimal::from(squares_paid),
        payouts: payouts
            .iter()
            .zip(1u8..)
            .map(|(percentage, quarter)| QuarterPayout {
                quarter,
                percentage: *percentage,
                amount: numbers::quarter_payout(cost_per_square, *percentage),
            })
            .collect(),
    }
}

/// Cell that would win if the quarter ended on the game's current score
fn leading_cell(
    assignment: &NumberAssignment,
    game: &GameData,
    grid: &[Vec<GridCell>],
) -> Option<LeadingCell> {
    if !game.status.is_in_progress() {
        return None;
    }
    let (row, col) = assignment.winning_cell(game.home_team.score, game.away_team.score)?;
    let player_name = grid.get(row)?.get(col)?.player_name.clone();

    Some(LeadingCell {
        row: row as u8,
        col: col as u8,
        player_name,
    })
}

pub async fn board_display(
    db: &DatabaseConnection,
    games: &dyn GameDataSource,
    board_id: &str,
) -> Result<BoardDisplay, PoolError> {
    let detail = get_board(db, board_id).await?;
    let board = detail.board;

    let grid = build_grid(&detail.squares);
    let pot = pot_summary(board.cost_per_square, board.payouts(), &detail.squares);
    let assignment = NumberAssignment::from_board(&board);

    let game = match board.game_id.as_deref() {
        Some(game_id) => games.game(game_id).await,
        None => None,
    };
    if board.game_id.is_some() && game.is_none() {
        debug!(board_id = %board.id, "No game data available for board display");
    }

    let leading_cell = match (&assignment, &game) {
        (Some(assignment), Some(game)) => leading_cell(assignment, game, &grid),
        _ => None,
    };

    Ok(BoardDisplay {
        row_numbers: assignment.map(|a| a.rows.to_vec()),
        col_numbers: assignment.map(|a| a.cols.to_vec()),
        board,
        grid,
        pot,
        winners: detail.winners,
        game,
        leading_cell,
    })
}
