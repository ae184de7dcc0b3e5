//! Grid arithmetic: number assignment, last-digit mapping and payouts
//!
//! Rows follow the away team's score, columns the home team's. Each axis gets
//! an independent uniformly random permutation of 0-9 when the board is
//! finalized; nothing about the shuffle is persisted besides the result.

use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::entities::boards;

/// Cells per side of the board
pub const GRID_SIZE: usize = 10;

/// Allowed distance of the payout sum from 100%
const PAYOUT_TOLERANCE: Decimal = dec!(0.01);

/// Uniform random permutation of the digits 0-9 (Fisher-Yates)
pub fn shuffled_digits() -> [u8; GRID_SIZE] {
    let mut digits = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    digits.shuffle(&mut rand::rng());
    digits
}

/// Last digit of a score
pub fn last_digit(score: u32) -> u8 {
    (score % 10) as u8
}

/// Whole pot: every one of the 100 squares sold at `cost_per_square`
pub fn total_pot(cost_per_square: Decimal) -> Decimal {
    cost_per_square * Decimal::from(GRID_SIZE * GRID_SIZE)
}

/// Amount paid for a quarter holding `percentage` of the pot
pub fn quarter_payout(cost_per_square: Decimal, percentage: Decimal) -> Decimal {
    total_pot(cost_per_square) * percentage / dec!(100)
}

/// Quarter percentages must be non-negative and add up to 100 (within 0.01)
pub fn validate_payouts(payouts: [Decimal; 4]) -> Result<(), String> {
    if payouts.iter().any(|p| p.is_sign_negative()) {
        return Err("Payout percentages cannot be negative".to_string());
    }

    let total: Decimal = payouts.iter().sum();
    if (total - dec!(100)).abs() > PAYOUT_TOLERANCE {
        return Err("Payouts must add up to 100%".to_string());
    }

    Ok(())
}

fn is_permutation(digits: &[u8]) -> bool {
    let mut sorted = digits.to_vec();
    sorted.sort_unstable();
    sorted.len() == GRID_SIZE && sorted.iter().enumerate().all(|(i, d)| *d as usize == i)
}

fn parse_axis(raw: &str) -> Option<[u8; GRID_SIZE]> {
    let digits: Vec<u8> = serde_json::from_str(raw).ok()?;
    if !is_permutation(&digits) {
        return None;
    }
    digits.try_into().ok()
}

/// Row and column digits assigned to a finalized board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberAssignment {
    pub rows: [u8; GRID_SIZE],
    pub cols: [u8; GRID_SIZE],
}

impl NumberAssignment {
    /// Two independent shuffles, one per axis
    pub fn random() -> Self {
        Self {
            rows: shuffled_digits(),
            cols: shuffled_digits(),
        }
    }

    /// Read the stored permutations back. `None` if the board is not
    /// finalized or the stored arrays are not permutations of 0-9.
    pub fn from_board(board: &boards::Model) -> Option<Self> {
        if !board.is_finalized {
            return None;
        }
        let rows = parse_axis(board.row_numbers.as_deref()?)?;
        let cols = parse_axis(board.col_numbers.as_deref()?)?;
        Some(Self { rows, cols })
    }

    pub fn rows_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.rows)
    }

    pub fn cols_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.cols)
    }

    /// Cell `(row, col)` that wins for the given scores: the row whose digit
    /// is the away score's last digit, the column whose digit is the home
    /// score's last digit.
    pub fn winning_cell(&self, score_home: u32, score_away: u32) -> Option<(usize, usize)> {
        let away_digit = last_digit(score_away);
        let home_digit = last_digit(score_home);
        let row = self.rows.iter().position(|d| *d == away_digit)?;
        let col = self.cols.iter().position(|d| *d == home_digit)?;
        Some((row, col))
    }
}
