//! Heuristic evaluation of cells and whole boards
//!
//! - `evaluate_position`: desirability of a hypothetical stone on an empty cell
//! - `evaluate_board`: every stone's chains, signed by owner

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::rules::scan_line;

use super::patterns::line_score;

/// Score a hypothetical `player` stone at `pos`.
///
/// Returns 0 for off-board or occupied cells. Otherwise sums the chain
/// score of all four axes through `pos`.
#[must_use]
pub fn evaluate_position(board: &Board, pos: Pos, player: Stone) -> i32 {
    if !board.contains_pos(pos) || !board.is_empty(pos) {
        return 0;
    }
    DIRECTIONS
        .iter()
        .map(|&dir| line_score(scan_line(board, pos, player, dir)))
        .sum()
}

/// Evaluate the board from the perspective of `maximizing`.
///
/// Each stone contributes the chain score of its four axes; stones of
/// `maximizing` add, all others subtract. Chains are counted once per
/// member stone, so longer chains weigh more.
#[must_use]
pub fn evaluate_board(board: &Board, maximizing: Stone) -> i32 {
    let mut total = 0;
    for (pos, owner) in board.stones() {
        let score: i32 = DIRECTIONS
            .iter()
            .map(|&dir| line_score(scan_line(board, pos, owner, dir)))
            .sum();
        if owner == maximizing {
            total += score;
        } else {
            total -= score;
        }
    }
    total
}
