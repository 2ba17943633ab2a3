//! Threat detection for the decision pipeline
//!
//! All queries evaluate hypothetical stones on empty cells through line
//! scans, so the board is never written.

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::rules::{is_winning_move, scan_line};

/// Empty cells where `player` would complete five or more, row-major.
pub fn find_winning_moves(board: &Board, player: Stone) -> Vec<Pos> {
    board
        .positions()
        .filter(|&p| board.is_empty(p) && is_winning_move(board, p, player))
        .collect()
}

/// First empty cell in row-major order where `player` wins immediately.
#[inline]
pub fn find_winning_move(board: &Board, player: Stone) -> Option<Pos> {
    board
        .positions()
        .find(|&p| board.is_empty(p) && is_winning_move(board, p, player))
}

/// Empty cells where a `player` stone makes an open three in some axis.
///
/// Each cell appears once, in row-major order.
pub fn detect_live_three(board: &Board, player: Stone) -> Vec<Pos> {
    board
        .positions()
        .filter(|&p| board.is_empty(p) && makes_live_three(board, p, player))
        .collect()
}

#[inline]
fn makes_live_three(board: &Board, pos: Pos, player: Stone) -> bool {
    DIRECTIONS.iter().any(|&dir| {
        let info = scan_line(board, pos, player, dir);
        info.length == 3 && info.blocked == 0
    })
}

/// Check if a `player` stone at the empty cell `pos` makes four or more in
/// a row in any axis.
///
/// Openness is not considered: a four blocked on both ends still counts.
#[inline]
pub fn has_live_four(board: &Board, pos: Pos, player: Stone) -> bool {
    if !board.contains_pos(pos) || !board.is_empty(pos) {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&dir| scan_line(board, pos, player, dir).length >= 4)
}

/// First empty cell in row-major order satisfying [`has_live_four`].
pub fn find_live_four(board: &Board, player: Stone) -> Option<Pos> {
    board
        .positions()
        .find(|&p| has_live_four(board, p, player))
}
