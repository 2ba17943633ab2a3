//! Win condition checking
//!
//! Five or more stones of one colour in a row, in any of the four axes,
//! wins. A full board without such a line is a draw.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::line::scan_line;

/// Chain length that wins the game
pub const WIN_LENGTH: u32 = 5;

/// Check whether the stone at `pos` lies on a winning line.
///
/// Returns that stone's colour, or `Stone::Empty` when the cell is empty or
/// no direction reaches [`WIN_LENGTH`].
#[inline]
pub fn check_winner(board: &Board, pos: Pos) -> Stone {
    let stone = board.get(pos);
    if stone == Stone::Empty {
        return Stone::Empty;
    }
    if DIRECTIONS
        .iter()
        .any(|&dir| scan_line(board, pos, stone, dir).length >= WIN_LENGTH)
    {
        stone
    } else {
        Stone::Empty
    }
}

/// Scan every stone for a winning line. First hit in row-major order.
pub fn find_winner(board: &Board) -> Stone {
    board
        .stones()
        .map(|(pos, _)| check_winner(board, pos))
        .find(|&s| s != Stone::Empty)
        .unwrap_or(Stone::Empty)
}

/// Check if a stone of `stone` placed at the empty cell `pos` would win.
#[inline]
pub fn is_winning_move(board: &Board, pos: Pos, stone: Stone) -> bool {
    DIRECTIONS
        .iter()
        .any(|&dir| scan_line(board, pos, stone, dir).length >= WIN_LENGTH)
}

/// Positions of the winning line through `pos`, ordered along the axis.
///
/// Returns `None` if the stone at `pos` does not win.
pub fn find_winning_line(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let stone = board.get(pos);
    if stone == Stone::Empty {
        return None;
    }

    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        // Extend in negative direction first
        let (mut r, mut c) = (pos.row as i32 - dr, pos.col as i32 - dc);
        while board.stone_at(r, c) == Some(stone) {
            line.insert(0, Pos::new(r as u8, c as u8));
            r -= dr;
            c -= dc;
        }

        // Extend in positive direction
        let (mut r, mut c) = (pos.row as i32 + dr, pos.col as i32 + dc);
        while board.stone_at(r, c) == Some(stone) {
            line.push(Pos::new(r as u8, c as u8));
            r += dr;
            c += dc;
        }

        if line.len() >= WIN_LENGTH as usize {
            return Some(line);
        }
    }
    None
}

/// Full board with no winner
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && find_winner(board) == Stone::Empty
}
