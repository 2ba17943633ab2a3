//! Candidate move generation

use crate::board::{Board, Pos, Stone};

/// Half-width of the center window used when no stone has a free neighbour
const CENTER_WINDOW_RADIUS: i32 = 2;

/// Candidate moves for search, nearest to the center first.
///
/// Empty cells touching any stone (8-neighbourhood). If there are none, the
/// empty cells of the 5x5 window around the center, clipped to the board.
/// If still none, the center itself when it is empty. Ties keep row-major
/// order.
pub fn valid_moves(board: &Board) -> Vec<Pos> {
    let mut moves: Vec<Pos> = board
        .positions()
        .filter(|&p| board.is_empty(p) && has_neighbor(board, p))
        .collect();

    let center = board.center();
    if moves.is_empty() {
        let (cr, cc) = (center.row as i32, center.col as i32);
        for r in cr - CENTER_WINDOW_RADIUS..=cr + CENTER_WINDOW_RADIUS {
            for c in cc - CENTER_WINDOW_RADIUS..=cc + CENTER_WINDOW_RADIUS {
                if board.stone_at(r, c) == Some(Stone::Empty) {
                    moves.push(Pos::new(r as u8, c as u8));
                }
            }
        }
    }

    if moves.is_empty() && board.is_empty(center) {
        moves.push(center);
    }

    // sort_by_key is stable
    moves.sort_by_key(|p| p.manhattan(center));
    moves
}

#[inline]
fn has_neighbor(board: &Board, pos: Pos) -> bool {
    let (r, c) = (pos.row as i32, pos.col as i32);
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if matches!(board.stone_at(r + dr, c + dc), Some(s) if s != Stone::Empty) {
                return true;
            }
        }
    }
    false
}
