//! Line scanning along the four board axes
//!
//! A scan treats the origin as holding the scanned stone whether or not it
//! is actually there, so it can evaluate hypothetical placements without
//! touching the board.

use crate::board::{Board, Pos, Stone};

/// Chain measured through one cell along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineInfo {
    /// Contiguous stones including the origin
    pub length: u32,
    /// Chain ends that are off-board or hold a non-matching stone (0..=2)
    pub blocked: u8,
}

impl LineInfo {
    /// Both ends open
    #[inline]
    pub fn is_open(&self) -> bool {
        self.blocked == 0
    }
}

/// Count `stone` contiguous with `pos` in both senses of `dir`.
#[inline]
pub fn scan_line(board: &Board, pos: Pos, stone: Stone, dir: (i32, i32)) -> LineInfo {
    let (dr, dc) = dir;
    let (forward, forward_blocked) = walk(board, pos, stone, dr, dc);
    let (backward, backward_blocked) = walk(board, pos, stone, -dr, -dc);

    LineInfo {
        length: 1 + forward + backward,
        blocked: u8::from(forward_blocked) + u8::from(backward_blocked),
    }
}

/// Walk away from `pos` while stones match; report run length and whether
/// the run ends at the edge or an occupied cell.
#[inline]
fn walk(board: &Board, pos: Pos, stone: Stone, dr: i32, dc: i32) -> (u32, bool) {
    let mut count = 0;
    let mut r = pos.row as i32 + dr;
    let mut c = pos.col as i32 + dc;
    loop {
        match board.stone_at(r, c) {
            Some(s) if s == stone => {
                count += 1;
                r += dr;
                c += dc;
            }
            Some(Stone::Empty) => return (count, false),
            _ => return (count, true),
        }
    }
}
