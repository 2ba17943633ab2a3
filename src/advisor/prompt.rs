//! Board export and reply parsing for the move advisor

use crate::board::{Board, Pos, Stone};
use crate::error::AdvisorError;

/// System message sent with every request
pub const SYSTEM_PROMPT: &str =
    "You are a calm, precise Gomoku engine with tight defence. Reply only with row,col.";

/// Grid export, one character per cell: `.` empty, `O` for `side`, `X` for
/// its opponent. Rows end with `\n`.
pub fn render_board(board: &Board, side: Stone) -> String {
    let size = board.size();
    let mut out = String::with_capacity(size * (size + 1));
    for row in 0..size as u8 {
        for col in 0..size as u8 {
            let stone = board.get(Pos::new(row, col));
            out.push(if stone == Stone::Empty {
                '.'
            } else if stone == side {
                'O'
            } else {
                'X'
            });
        }
        out.push('\n');
    }
    out
}

/// User message asking for the next move of `side`.
pub fn build_prompt(board: &Board, side: Stone) -> String {
    let size = board.size();
    format!(
        "You are a world-class Gomoku player with stones 'O'; your opponent plays 'X'.\n\
         Board size: {size}x{size}, coordinates start at 0.\n\n\
         Current board:\n{grid}\n\
         It is your move. Answer with the best cell as row,col and follow these priorities:\n\
         1. Defend: if the opponent can make an open four or a double three next move, block it now.\n\
         2. Attack: if you can make an open four, or a four plus an open three, do it to win.\n\
         3. Combine: prefer a cell that blocks the opponent and extends your own line.\n\
         4. Diagonals matter as much as rows and columns.\n\n\
         Never ignore an opponent's open three.\n\
         Output exactly one line such as \"7,7\". No explanation.",
        grid = render_board(board, side),
    )
}

/// Parse a `row,col` reply and check it against `board`.
///
/// Whitespace and parentheses are ignored, so `" (7, 8) "` reads as 7,8.
pub fn parse_reply(reply: &str, board: &Board) -> Result<Pos, AdvisorError> {
    let cleaned: String = reply
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
        .collect();
    let malformed = || AdvisorError::Malformed(reply.trim().to_string());

    let (row, col) = cleaned.split_once(',').ok_or_else(malformed)?;
    let row: i64 = row.parse().map_err(|_| malformed())?;
    let col: i64 = col.parse().map_err(|_| malformed())?;

    let size = board.size() as i64;
    if !(0..size).contains(&row) || !(0..size).contains(&col) {
        return Err(AdvisorError::OutOfBounds { row, col });
    }

    let pos = Pos::new(row as u8, col as u8);
    if !board.is_empty(pos) {
        return Err(AdvisorError::Occupied(pos));
    }
    Ok(pos)
}
