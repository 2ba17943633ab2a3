//! Game rules for Gomoku
//!
//! - Line scanning along the four axes
//! - Win conditions (five or more in a row) and draw detection

pub mod line;
pub mod win;

// Re-exports for convenient access
pub use line::{scan_line, LineInfo};
pub use win::{
    check_winner, find_winner, find_winning_line, is_draw, is_winning_move, WIN_LENGTH,
};
