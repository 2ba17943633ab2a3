//! Evaluation of Gomoku positions
//!
//! Chain patterns (twos through fives) scored by length and blocked ends.

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate_board, evaluate_position};
pub use patterns::{chain_score, line_score, PatternScore};
