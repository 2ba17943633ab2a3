//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate move generation
//! - Threat detection (immediate wins, fours, open threes)
//! - Alpha-Beta minimax search

pub mod alphabeta;
pub mod movegen;
pub mod threat;

pub use alphabeta::{SearchResult, Searcher, DEFAULT_DEPTH, INF, WIN_SCORE};
pub use movegen::valid_moves;
pub use threat::{
    detect_live_three, find_live_four, find_winning_move, find_winning_moves, has_live_four,
};
