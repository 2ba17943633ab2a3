//! Minimax search with alpha-beta pruning
//!
//! Fixed-depth search over the candidates of [`valid_moves`], scored by
//! [`evaluate_board`] from the engine's point of view.
//!
//! # Example
//!
//! ```
//! use wuziqi::board::{Board, Pos, Stone};
//! use wuziqi::search::Searcher;
//!
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let mut searcher = Searcher::new(Stone::White);
//! let result = searcher.search(&board, 2);
//! assert!(result.best_move.is_some());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::board::{Board, Pos, Stone};
use crate::eval::evaluate_board;
use crate::rules::{check_winner, find_winner};

use super::movegen::valid_moves;

/// Infinity score for alpha-beta bounds
pub const INF: i32 = i32::MAX;

/// Score of a decided game. Dominates every heuristic evaluation.
pub const WIN_SCORE: i32 = i32::MAX - 1;

/// Default search depth in plies
pub const DEFAULT_DEPTH: i8 = 2;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` at terminal nodes
    pub best_move: Option<Pos>,
    /// Evaluation score from the engine's perspective
    pub score: i32,
    /// Total nodes visited
    pub nodes: u64,
}

/// Alpha-beta searcher for one side.
///
/// `engine` is the maximizing side; its opponent minimizes.
pub struct Searcher {
    engine: Stone,
    nodes: u64,
    /// Stop signal set by whoever abandons the decision
    stopped: Option<Arc<AtomicBool>>,
}

impl Searcher {
    #[must_use]
    pub fn new(engine: Stone) -> Self {
        Self {
            engine,
            nodes: 0,
            stopped: None,
        }
    }

    /// Share a stop flag. Once it is set, every node returns after its
    /// first candidate, so the search unwinds quickly and still yields a move.
    #[must_use]
    pub fn with_stop_flag(mut self, stopped: Arc<AtomicBool>) -> Self {
        self.stopped = Some(stopped);
        self
    }

    #[inline]
    fn is_stopped(&self) -> bool {
        self.stopped
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Search `depth` plies from `board` with the engine to move.
    ///
    /// Works on a private copy of the board.
    #[must_use]
    pub fn search(&mut self, board: &Board, depth: i8) -> SearchResult {
        let mut work_board = board.clone();
        self.alpha_beta(&mut work_board, depth, -INF, INF, true)
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `maximizing` selects which side moves at this node. Candidates are
    /// placed through [`Board::probe`], so `board` is unchanged on return.
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: i8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.nodes = 0;
        let (score, best_move) = self.search_node(board, depth, alpha, beta, maximizing, None);
        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        }
    }

    /// `last` is the move that produced this node; the root has none and
    /// scans the whole board for a winner instead.
    fn search_node(
        &mut self,
        board: &mut Board,
        depth: i8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        last: Option<Pos>,
    ) -> (i32, Option<Pos>) {
        self.nodes += 1;

        let winner = match last {
            Some(pos) => check_winner(board, pos),
            None => find_winner(board),
        };
        if winner != Stone::Empty {
            let score = if winner == self.engine {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
            return (score, None);
        }

        if depth <= 0 || board.is_full() {
            return (evaluate_board(board, self.engine), None);
        }

        let moves = valid_moves(board);
        if moves.is_empty() {
            return (evaluate_board(board, self.engine), None);
        }

        let stone = if maximizing {
            self.engine
        } else {
            self.engine.opponent()
        };

        let mut best_move = None;
        let mut best_score = if maximizing { -INF } else { INF };

        for mov in moves {
            let score = {
                let mut probe = board.probe(mov, stone);
                self.search_node(&mut probe, depth - 1, alpha, beta, !maximizing, Some(mov))
                    .0
            };

            if maximizing {
                if best_move.is_none() || score > best_score {
                    best_score = score;
                    best_move = Some(mov);
                }
                alpha = alpha.max(score);
            } else {
                if best_move.is_none() || score < best_score {
                    best_score = score;
                    best_move = Some(mov);
                }
                beta = beta.min(score);
            }

            if beta <= alpha || self.is_stopped() {
                break;
            }
        }

        (best_score, best_move)
    }
}
