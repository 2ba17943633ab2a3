//! Decision pipeline choosing one move per turn
//!
//! The engine runs a fixed priority list for the side to move and returns
//! the first step that yields a move:
//!
//! 1. **Immediate win**: own five, first in row-major order
//! 2. **Block win**: opponent's five
//! 3. **Four**: own four-or-longer
//! 4. **Block four**: opponent's four-or-longer
//! 5. **Three**: best own open three by cell evaluation
//! 6. **Block three**: best opponent open three by cell evaluation
//! 7. **Alpha-Beta**: fixed-depth minimax
//! 8. **Weighted**: offence plus 1.2x defence cell evaluation
//! 9. **Random**: uniform over empty cells
//!
//! # Example
//!
//! ```
//! use wuziqi::{AIEngine, Board, Pos, Stone};
//!
//! let mut engine = AIEngine::with_seed(7);
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let result = engine.get_move_with_stats(&board, Stone::White);
//! println!("Best move: {:?}", result.best_move);
//! println!("Decided by: {:?}", result.kind);
//! ```

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::board::{Board, Pos, Stone};
use crate::eval::evaluate_position;
use crate::search::{
    detect_live_three, find_live_four, find_winning_move, find_winning_moves, SearchResult,
    Searcher, DEFAULT_DEPTH, WIN_SCORE,
};

/// Which step produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DecisionKind {
    /// Completes five for the side to move
    ImmediateWin,
    /// Occupies the opponent's winning cell
    BlockWin,
    /// Makes four or more in a row
    LiveFour,
    /// Occupies a cell where the opponent would make four
    BlockFour,
    /// Makes an open three
    LiveThree,
    /// Occupies a cell where the opponent would make an open three
    BlockThree,
    /// Alpha-beta search result
    AlphaBeta,
    /// Combined offence/defence cell evaluation
    Weighted,
    /// Uniform random empty cell
    Random,
    /// Move suggested by the external advisor
    Advisor,
}

impl DecisionKind {
    pub fn label(self) -> &'static str {
        match self {
            DecisionKind::ImmediateWin => "Immediate win",
            DecisionKind::BlockWin => "Block win",
            DecisionKind::LiveFour => "Four",
            DecisionKind::BlockFour => "Block four",
            DecisionKind::LiveThree => "Open three",
            DecisionKind::BlockThree => "Block three",
            DecisionKind::AlphaBeta => "Alpha-Beta",
            DecisionKind::Weighted => "Weighted",
            DecisionKind::Random => "Random",
            DecisionKind::Advisor => "Advisor",
        }
    }
}

/// Result of a move decision with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen move, `None` only when the board is full
    pub best_move: Option<Pos>,
    /// Score attached by the deciding step
    pub score: i32,
    /// Step that produced the move
    pub kind: DecisionKind,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Search nodes visited
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn rule(pos: Pos, score: i32, kind: DecisionKind, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score,
            kind,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            kind: DecisionKind::AlphaBeta,
            time_ms,
            nodes: result.nodes,
        }
    }

    /// Result for a move chosen outside the pipeline
    #[inline]
    pub fn external(pos: Pos, kind: DecisionKind, time_ms: u64) -> Self {
        Self::rule(pos, 0, kind, time_ms)
    }
}

/// Rule-based Gomoku engine.
///
/// Stateless between calls apart from the random source used by the last
/// fallback step.
pub struct AIEngine {
    /// Alpha-beta depth in plies
    depth: i8,
    rng: StdRng,
    stopped: Option<Arc<AtomicBool>>,
}

impl AIEngine {
    /// Create an engine with the default depth and an entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            rng: StdRng::from_entropy(),
            stopped: None,
        }
    }

    /// Create an engine with a fixed RNG seed for reproducible fallbacks.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            rng: StdRng::seed_from_u64(seed),
            stopped: None,
        }
    }

    /// Create an engine with the given search depth.
    #[must_use]
    pub fn with_depth(depth: i8) -> Self {
        let mut engine = Self::new();
        engine.set_depth(depth);
        engine
    }

    /// Cut the alpha-beta step short once `stopped` is set.
    #[must_use]
    pub fn with_stop_flag(mut self, stopped: Arc<AtomicBool>) -> Self {
        self.stopped = Some(stopped);
        self
    }

    pub fn set_depth(&mut self, depth: i8) {
        self.depth = depth.max(0);
    }

    pub fn depth(&self) -> i8 {
        self.depth
    }

    /// Get the chosen move only.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, color: Stone) -> Option<Pos> {
        self.get_move_with_stats(board, color).best_move
    }

    /// Run the decision pipeline for `color`.
    ///
    /// Returns a result with `best_move == None` only if the board has no
    /// empty cell.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, color: Stone) -> MoveResult {
        let start = Instant::now();
        let elapsed = |start: Instant| start.elapsed().as_millis() as u64;
        let opponent = color.opponent();

        // 1. Own immediate win
        if let Some(pos) = find_winning_move(board, color) {
            debug!(%pos, "immediate win");
            return MoveResult::rule(pos, WIN_SCORE, DecisionKind::ImmediateWin, elapsed(start));
        }

        // 2. Opponent's immediate win
        let threats = find_winning_moves(board, opponent);
        if let Some(&pos) = threats.first() {
            debug!(%pos, threats = threats.len(), "blocking opponent win");
            return MoveResult::rule(pos, -WIN_SCORE, DecisionKind::BlockWin, elapsed(start));
        }

        // 3. Own four
        if let Some(pos) = find_live_four(board, color) {
            debug!(%pos, "making four");
            let score = evaluate_position(board, pos, color);
            return MoveResult::rule(pos, score, DecisionKind::LiveFour, elapsed(start));
        }

        // 4. Opponent's four
        if let Some(pos) = find_live_four(board, opponent) {
            debug!(%pos, "blocking opponent four");
            let score = evaluate_position(board, pos, opponent);
            return MoveResult::rule(pos, score, DecisionKind::BlockFour, elapsed(start));
        }

        // 5. Own open threes
        if let Some((pos, score)) = best_by_evaluation(board, &detect_live_three(board, color), color)
        {
            debug!(%pos, score, "making open three");
            return MoveResult::rule(pos, score, DecisionKind::LiveThree, elapsed(start));
        }

        // 6. Opponent's open threes
        if let Some((pos, score)) =
            best_by_evaluation(board, &detect_live_three(board, opponent), opponent)
        {
            debug!(%pos, score, "blocking opponent open three");
            return MoveResult::rule(pos, score, DecisionKind::BlockThree, elapsed(start));
        }

        // 7. Alpha-beta
        let mut searcher = Searcher::new(color);
        if let Some(stopped) = &self.stopped {
            searcher = searcher.with_stop_flag(Arc::clone(stopped));
        }
        let result = searcher.search(board, self.depth);
        if let Some(pos) = result.best_move {
            debug!(%pos, score = result.score, nodes = result.nodes, depth = self.depth, "alpha-beta move");
            return MoveResult::from_alphabeta(result, elapsed(start));
        }
        trace!(nodes = result.nodes, "alpha-beta found no move");

        // 8. Weighted offence/defence
        if let Some((pos, score)) = weighted_move(board, color) {
            debug!(%pos, score, "weighted fallback");
            return MoveResult {
                best_move: Some(pos),
                score,
                kind: DecisionKind::Weighted,
                time_ms: elapsed(start),
                nodes: result.nodes,
            };
        }

        // 9. Random
        let best_move = random_move(board, &mut self.rng);
        debug!(pos = ?best_move, "random fallback");
        MoveResult {
            best_move,
            score: 0,
            kind: DecisionKind::Random,
            time_ms: elapsed(start),
            nodes: result.nodes,
        }
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Highest `evaluate_position` among `candidates`; the first wins ties.
fn best_by_evaluation(board: &Board, candidates: &[Pos], player: Stone) -> Option<(Pos, i32)> {
    let mut best: Option<(Pos, i32)> = None;
    for &pos in candidates {
        let score = evaluate_position(board, pos, player);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((pos, score));
        }
    }
    best
}

/// Empty cell maximizing `own + opponent * 12 / 10`, row-major tie-break.
pub fn weighted_move(board: &Board, color: Stone) -> Option<(Pos, i32)> {
    let opponent = color.opponent();
    let mut best: Option<(Pos, i32)> = None;
    for pos in board.positions().filter(|&p| board.is_empty(p)) {
        let attack = evaluate_position(board, pos, color);
        let defence = evaluate_position(board, pos, opponent);
        let score = attack + defence * 12 / 10;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((pos, score));
        }
    }
    best
}

/// Uniform random empty cell, `None` on a full board.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Pos> {
    board.empty_cells().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: &[((u8, u8), Stone)]) -> Board {
        let mut board = Board::new();
        for &((r, c), s) in stones {
            board.place_stone(Pos::new(r, c), s);
        }
        board
    }

    #[test]
    fn test_engine_default_depth() {
        let engine = AIEngine::default();
        assert_eq!(engine.depth(), DEFAULT_DEPTH);
        let mut engine = AIEngine::with_depth(3);
        assert_eq!(engine.depth(), 3);
        engine.set_depth(-1);
        assert_eq!(engine.depth(), 0);
    }

    #[test]
    fn test_engine_finds_immediate_win_first_in_scan_order() {
        // Two winning cells for White: (1,12) comes before (7,9)
        let mut stones = vec![((7, 4), Stone::Black), ((6, 12), Stone::Black)];
        for col in 5..9 {
            stones.push(((7, col), Stone::White));
        }
        for row in 2..6 {
            stones.push(((row, 12), Stone::White));
        }
        let board = board_with(&stones);

        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::ImmediateWin);
        assert_eq!(result.best_move, Some(Pos::new(1, 12)));
    }

    #[test]
    fn test_engine_prefers_win_over_block() {
        let mut stones = Vec::new();
        for col in 0..4 {
            stones.push(((2, col), Stone::Black));
            stones.push(((10, col), Stone::White));
        }
        let board = board_with(&stones);

        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::ImmediateWin);
        assert_eq!(result.best_move, Some(Pos::new(10, 4)));
    }

    #[test]
    fn test_engine_blocks_single_opponent_win() {
        let mut stones = Vec::new();
        for col in 0..4 {
            stones.push(((9, col), Stone::Black));
        }
        stones.push(((12, 12), Stone::White));
        let board = board_with(&stones);

        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::BlockWin);
        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
    }

    #[test]
    fn test_engine_blocks_open_four() {
        let mut stones = Vec::new();
        for col in 5..9 {
            stones.push(((7, col), Stone::Black));
        }
        stones.push(((0, 0), Stone::White));
        let board = board_with(&stones);

        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::BlockWin);
        let mov = result.best_move.unwrap();
        assert!(mov == Pos::new(7, 4) || mov == Pos::new(7, 9));
    }

    #[test]
    fn test_engine_makes_own_four() {
        let board = board_with(&[
            ((5, 5), Stone::White),
            ((5, 6), Stone::White),
            ((5, 7), Stone::White),
            ((12, 0), Stone::Black),
        ]);
        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::LiveFour);
        assert_eq!(result.best_move, Some(Pos::new(5, 4)));
    }

    #[test]
    fn test_engine_blocks_opponent_four() {
        let board = board_with(&[
            ((5, 5), Stone::Black),
            ((5, 6), Stone::Black),
            ((5, 7), Stone::Black),
            ((12, 0), Stone::White),
        ]);
        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::BlockFour);
        assert_eq!(result.best_move, Some(Pos::new(5, 4)));
    }

    #[test]
    fn test_engine_extends_open_two() {
        let board = board_with(&[
            ((7, 7), Stone::White),
            ((7, 8), Stone::White),
            ((0, 0), Stone::Black),
        ]);
        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::LiveThree);
        let mov = result.best_move.unwrap();
        assert!(mov == Pos::new(7, 6) || mov == Pos::new(7, 9));
    }

    #[test]
    fn test_engine_blocks_opponent_open_two() {
        let board = board_with(&[
            ((7, 7), Stone::Black),
            ((7, 8), Stone::Black),
            ((0, 0), Stone::White),
        ]);
        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::BlockThree);
    }

    #[test]
    fn test_engine_searches_quiet_position() {
        let board = board_with(&[((7, 7), Stone::Black)]);
        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::AlphaBeta);
        let mov = result.best_move.unwrap();
        assert!(board.is_empty(mov));
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_stopped_engine_still_answers() {
        let board = board_with(&[((7, 7), Stone::Black)]);
        let stopped = Arc::new(AtomicBool::new(true));
        let mut engine = AIEngine::with_seed(1).with_stop_flag(stopped);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.kind, DecisionKind::AlphaBeta);
        assert_eq!(result.nodes, 3);
        assert!(board.is_empty(result.best_move.unwrap()));
    }

    #[test]
    fn test_engine_empty_board() {
        let board = Board::new();
        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::Black);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_engine_full_board_has_no_move() {
        let mut board = Board::with_size(9);
        for pos in board.empty_cells() {
            let stone = if (pos.row / 2 + pos.col) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place_stone(pos, stone);
        }
        let mut engine = AIEngine::with_seed(1);
        let result = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(result.best_move, None);
        assert_eq!(result.kind, DecisionKind::Random);
    }

    #[test]
    fn test_engine_leaves_board_unchanged() {
        let board = board_with(&[
            ((7, 7), Stone::Black),
            ((7, 8), Stone::White),
            ((8, 8), Stone::Black),
        ]);
        let snapshot = board.clone();
        let mut engine = AIEngine::with_seed(1);
        let _ = engine.get_move_with_stats(&board, Stone::White);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_weighted_move_prefers_defence() {
        // Same chain shape for both sides; defence carries the 1.2 factor
        let board = board_with(&[((2, 2), Stone::White), ((12, 12), Stone::Black)]);
        let (pos, _) = weighted_move(&board, Stone::White).unwrap();
        assert!(pos.row.abs_diff(12) <= 1 && pos.col.abs_diff(12) <= 1);
    }

    #[test]
    fn test_random_move_is_seeded() {
        let mut board = Board::with_size(9);
        board.place_stone(Pos::new(0, 0), Stone::Black);
        let a = random_move(&board, &mut StdRng::seed_from_u64(42));
        let b = random_move(&board, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(board.is_empty(a.unwrap()));
    }

    #[test]
    fn test_random_move_full_board() {
        let mut board = Board::with_size(9);
        for pos in board.empty_cells() {
            board.place_stone(pos, Stone::White);
        }
        assert_eq!(random_move(&board, &mut StdRng::seed_from_u64(0)), None);
    }
}
