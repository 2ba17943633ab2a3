//! Game state: placement, undo history and session statistics

use tracing::{debug, info};

use crate::board::{Board, Pos, Stone};
use crate::error::{PlaceError, UndoError};
use crate::rules::{check_winner, find_winning_line, is_draw};

/// Snapshot taken just before a placement.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    /// Cell the recorded move was played on
    pub pos: Pos,
    /// Player who made the recorded move
    pub player: Stone,
    pub prior_last_move: Option<Pos>,
    pub prior_winner: Stone,
    pub prior_game_over: bool,
    pub prior_board: Board,
}

/// Result of a successful placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Game goes on with the other side to move
    Continue,
    /// The placing side completed five
    Win(Stone),
    /// The board filled up without a winner
    Draw,
}

/// Board plus turn, result and history.
///
/// Only [`GameState::place`] and [`GameState::undo`] change it; winner and
/// game-over are derived after every placement.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Stone,
    game_over: bool,
    winner: Stone,
    last_move: Option<Pos>,
    history: Vec<MoveRecord>,
}

impl GameState {
    /// New game on an empty `size` x `size` board. Black moves first.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::with_size(size),
            current: Stone::Black,
            game_over: false,
            winner: Stone::Empty,
            last_move: None,
            history: Vec::new(),
        }
    }

    /// Clear the board and history, keeping the board size.
    pub fn new_game(&mut self) {
        *self = Self::new(self.board.size());
        debug!("game reset");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move (the side that moved last once the game is over)
    #[inline]
    pub fn current(&self) -> Stone {
        self.current
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Winner, `Stone::Empty` while playing or after a draw
    #[inline]
    pub fn winner(&self) -> Stone {
        self.winner
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Place a stone for the side to move.
    ///
    /// On success the move is recorded, the result recomputed and the turn
    /// passed on unless the game ended. On error nothing changes.
    pub fn place(&mut self, pos: Pos) -> Result<Outcome, PlaceError> {
        if self.game_over {
            return Err(PlaceError::GameOver);
        }
        if !self.board.contains_pos(pos) {
            return Err(PlaceError::OutOfBounds(pos));
        }
        if !self.board.is_empty(pos) {
            return Err(PlaceError::Occupied(pos));
        }

        let player = self.current;
        self.history.push(MoveRecord {
            pos,
            player,
            prior_last_move: self.last_move,
            prior_winner: self.winner,
            prior_game_over: self.game_over,
            prior_board: self.board.clone(),
        });

        self.board.place_stone(pos, player);
        self.last_move = Some(pos);
        debug!(%pos, player = player.name(), "stone placed");

        self.winner = check_winner(&self.board, pos);
        let outcome = if self.winner != Stone::Empty {
            Outcome::Win(self.winner)
        } else if is_draw(&self.board) {
            Outcome::Draw
        } else {
            Outcome::Continue
        };

        match outcome {
            Outcome::Continue => self.current = player.opponent(),
            Outcome::Win(winner) => {
                self.game_over = true;
                info!(winner = winner.name(), moves = self.history.len(), "game over");
            }
            Outcome::Draw => {
                self.game_over = true;
                info!(moves = self.history.len(), "game over: draw");
            }
        }
        Ok(outcome)
    }

    /// Check whether [`GameState::undo`] would succeed
    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.game_over && !self.history.is_empty()
    }

    /// Restore the state from before the newest placement.
    pub fn undo(&mut self) -> Result<(), UndoError> {
        if self.game_over {
            return Err(UndoError::GameOver);
        }
        let record = self.history.pop().ok_or(UndoError::NoHistory)?;
        debug!(pos = %record.pos, player = record.player.name(), "move undone");

        self.board = record.prior_board;
        self.current = record.player;
        self.last_move = record.prior_last_move;
        self.winner = record.prior_winner;
        self.game_over = record.prior_game_over;
        Ok(())
    }

    /// Winning line through the last move, if the game was won
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        if self.winner == Stone::Empty {
            return None;
        }
        self.last_move.and_then(|pos| find_winning_line(&self.board, pos))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(crate::board::DEFAULT_BOARD_SIZE)
    }
}

/// Results across the games of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub human_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
}

impl GameStats {
    /// Count a finished game. `Continue` is ignored.
    pub fn record(&mut self, outcome: Outcome, human: Stone) {
        match outcome {
            Outcome::Win(winner) if winner == human => self.human_wins += 1,
            Outcome::Win(_) => self.ai_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Continue => {}
        }
    }

    pub fn games(&self) -> u32 {
        self.human_wins + self.ai_wins + self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_black_first() {
        let game = GameState::new(15);
        assert_eq!(game.current(), Stone::Black);
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), Stone::Empty);
        assert_eq!(game.last_move(), None);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_place_switches_turn() {
        let mut game = GameState::new(15);
        assert_eq!(game.place(Pos::new(7, 7)), Ok(Outcome::Continue));
        assert_eq!(game.current(), Stone::White);
        assert_eq!(game.board().get(Pos::new(7, 7)), Stone::Black);
        assert_eq!(game.last_move(), Some(Pos::new(7, 7)));
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_place_rejections_leave_state() {
        let mut game = GameState::new(15);
        game.place(Pos::new(7, 7)).unwrap();
        assert_eq!(
            game.place(Pos::new(7, 7)),
            Err(PlaceError::Occupied(Pos::new(7, 7)))
        );
        assert_eq!(
            game.place(Pos::new(15, 2)),
            Err(PlaceError::OutOfBounds(Pos::new(15, 2)))
        );
        assert_eq!(game.current(), Stone::White);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = GameState::new(15);
        for i in 0..4 {
            game.place(Pos::new(7, i)).unwrap();
            game.place(Pos::new(8, i)).unwrap();
        }
        assert_eq!(game.place(Pos::new(7, 4)), Ok(Outcome::Win(Stone::Black)));
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Stone::Black);
        assert_eq!(game.current(), Stone::Black);
        assert_eq!(game.winning_line().map(|l| l.len()), Some(5));
        assert_eq!(game.place(Pos::new(0, 14)), Err(PlaceError::GameOver));
        assert_eq!(game.undo(), Err(UndoError::GameOver));
    }

    #[test]
    fn test_undo_restores_exact_state() {
        let mut game = GameState::new(15);
        game.place(Pos::new(7, 7)).unwrap();
        let board_before = game.board().clone();
        let current_before = game.current();
        let last_before = game.last_move();

        game.place(Pos::new(7, 8)).unwrap();
        game.undo().unwrap();

        assert_eq!(game.board(), &board_before);
        assert_eq!(game.current(), current_before);
        assert_eq!(game.last_move(), last_before);
        assert_eq!(game.winner(), Stone::Empty);
        assert!(!game.is_game_over());
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_undo_without_history() {
        let mut game = GameState::new(15);
        assert_eq!(game.undo(), Err(UndoError::NoHistory));
    }

    #[test]
    fn test_new_game_clears_history() {
        let mut game = GameState::new(9);
        game.place(Pos::new(4, 4)).unwrap();
        game.new_game();
        assert_eq!(game.move_count(), 0);
        assert!(game.board().is_board_empty());
        assert_eq!(game.board().size(), 9);
    }

    #[test]
    fn test_draw_when_board_fills() {
        let mut game = GameState::new(9);
        // Fill in an order that never lines up five: alternate colours by
        // stripes, placing each colour's cells in turn.
        let mut black = Vec::new();
        let mut white = Vec::new();
        for pos in game.board().clone().positions() {
            if (pos.row / 2 + pos.col) % 2 == 0 {
                black.push(pos);
            } else {
                white.push(pos);
            }
        }
        assert_eq!(black.len(), 41);
        assert_eq!(white.len(), 40);

        let mut last = Outcome::Continue;
        for i in 0..black.len() {
            last = game.place(black[i]).unwrap();
            if i < white.len() {
                last = game.place(white[i]).unwrap();
            }
        }
        assert_eq!(last, Outcome::Draw);
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Stone::Empty);
        assert_eq!(game.winning_line(), None);
    }

    #[test]
    fn test_stats_record() {
        let mut stats = GameStats::default();
        stats.record(Outcome::Win(Stone::Black), Stone::Black);
        stats.record(Outcome::Win(Stone::White), Stone::Black);
        stats.record(Outcome::Win(Stone::White), Stone::Black);
        stats.record(Outcome::Draw, Stone::Black);
        stats.record(Outcome::Continue, Stone::Black);
        assert_eq!(
            stats,
            GameStats {
                human_wins: 1,
                ai_wins: 2,
                draws: 1
            }
        );
        assert_eq!(stats.games(), 4);
    }
}
