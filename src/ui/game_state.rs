//! Game session management for the Gomoku GUI
//!
//! Everything here is egui-free: the app only forwards clicks and keys and
//! calls [`GameSession::update`] once per frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::advisor::{AiPlayer, MoveAdvisor};
use crate::config::Settings;
use crate::engine::{random_move, AIEngine, DecisionKind, MoveResult};
use crate::error::{PlaceError, UndoError};
use crate::game::{GameState, GameStats, Outcome};
use crate::{Pos, Stone};

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
        /// Stops the worker's search when the decision is abandoned
        stopped: Arc<AtomicBool>,
    },
}

/// Per-turn clock
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// One human against the machine, across consecutive games.
pub struct GameSession {
    pub game: GameState,
    pub stats: GameStats,
    pub move_timer: MoveTimer,
    pub last_ai_result: Option<MoveResult>,
    pub message: Option<String>,
    settings: Settings,
    turn_limit: Duration,
    ai_state: AiState,
    advisor: Option<Arc<dyn MoveAdvisor>>,
    game_ended_at: Option<Instant>,
    rng: StdRng,
}

impl GameSession {
    pub fn new(settings: Settings, advisor: Option<Arc<dyn MoveAdvisor>>) -> Self {
        info!(
            board_size = settings.board_size,
            human = settings.human_color.name(),
            depth = settings.search_depth,
            advisor = advisor.is_some(),
            "starting session"
        );
        Self {
            game: GameState::new(settings.board_size),
            stats: GameStats::default(),
            move_timer: MoveTimer::default(),
            last_ai_result: None,
            message: None,
            turn_limit: settings.turn_limit(),
            settings,
            ai_state: AiState::Idle,
            advisor,
            game_ended_at: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn has_advisor(&self) -> bool {
        self.advisor.is_some()
    }

    /// Override the per-turn time limit
    pub fn set_turn_limit(&mut self, limit: Duration) {
        self.turn_limit = limit;
    }

    pub fn turn_limit(&self) -> Duration {
        self.turn_limit
    }

    pub fn human_color(&self) -> Stone {
        self.settings.human_color
    }

    pub fn ai_color(&self) -> Stone {
        self.settings.ai_color()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        !self.game.is_game_over() && self.game.current() == self.human_color()
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.game.is_game_over() && self.game.current() == self.ai_color()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Time left on the current turn
    pub fn remaining_time(&self) -> Duration {
        self.turn_limit.saturating_sub(self.move_timer.elapsed())
    }

    /// Winning line of a finished game
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        self.game.winning_line()
    }

    /// Time until the automatic new game, while one is scheduled
    pub fn auto_new_game_in(&self) -> Option<Duration> {
        if !self.settings.auto_new_game {
            return None;
        }
        self.game_ended_at
            .map(|t| self.settings.auto_new_game_delay().saturating_sub(t.elapsed()))
    }

    /// Per-frame housekeeping: collect the AI move, enforce the turn clock,
    /// restart finished games and start the AI when it is due.
    pub fn update(&mut self) {
        self.check_ai_result();
        self.check_timeout();
        self.check_auto_new_game();
        self.start_ai_thinking();
    }

    /// Place a stone for the human.
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<Outcome, PlaceError> {
        if self.game.is_game_over() {
            return Err(PlaceError::GameOver);
        }
        if self.is_ai_thinking() || !self.is_human_turn() {
            return Err(PlaceError::NotHumanTurn);
        }
        self.commit(pos)
    }

    /// Place a stone for the side to move and update clock and statistics.
    fn commit(&mut self, pos: Pos) -> Result<Outcome, PlaceError> {
        let outcome = self.game.place(pos)?;
        self.move_timer.stop();
        self.message = None;

        match outcome {
            Outcome::Continue => self.move_timer.start(),
            Outcome::Win(winner) => {
                self.stats.record(outcome, self.human_color());
                self.game_ended_at = Some(Instant::now());
                self.message = Some(if winner == self.human_color() {
                    "You win!".to_string()
                } else {
                    "AI wins!".to_string()
                });
                info!(winner = winner.name(), stats = ?self.stats, "game finished");
            }
            Outcome::Draw => {
                self.stats.record(outcome, self.human_color());
                self.game_ended_at = Some(Instant::now());
                self.message = Some("Draw: the board is full".to_string());
                info!(stats = ?self.stats, "game finished in a draw");
            }
        }
        Ok(outcome)
    }

    /// Start AI thinking on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }

        let board = self.game.board().clone();
        let color = self.game.current();
        let depth = self.settings.search_depth;
        let time_limit = self.remaining_time();
        let advisor = self.advisor.clone();
        let stopped = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stopped);

        let (tx, rx) = channel();

        thread::spawn(move || {
            let engine = AIEngine::with_depth(depth).with_stop_flag(worker_stop);
            let mut player = AiPlayer::new(engine, time_limit);
            if let Some(advisor) = advisor {
                player = player.with_advisor(advisor);
            }
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(player.choose_move(&board, color)),
                Err(e) => {
                    warn!(error = %e, "async runtime unavailable, using rule engine");
                    player.engine_mut().get_move_with_stats(&board, color)
                }
            };
            // The session may have abandoned this decision
            let _ = tx.send(result);
        });

        debug!(color = color.name(), "AI thinking");
        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            stopped,
        };
    }

    /// Drop the pending decision and tell its worker to stop searching.
    fn abandon_decision(&mut self) {
        let state = std::mem::replace(&mut self.ai_state, AiState::Idle);
        if let AiState::Thinking { stopped, .. } = state {
            debug!("abandoning pending AI decision");
            stopped.store(true, Ordering::Relaxed);
        }
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
                ..
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("AI worker stopped without a move");
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.move_timer.set_ai_time(elapsed);

            match move_result.best_move {
                Some(pos) => {
                    info!(%pos, kind = ?move_result.kind, ms = move_result.time_ms, "AI move");
                    if let Err(e) = self.commit(pos) {
                        warn!(error = %e, "AI move rejected");
                        self.message = Some(format!("AI move rejected: {e}"));
                    }
                }
                None => {
                    self.message = Some("AI could not find a move".to_string());
                }
            }
            self.last_ai_result = Some(move_result);
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Play a random move for the side to move once its clock runs out.
    ///
    /// A pending AI decision is abandoned.
    pub fn check_timeout(&mut self) {
        if self.game.is_game_over() || !self.move_timer.is_running() {
            return;
        }
        if self.move_timer.elapsed() < self.turn_limit {
            return;
        }

        let side = self.game.current();
        self.abandon_decision();

        let Some(pos) = random_move(self.game.board(), &mut self.rng) else {
            return;
        };
        warn!(side = side.name(), %pos, "turn time expired, playing random move");

        if side == self.ai_color() {
            self.last_ai_result = Some(MoveResult::external(pos, DecisionKind::Random, 0));
        }
        if self.commit(pos).is_ok() && !self.game.is_game_over() {
            self.message = Some(format!("Time's up: random move for {}", side.name()));
        }
    }

    /// Start a new game once the finished one has been shown long enough.
    pub fn check_auto_new_game(&mut self) {
        if matches!(self.auto_new_game_in(), Some(d) if d.is_zero()) {
            debug!("automatic new game");
            self.new_game();
        }
    }

    /// Take back moves until it is the human's turn again.
    ///
    /// Unlike [`GameState::undo`], which pops a single record, this also
    /// takes back the AI's reply, so up to two moves are undone.
    ///
    /// Only allowed on the human's turn with the game running and no AI
    /// decision pending.
    pub fn undo(&mut self) -> Result<(), UndoError> {
        if self.is_ai_thinking() {
            return Err(UndoError::DecisionPending);
        }
        if self.game.is_game_over() {
            return Err(UndoError::GameOver);
        }
        if !self.is_human_turn() {
            return Err(UndoError::NotHumanTurn);
        }

        self.game.undo()?;
        while !self.is_human_turn() && self.game.can_undo() {
            self.game.undo()?;
        }

        info!(moves = self.game.move_count(), "undo");
        self.last_ai_result = None;
        self.message = None;
        self.move_timer.start();
        Ok(())
    }

    /// Abandon the current game and start over with the same settings.
    pub fn new_game(&mut self) {
        self.game.new_game();
        self.abandon_decision();
        self.move_timer = MoveTimer::default();
        self.last_ai_result = None;
        self.message = None;
        self.game_ended_at = None;
        info!(stats = ?self.stats, "new game");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(Settings::default(), None)
    }

    fn stop_flag(session: &GameSession) -> Arc<AtomicBool> {
        match &session.ai_state {
            AiState::Thinking { stopped, .. } => Arc::clone(stopped),
            AiState::Idle => panic!("no decision pending"),
        }
    }

    fn wait_for_ai(session: &mut GameSession) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while session.is_ai_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            session.check_ai_result();
        }
    }

    #[test]
    fn test_human_moves_first_as_black() {
        let session = session();
        assert!(session.is_human_turn());
        assert!(!session.is_ai_turn());
        assert!(session.remaining_time() <= Duration::from_secs(30));
    }

    #[test]
    fn test_ai_replies_to_human_move() {
        let mut session = session();
        session.try_place_stone(Pos::new(7, 7)).unwrap();
        assert!(session.is_ai_turn());
        assert_eq!(
            session.try_place_stone(Pos::new(0, 0)),
            Err(PlaceError::NotHumanTurn)
        );

        session.start_ai_thinking();
        assert!(session.is_ai_thinking());
        wait_for_ai(&mut session);

        assert!(session.is_human_turn());
        assert_eq!(session.game.move_count(), 2);
        let result = session.last_ai_result.as_ref().unwrap();
        assert_eq!(session.game.last_move(), result.best_move);
    }

    #[test]
    fn test_undo_rules() {
        let mut session = session();
        assert_eq!(session.undo(), Err(UndoError::NoHistory));

        session.try_place_stone(Pos::new(7, 7)).unwrap();
        assert_eq!(session.undo(), Err(UndoError::NotHumanTurn));

        session.start_ai_thinking();
        assert_eq!(session.undo(), Err(UndoError::DecisionPending));

        wait_for_ai(&mut session);
        session.undo().unwrap();
        assert!(session.is_human_turn());
        assert_eq!(session.game.move_count(), 0);
        assert!(session.game.board().is_board_empty());
    }

    #[test]
    fn test_timeout_plays_random_move_for_human() {
        let mut session = session();
        session.set_turn_limit(Duration::ZERO);
        session.check_timeout();
        assert_eq!(session.game.move_count(), 1);
        assert_eq!(session.game.current(), Stone::White);
    }

    #[test]
    fn test_timeout_abandons_pending_decision() {
        let mut session = session();
        session.try_place_stone(Pos::new(7, 7)).unwrap();
        session.start_ai_thinking();
        let stopped = stop_flag(&session);
        assert!(!stopped.load(Ordering::Relaxed));
        session.set_turn_limit(Duration::ZERO);
        session.check_timeout();

        assert!(stopped.load(Ordering::Relaxed));
        assert!(!session.is_ai_thinking());
        assert_eq!(session.game.move_count(), 2);
        assert_eq!(
            session.last_ai_result.as_ref().map(|r| r.kind),
            Some(DecisionKind::Random)
        );
    }

    #[test]
    fn test_game_end_updates_stats_and_restarts() {
        let mut settings = Settings::default();
        settings.auto_new_game_delay_ms = 1;
        let mut session = GameSession::new(settings, None);

        for col in 0..4 {
            session.commit(Pos::new(3, col)).unwrap();
            session.commit(Pos::new(5, col)).unwrap();
        }
        assert_eq!(
            session.commit(Pos::new(3, 4)),
            Ok(Outcome::Win(Stone::Black))
        );
        assert_eq!(session.stats.human_wins, 1);
        assert_eq!(session.undo(), Err(UndoError::GameOver));
        assert!(session.auto_new_game_in().is_some());

        thread::sleep(Duration::from_millis(5));
        session.check_auto_new_game();
        assert!(session.game.board().is_board_empty());
        assert!(!session.game.is_game_over());
        assert_eq!(session.stats.human_wins, 1);
    }

    #[test]
    fn test_no_auto_restart_when_disabled() {
        let mut settings = Settings::default();
        settings.auto_new_game = false;
        let mut session = GameSession::new(settings, None);
        for col in 0..4 {
            session.commit(Pos::new(3, col)).unwrap();
            session.commit(Pos::new(5, col)).unwrap();
        }
        session.commit(Pos::new(3, 4)).unwrap();
        session.check_auto_new_game();
        assert!(session.game.is_game_over());
    }

    #[test]
    fn test_human_white_lets_ai_open() {
        let mut settings = Settings::default();
        settings.human_color = Stone::White;
        let mut session = GameSession::new(settings, None);
        assert!(session.is_ai_turn());
        session.start_ai_thinking();
        wait_for_ai(&mut session);
        assert_eq!(session.game.move_count(), 1);
        assert!(session.is_human_turn());
    }

    #[test]
    fn test_new_game_stops_pending_search() {
        let mut settings = Settings::default();
        settings.search_depth = 6;
        let mut session = GameSession::new(settings, None);
        session.try_place_stone(Pos::new(7, 7)).unwrap();
        session.start_ai_thinking();
        let stopped = stop_flag(&session);

        session.new_game();
        assert!(stopped.load(Ordering::Relaxed));
        assert!(!session.is_ai_thinking());
        assert!(session.game.board().is_board_empty());
        assert!(session.is_human_turn());
    }
}
