//! Gomoku decision engine
//!
//! Free-style Gomoku on a square board (15x15 by default): five or more in
//! a row wins, a full board without a five is a draw. Black moves first.
//!
//! # Architecture
//!
//! - [`board`]: Board grid with scoped probing
//! - [`rules`]: Line scanning, win and draw detection
//! - [`eval`]: Chain pattern scores and cell evaluation
//! - [`search`]: Threat detection, candidate generation, alpha-beta
//! - [`engine`]: Prioritized decision pipeline
//! - [`advisor`]: Optional LLM advisor with engine fallback
//! - [`game`]: Turn, history, undo and statistics
//! - [`config`]: Settings from TOML, environment and CLI
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use wuziqi::{AIEngine, GameState, Pos, Stone};
//!
//! let mut game = GameState::new(15);
//! game.place(Pos::new(7, 7)).unwrap();
//!
//! let mut engine = AIEngine::with_seed(1);
//! if let Some(pos) = engine.get_move(game.board(), Stone::White) {
//!     game.place(pos).unwrap();
//!     println!("AI plays at {pos}");
//! }
//! ```

pub mod advisor;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE};
pub use config::Settings;
pub use engine::{AIEngine, DecisionKind, MoveResult};
pub use game::{GameState, GameStats, Outcome};
