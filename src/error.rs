use std::path::PathBuf;
use std::time::Duration;

use crate::board::Pos;

/// Errors from placing a stone on the game board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("the game is already over")]
    GameOver,

    #[error("cell {0} is already occupied")]
    Occupied(Pos),

    #[error("cell {0} is outside the board")]
    OutOfBounds(Pos),

    #[error("it is not the human's turn")]
    NotHumanTurn,
}

/// Errors from taking back a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UndoError {
    #[error("cannot undo after the game has ended")]
    GameOver,

    #[error("no move to undo")]
    NoHistory,

    #[error("undo is only allowed on the human's turn")]
    NotHumanTurn,

    #[error("the engine is still deciding its move")]
    DecisionPending,
}

/// Errors from asking the external advisor for a move.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("advisor request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("advisor returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("advisor response had no content")]
    EmptyResponse,

    #[error("advisor reply is not a coordinate: {0:?}")]
    Malformed(String),

    #[error("advisor suggested ({row}, {col}), outside the board")]
    OutOfBounds { row: i64, col: i64 },

    #[error("advisor suggested occupied cell {0}")]
    Occupied(Pos),

    #[error("advisor did not answer within {0:?}")]
    Timeout(Duration),

    #[error("advisor is disabled")]
    Disabled,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
