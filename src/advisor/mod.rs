//! LLM move advisor with rule-engine fallback
//!
//! [`AiPlayer`] asks an optional [`MoveAdvisor`] first and races it against
//! the turn clock. Any failure (timeout, transport, malformed or illegal
//! reply) falls back to the [`AIEngine`] pipeline.

mod client;
mod prompt;

pub use client::OpenAiAdvisor;
pub use prompt::{build_prompt, parse_reply, render_board, SYSTEM_PROMPT};

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::{Board, Pos, Stone};
use crate::engine::{AIEngine, DecisionKind, MoveResult};
use crate::error::AdvisorError;

/// Source of raw move suggestions.
#[async_trait::async_trait]
pub trait MoveAdvisor: Send + Sync {
    /// Ask for a move for `side`. Returns the reply text unparsed.
    async fn suggest(&self, board: &Board, side: Stone) -> Result<String, AdvisorError>;
}

/// Machine player: advisor first, rule engine as fallback.
pub struct AiPlayer {
    engine: AIEngine,
    advisor: Option<Arc<dyn MoveAdvisor>>,
    time_limit: Duration,
}

impl AiPlayer {
    /// Player using the rule engine only.
    pub fn new(engine: AIEngine, time_limit: Duration) -> Self {
        Self {
            engine,
            advisor: None,
            time_limit,
        }
    }

    /// Attach an advisor consulted before the rule engine.
    pub fn with_advisor(mut self, advisor: Arc<dyn MoveAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn has_advisor(&self) -> bool {
        self.advisor.is_some()
    }

    pub fn engine_mut(&mut self) -> &mut AIEngine {
        &mut self.engine
    }

    /// Ask the advisor and validate its reply against `board`.
    pub async fn ask_advisor(&self, board: &Board, side: Stone) -> Result<Pos, AdvisorError> {
        let advisor = self.advisor.as_ref().ok_or(AdvisorError::Disabled)?;
        let reply = tokio::time::timeout(self.time_limit, advisor.suggest(board, side))
            .await
            .map_err(|_| AdvisorError::Timeout(self.time_limit))??;
        parse_reply(&reply, board)
    }

    /// Choose a move for `side`.
    ///
    /// The advisor's move is used when it arrives within the time limit and
    /// names an empty cell on the board; otherwise the rule engine decides.
    pub async fn choose_move(&mut self, board: &Board, side: Stone) -> MoveResult {
        let start = Instant::now();

        if self.advisor.is_some() {
            match self.ask_advisor(board, side).await {
                Ok(pos) => {
                    info!(%pos, elapsed_ms = start.elapsed().as_millis() as u64, "advisor move accepted");
                    return MoveResult::external(
                        pos,
                        DecisionKind::Advisor,
                        start.elapsed().as_millis() as u64,
                    );
                }
                Err(e) => warn!(error = %e, "advisor failed, using rule engine"),
            }
        }

        let mut result = self.engine.get_move_with_stats(board, side);
        result.time_ms = start.elapsed().as_millis() as u64;
        debug!(kind = ?result.kind, pos = ?result.best_move, "rule engine move");
        result
    }
}
