//! Pattern scores for Gomoku evaluation
//!
//! One table maps a chain (length, blocked ends) to a score. Both the
//! single-cell evaluation and the whole-board evaluation read from it.

use crate::rules::LineInfo;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    // Open chains (no blocked end)
    /// Open five or longer
    pub const OPEN_FIVE: i32 = 1_000_000;
    /// Open four: _OOOO_
    pub const OPEN_FOUR: i32 = 100_000;
    /// Open three: _OOO_
    pub const OPEN_THREE: i32 = 10_000;
    /// Open two: _OO_
    pub const OPEN_TWO: i32 = 1_000;

    // Chains with exactly one blocked end
    /// Five or longer against an edge or opponent stone
    pub const CLOSED_FIVE: i32 = 100_000;
    /// Closed four: XOOOO_
    pub const CLOSED_FOUR: i32 = 10_000;
    /// Closed three: XOOO_
    pub const CLOSED_THREE: i32 = 1_000;
    /// Closed two: XOO_
    pub const CLOSED_TWO: i32 = 100;
}

/// Score of a single chain.
///
/// Chains blocked at both ends and single stones are worth nothing.
#[inline]
#[must_use]
pub fn chain_score(length: u32, blocked: u8) -> i32 {
    match (blocked, length) {
        (0, l) if l >= 5 => PatternScore::OPEN_FIVE,
        (0, 4) => PatternScore::OPEN_FOUR,
        (0, 3) => PatternScore::OPEN_THREE,
        (0, 2) => PatternScore::OPEN_TWO,
        (1, l) if l >= 5 => PatternScore::CLOSED_FIVE,
        (1, 4) => PatternScore::CLOSED_FOUR,
        (1, 3) => PatternScore::CLOSED_THREE,
        (1, 2) => PatternScore::CLOSED_TWO,
        _ => 0,
    }
}

/// Score of a scanned line
#[inline]
#[must_use]
pub fn line_score(info: LineInfo) -> i32 {
    chain_score(info.length, info.blocked)
}
