//! Engine error type.
//!
//! Only caller-contract violations and the cascade step bound are errors.
//! A legal swap that produces no match is a normal outcome, see
//! [`SwapOutcome`](crate::swap::SwapOutcome).

use thiserror::Error;

use crate::types::{Pos, BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A position outside the board was passed in.
    #[error("position ({row}, {col}) is outside the {}x{} board", BOARD_ROWS, BOARD_COLS)]
    OutOfBounds { row: u8, col: u8 },

    /// Swap endpoints are identical or not orthogonally adjacent.
    #[error("cells {a} and {b} are not orthogonally adjacent")]
    NotAdjacent { a: Pos, b: Pos },

    /// The grid still has empty cells, so it was never generated or is mid-cascade.
    #[error("grid is not fully populated")]
    IncompleteGrid,

    /// The move budget is spent.
    #[error("no moves remaining")]
    NoMovesRemaining,

    /// A cascade kept producing matches past the configured step bound.
    #[error("cascade did not settle after {0} steps")]
    CascadeLimit(u32),

    /// Rules failed validation.
    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
}

impl EngineError {
    /// True for errors caused by the caller rather than by the engine itself.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, EngineError::CascadeLimit(_))
    }
}
