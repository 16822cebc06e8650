//! Errors returned by the rules engine.
//!
//! Every expected failure mode (bad notation, illegal move, nothing to undo)
//! is a `ChessError` value. A failed call never mutates the position or game
//! it was invoked on, so callers can report the error and re-prompt.
//!
//! Internal corruption (a missing king in the middle of generation, a move
//! description that contradicts the board inside the unchecked applier) is
//! not represented here: those paths panic because they indicate a bug.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A FEN string, square name, or move text could not be parsed into a
    /// structurally valid value.
    #[error("invalid notation: {0}")]
    InvalidNotation(String),

    /// The move is not in the legal move set for the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Undo requested with an empty move history.
    #[error("no moves to undo")]
    NoHistory,
}

pub type ChessResult<T> = Result<T, ChessError>;

impl ChessError {
    pub(crate) fn notation(msg: impl Into<String>) -> Self {
        ChessError::InvalidNotation(msg.into())
    }

    pub(crate) fn illegal(msg: impl Into<String>) -> Self {
        ChessError::IllegalMove(msg.into())
    }
}
