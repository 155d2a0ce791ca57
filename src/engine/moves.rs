//! Reasons a move is rejected.
//!
//! Every rejection is recoverable: the session state is untouched and the
//! error doubles as the short human-readable message the renderer shows.

use thiserror::Error;

/// Why a requested move was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("a stack cannot be moved onto itself")]
    SameStack,

    #[error("that pile does not take cards from there")]
    SourceForbidden,

    #[error("not enough free cells to move {needed} cards")]
    NotEnoughFreeCells { needed: usize, free: usize },

    #[error("those cards are not in sequence")]
    BrokenRun,

    #[error("only a complete run can be moved there")]
    IncompleteRun,

    #[error("the top card is face down")]
    FaceDown,

    #[error("that card cannot go on top of that pile")]
    Mismatch,

    #[error("that card cannot go on an empty pile")]
    EmptyMismatch,

    #[error("the stock is empty")]
    EmptyStock,

    #[error("no more redeals")]
    RedealLimit,
}
