//! Move attempts, their outcomes, and the reasons they get rejected.
//!
//! Every rejection is recoverable: the board, the turn, and the clock are
//! left exactly as they were before the attempt.

use super::types::{CapturedPiece, Cell, Side};
use serde::{Deserialize, Serialize};

/// A request by `side` to move whatever sits on `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct MoveAttempt {
    /// Side claiming ownership of the moved piece.
    pub side: Side,
    /// Source cell.
    pub from: Cell,
    /// Destination cell.
    pub to: Cell,
}

impl std::fmt::Display for MoveAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.side, self.from, self.to)
    }
}

/// A move the board accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct AppliedMove {
    /// Source cell.
    pub from: Cell,
    /// Destination cell.
    pub to: Cell,
    /// Descriptor of the piece removed from `to`, if any.
    pub captured: Option<CapturedPiece>,
}

impl AppliedMove {
    /// Returns true if the move removed an enemy piece.
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Why a board operation or move attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum MoveError {
    /// A coordinate lies outside the 8x8 grid.
    #[display("Cell {} is outside the board", _0)]
    OutOfBounds(Cell),

    /// The source cell is empty.
    #[display("No piece at {}", _0)]
    NoPieceAtSource(Cell),

    /// The destination holds a piece of the mover's own side.
    #[display("Cell {} is occupied by a friendly piece", _0)]
    SelfCapture(Cell),

    /// The side asking to move is not the side to move.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Side),

    /// Placement onto an occupied cell.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Cell),
}

impl std::error::Error for MoveError {}

impl MoveError {
    /// Short machine-friendly name of the rejection reason.
    pub fn reason(&self) -> &'static str {
        match self {
            MoveError::OutOfBounds(_) => "out_of_bounds",
            MoveError::NoPieceAtSource(_) => "no_piece_at_source",
            MoveError::SelfCapture(_) => "self_capture",
            MoveError::NotYourTurn(_) => "not_your_turn",
            MoveError::CellOccupied(_) => "cell_occupied",
        }
    }
}
