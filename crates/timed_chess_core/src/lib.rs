//! Timed chess core - board and turn-clock state machine.
//!
//! A two-player, same-device chess table: pieces move by drag and drop,
//! and each turn runs against a countdown that hands the move to the
//! opponent when it expires.
//!
//! # Architecture
//!
//! - **Board**: 8x8 grid of piece tokens; structural checks and captures only
//! - **Controller**: side to move and countdown; the only entry point for changes
//! - **Events**: host input in, state notifications out through observers
//! - **Session**: an explicit, independent table with a teardown summary
//!
//! No chess rules are enforced: any piece may go to any cell that is not
//! held by its own side.
//!
//! # Example
//!
//! ```
//! use timed_chess_core::{Cell, EventLog, Side, TurnController};
//!
//! let mut controller = TurnController::new();
//! let log = EventLog::new();
//! controller.subscribe(log.clone());
//!
//! controller
//!     .attempt_move(Side::White, Cell::new(4, 6), Cell::new(4, 4))
//!     .expect("pawn push");
//! assert_eq!(controller.current_turn(), Side::Black);
//! assert_eq!(controller.remaining_seconds(), 60);
//! assert_eq!(log.len(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod clock;
mod contracts;
mod controller;
mod events;
mod geometry;
pub mod invariants;
mod session;
mod types;

pub use action::{AppliedMove, MoveAttempt, MoveError};
pub use board::Board;
pub use clock::{ClockConfig, ClockConfigError, ClockTick, DEFAULT_TURN_SECONDS, TurnClock};
pub use contracts::{Contract, ExpiryContract, MoveContract, SidesTurn};
pub use controller::{
    Dispatched, GameState, HISTORY_LIMIT, TickOutcome, TurnController, TurnEnd, TurnRecord,
    TurnTotals,
};
pub use events::{EventLog, GameEvent, GameObserver, InputEvent};
pub use geometry::CellGeometry;
pub use invariants::{Invariant, InvariantSet, InvariantViolation};
pub use session::{GameSession, SessionId, SessionSummary};
pub use types::{
    BOARD_SIZE, CapturedPiece, Cell, MAX_PIECES_PER_SIDE, Piece, PieceId, PieceKind, SQUARE_COUNT,
    Side,
};
