//! Events flowing in from the host and notifications flowing back out.

use super::action::MoveError;
use super::types::{CapturedPiece, Cell, PieceId, Side};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// A dragged piece was let go over a cell.
    DragReleased {
        /// Identity of the dragged token.
        piece: PieceId,
        /// Cell the piece was picked up from.
        from: Cell,
        /// Cell under the pointer on release.
        to: Cell,
    },
    /// The one-second timer fired.
    TimerFired,
}

/// State change reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The side to move changed.
    TurnChanged {
        /// New side to move.
        side: Side,
    },
    /// The clock shows a new value.
    ClockChanged {
        /// Seconds remaining.
        seconds: u32,
    },
    /// A move was applied to the board.
    MoveApplied {
        /// Source cell.
        from: Cell,
        /// Destination cell.
        to: Cell,
        /// Piece removed from the destination, if any.
        captured: Option<CapturedPiece>,
    },
    /// A move attempt was refused; nothing changed.
    MoveRejected {
        /// Why the attempt was refused.
        reason: MoveError,
    },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::TurnChanged { side } => write!(f, "Turn: {}", side),
            GameEvent::ClockChanged { seconds } => write!(f, "Clock: {}s", seconds),
            GameEvent::MoveApplied {
                from,
                to,
                captured: Some(captured),
            } => write!(f, "Moved {} -> {}, captured {}", from, to, captured),
            GameEvent::MoveApplied { from, to, captured: None } => {
                write!(f, "Moved {} -> {}", from, to)
            }
            GameEvent::MoveRejected { reason } => write!(f, "Rejected: {}", reason),
        }
    }
}

/// Receives state changes from a controller.
///
/// Observers are called synchronously, in subscription order, after the
/// state they describe is already in place.
pub trait GameObserver {
    /// Handles one event.
    fn notify(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Observer that records every event it sees.
///
/// Clones share the same record, so a caller can keep one handle and
/// subscribe another.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events seen so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Removes and returns the recorded events.
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl GameObserver for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(*event);
    }
}
