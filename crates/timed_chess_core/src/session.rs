//! Game sessions: one table per session, created and torn down explicitly.

use super::action::MoveError;
use super::clock::ClockConfig;
use super::controller::{Dispatched, TickOutcome, TurnController};
use super::events::{GameObserver, InputEvent};
use super::types::Side;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Unique identifier for a game session.
pub type SessionId = String;

/// A running table.
///
/// Sessions are independent: any number can exist side by side, each with
/// its own board, clock, and observers.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    controller: TurnController,
}

impl GameSession {
    /// Creates a session with the starting layout.
    #[instrument]
    pub fn new(id: SessionId, config: ClockConfig) -> Self {
        info!(session_id = %id, turn_seconds = config.turn_seconds, "Creating game session");
        Self {
            id,
            controller: TurnController::with_config(config),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The controller driving this session.
    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Registers an observer on the session's controller.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.controller.subscribe(observer);
    }

    /// Delivers one host event.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason when a drag release is refused.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn dispatch(&mut self, event: InputEvent) -> Result<Dispatched, MoveError> {
        self.controller.handle(event)
    }

    /// Advances the session's clock by one second.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn tick(&mut self) -> TickOutcome {
        self.controller.tick()
    }

    /// Tears the session down and summarises what happened.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn end(self) -> SessionSummary {
        let summary = SessionSummary::from_controller(self.id, &self.controller);
        info!(
            moves = summary.moves,
            captures = summary.captures,
            expiries = summary.expiries,
            "Session ended"
        );
        summary
    }
}

/// Totals for a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier.
    pub id: SessionId,
    /// Accepted moves.
    pub moves: usize,
    /// Moves that captured a piece.
    pub captures: usize,
    /// Turns lost to the clock.
    pub expiries: usize,
    /// Side to move when the session ended.
    pub final_turn: Side,
    /// Pieces left per side, White first.
    pub remaining: (usize, usize),
}

impl SessionSummary {
    fn from_controller(id: SessionId, controller: &TurnController) -> Self {
        let totals = controller.totals();
        let board = controller.board();
        Self {
            id,
            moves: totals.moves,
            captures: totals.captures,
            expiries: totals.expiries,
            final_turn: controller.current_turn(),
            remaining: (board.count_for(Side::White), board.count_for(Side::Black)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, EventLog, GameEvent};

    fn drag(session: &GameSession, from: Cell, to: Cell) -> InputEvent {
        let piece = session
            .controller()
            .board()
            .piece_at(from)
            .ok()
            .flatten()
            .map(|piece| piece.id())
            .expect("piece on source cell");
        InputEvent::DragReleased { piece, from, to }
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = GameSession::new("a".to_string(), ClockConfig::default());
        let second = GameSession::new("b".to_string(), ClockConfig::default());

        let event = drag(&first, Cell::new(4, 6), Cell::new(4, 4));
        first.dispatch(event).unwrap();

        assert_eq!(first.controller().current_turn(), Side::Black);
        assert_eq!(second.controller().current_turn(), Side::White);
        assert!(second.controller().board().piece_at(Cell::new(4, 4)).unwrap().is_none());
    }

    #[test]
    fn test_tick_advances_only_this_session() {
        let mut first = GameSession::new("a".to_string(), ClockConfig::new(2).unwrap());
        let second = GameSession::new("b".to_string(), ClockConfig::new(2).unwrap());

        assert_eq!(first.tick(), TickOutcome::Counted(1));
        assert_eq!(first.tick(), TickOutcome::TurnForced(Side::Black));
        assert_eq!(second.controller().remaining_seconds(), 2);
        assert_eq!(first.end().expiries, 1);
    }

    #[test]
    fn test_summary_counts_turns() {
        let mut session = GameSession::new("s".to_string(), ClockConfig::new(1).unwrap());
        let log = EventLog::new();
        session.subscribe(log.clone());

        // A one-second clock expires on every tick.
        session.dispatch(InputEvent::TimerFired).unwrap();
        let event = drag(&session, Cell::new(3, 0), Cell::new(3, 6));
        session.dispatch(event).unwrap();

        assert!(log.events().contains(&GameEvent::TurnChanged { side: Side::White }));

        let summary = session.end();
        assert_eq!(summary.id, "s");
        assert_eq!(summary.moves, 1);
        assert_eq!(summary.captures, 1);
        assert_eq!(summary.expiries, 1);
        assert_eq!(summary.final_turn, Side::White);
        assert_eq!(summary.remaining, (15, 16));
    }
}
