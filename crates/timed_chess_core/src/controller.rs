//! Turn and clock controller.
//!
//! The controller is the only way to change a table: it gates move
//! attempts on the side to move, delegates the grid work to [`Board`],
//! and flips the turn either after an accepted move or when the clock runs
//! out. Every change is pushed to subscribed observers.

use super::action::{AppliedMove, MoveAttempt, MoveError};
use super::board::Board;
use super::clock::{ClockConfig, ClockTick, TurnClock};
#[cfg(debug_assertions)]
use super::contracts::ExpiryContract;
use super::contracts::{Contract, MoveContract};
use super::events::{GameEvent, GameObserver, InputEvent};
use super::types::{Cell, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// How a turn came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEnd {
    /// The side to move made a move.
    Moved(AppliedMove),
    /// The clock ran out.
    Expired,
}

/// One completed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct TurnRecord {
    /// Side whose turn ended.
    pub side: Side,
    /// How it ended.
    pub end: TurnEnd,
}

/// Most recent turns kept in [`GameState::history`].
pub const HISTORY_LIMIT: usize = 256;

/// Running counts of every turn a table has seen.
///
/// Unlike the history these never drop anything, so a long idle session
/// still summarises correctly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTotals {
    /// Turns ended by a move.
    pub moves: usize,
    /// Moves that captured a piece.
    pub captures: usize,
    /// Turns ended by the clock.
    pub expiries: usize,
}

impl TurnTotals {
    /// Total turn changes.
    pub fn turns(&self) -> usize {
        self.moves + self.expiries
    }

    fn record(&mut self, end: &TurnEnd) {
        match end {
            TurnEnd::Moved(applied) => {
                self.moves += 1;
                if applied.is_capture() {
                    self.captures += 1;
                }
            }
            TurnEnd::Expired => self.expiries += 1,
        }
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The clock counted down to this many seconds.
    Counted(u32),
    /// Time ran out and the turn passed to this side.
    TurnForced(Side),
}

/// What handling an input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dispatched {
    /// A drag release was applied as a move.
    Moved(AppliedMove),
    /// A timer event advanced the clock.
    Ticked(TickOutcome),
}

/// Everything a table knows: pieces, side to move, countdown, turn log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Side,
    clock: TurnClock,
    history: Vec<TurnRecord>,
    totals: TurnTotals,
}

impl GameState {
    /// Creates a state with the starting layout, White to move.
    pub fn new(config: ClockConfig) -> Self {
        Self::with_board(Board::new(), config)
    }

    /// Creates a state around an arbitrary board, White to move.
    pub fn with_board(board: Board, config: ClockConfig) -> Self {
        Self {
            board,
            turn: Side::White,
            clock: TurnClock::new(config),
            history: Vec::new(),
            totals: TurnTotals::default(),
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// The countdown.
    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    /// Most recent completed turns, oldest first, at most [`HISTORY_LIMIT`].
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Counts over every completed turn.
    pub fn totals(&self) -> &TurnTotals {
        &self.totals
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

/// Owner of the turn and the clock for one table.
pub struct TurnController {
    state: GameState,
    observers: Vec<Box<dyn GameObserver>>,
}

impl TurnController {
    /// Creates a controller with the starting layout and a 60 second clock.
    #[instrument]
    pub fn new() -> Self {
        Self::with_config(ClockConfig::default())
    }

    /// Creates a controller with the starting layout and a custom clock.
    #[instrument]
    pub fn with_config(config: ClockConfig) -> Self {
        Self::from_state(GameState::new(config))
    }

    /// Creates a controller around an existing state.
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for every subsequent change.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Full table state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Side to move.
    pub fn current_turn(&self) -> Side {
        self.state.turn
    }

    /// Seconds left for the side to move.
    pub fn remaining_seconds(&self) -> u32 {
        self.state.clock.remaining()
    }

    /// Most recent completed turns, oldest first.
    pub fn history(&self) -> &[TurnRecord] {
        &self.state.history
    }

    /// Counts over every completed turn.
    pub fn totals(&self) -> &TurnTotals {
        &self.state.totals
    }

    /// Returns true if the piece on `cell` may be picked up right now.
    pub fn can_pick_up(&self, cell: Cell) -> bool {
        matches!(
            self.state.board.piece_at(cell),
            Ok(Some(piece)) if piece.side() == self.state.turn
        )
    }

    /// Attempts to move the piece on `from` to `to` on behalf of `side`.
    ///
    /// On success the turn passes to the opponent and the clock is refilled.
    /// On any rejection nothing changes.
    ///
    /// # Errors
    ///
    /// - [`MoveError::NotYourTurn`] if `side` is not the side to move
    /// - [`MoveError::OutOfBounds`], [`MoveError::NoPieceAtSource`] or
    ///   [`MoveError::SelfCapture`] as reported by the board
    #[instrument(skip(self), fields(turn = %self.state.turn))]
    pub fn attempt_move(
        &mut self,
        side: Side,
        from: Cell,
        to: Cell,
    ) -> Result<AppliedMove, MoveError> {
        let attempt = MoveAttempt::new(side, from, to);

        #[cfg(debug_assertions)]
        let before = self.state.clone();

        let result = MoveContract::pre(&self.state, &attempt)
            .and_then(|()| self.state.board.move_piece(from, to));

        let applied = match result {
            Ok(applied) => applied,
            Err(reason) => {
                debug!(%attempt, %reason, "Move rejected");
                self.emit(GameEvent::MoveRejected { reason });
                return Err(reason);
            }
        };

        info!(%attempt, captured = ?applied.captured, "Move applied");
        self.emit(GameEvent::MoveApplied {
            from: applied.from,
            to: applied.to,
            captured: applied.captured,
        });
        self.end_turn(TurnEnd::Moved(applied));

        #[cfg(debug_assertions)]
        if let Err(violations) = MoveContract::post(&before, &self.state) {
            panic!("Move broke table invariants: {:?}", violations);
        }

        Ok(applied)
    }

    /// Advances the clock by one second.
    ///
    /// The tick that would reach zero instead passes the turn and refills
    /// the clock, so observers never see zero.
    #[instrument(skip(self), fields(turn = %self.state.turn, remaining = self.state.clock.remaining()))]
    pub fn tick(&mut self) -> TickOutcome {
        match self.state.clock.tick() {
            ClockTick::Decremented(seconds) => {
                self.emit(GameEvent::ClockChanged { seconds });
                TickOutcome::Counted(seconds)
            }
            ClockTick::Expired => {
                info!(side = %self.state.turn, "Clock expired");

                #[cfg(debug_assertions)]
                let before = self.state.clone();

                self.end_turn(TurnEnd::Expired);

                #[cfg(debug_assertions)]
                if let Err(violations) = ExpiryContract::post(&before, &self.state) {
                    panic!("Clock expiry broke table invariants: {:?}", violations);
                }
                TickOutcome::TurnForced(self.state.turn)
            }
        }
    }

    /// Routes a host input event.
    ///
    /// A drag release moves on behalf of the dragged token's owner; the
    /// token must be the one sitting on the source cell.
    ///
    /// # Errors
    ///
    /// Any rejection [`attempt_move`](Self::attempt_move) reports, or
    /// [`MoveError::NoPieceAtSource`] if the token is not on `from`.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: InputEvent) -> Result<Dispatched, MoveError> {
        match event {
            InputEvent::TimerFired => Ok(Dispatched::Ticked(self.tick())),
            InputEvent::DragReleased { piece, from, to } => {
                let owner = self.state.board.piece_at(from).map(|slot| {
                    slot.filter(|occupant| occupant.id() == piece)
                        .map(|occupant| occupant.side())
                });
                let owner = match owner {
                    Ok(Some(side)) => side,
                    Ok(None) => {
                        let reason = MoveError::NoPieceAtSource(from);
                        debug!(%piece, %reason, "Dragged token not on source cell");
                        self.emit(GameEvent::MoveRejected { reason });
                        return Err(reason);
                    }
                    Err(reason) => {
                        self.emit(GameEvent::MoveRejected { reason });
                        return Err(reason);
                    }
                };
                self.attempt_move(owner, from, to).map(Dispatched::Moved)
            }
        }
    }

    fn end_turn(&mut self, end: TurnEnd) {
        let finished = self.state.turn;
        self.state.totals.record(&end);
        self.state.history.push(TurnRecord::new(finished, end));
        if self.state.history.len() > HISTORY_LIMIT {
            let excess = self.state.history.len() - HISTORY_LIMIT;
            self.state.history.drain(..excess);
        }
        self.state.turn = finished.opponent();
        self.state.clock.reset();

        debug!(from = %finished, to = %self.state.turn, "Turn changed");
        self.emit(GameEvent::TurnChanged {
            side: self.state.turn,
        });
        self.emit(GameEvent::ClockChanged {
            seconds: self.state.clock.remaining(),
        });
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventLog, PieceKind};

    fn observed() -> (TurnController, EventLog) {
        let mut controller = TurnController::new();
        let log = EventLog::new();
        controller.subscribe(log.clone());
        (controller, log)
    }

    #[test]
    fn test_initial_state() {
        let controller = TurnController::new();
        assert_eq!(controller.current_turn(), Side::White);
        assert_eq!(controller.remaining_seconds(), 60);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_accepted_move_notifies_in_order() {
        let (mut controller, log) = observed();
        for _ in 0..5 {
            controller.tick();
        }
        log.drain();

        controller
            .attempt_move(Side::White, Cell::new(4, 6), Cell::new(4, 4))
            .unwrap();

        assert_eq!(
            log.events(),
            vec![
                GameEvent::MoveApplied {
                    from: Cell::new(4, 6),
                    to: Cell::new(4, 4),
                    captured: None,
                },
                GameEvent::TurnChanged { side: Side::Black },
                GameEvent::ClockChanged { seconds: 60 },
            ]
        );
    }

    #[test]
    fn test_rejection_notifies_and_changes_nothing() {
        let (mut controller, log) = observed();
        controller.tick();
        let before = controller.state().clone();

        let err = controller
            .attempt_move(Side::White, Cell::new(0, 7), Cell::new(0, 6))
            .unwrap_err();

        assert_eq!(err, MoveError::SelfCapture(Cell::new(0, 6)));
        assert_eq!(controller.state(), &before);
        assert_eq!(
            log.events().last(),
            Some(&GameEvent::MoveRejected { reason: err })
        );
    }

    #[test]
    fn test_tick_counts_down() {
        let (mut controller, log) = observed();
        assert_eq!(controller.tick(), TickOutcome::Counted(59));
        assert_eq!(controller.remaining_seconds(), 59);
        assert_eq!(log.events(), vec![GameEvent::ClockChanged { seconds: 59 }]);
    }

    #[test]
    fn test_expiry_with_short_clock() {
        let mut controller = TurnController::with_config(ClockConfig::new(2).unwrap());
        assert_eq!(controller.tick(), TickOutcome::Counted(1));
        assert_eq!(controller.tick(), TickOutcome::TurnForced(Side::Black));
        assert_eq!(controller.remaining_seconds(), 2);
        assert_eq!(
            controller.history(),
            &[TurnRecord::new(Side::White, TurnEnd::Expired)]
        );
    }

    #[test]
    fn test_can_pick_up_follows_turn() {
        let mut controller = TurnController::new();
        assert!(controller.can_pick_up(Cell::new(4, 6)));
        assert!(!controller.can_pick_up(Cell::new(4, 1)));
        assert!(!controller.can_pick_up(Cell::new(4, 4)));
        assert!(!controller.can_pick_up(Cell::new(-1, 4)));

        controller
            .attempt_move(Side::White, Cell::new(4, 6), Cell::new(4, 4))
            .unwrap();
        assert!(controller.can_pick_up(Cell::new(4, 1)));
        assert!(!controller.can_pick_up(Cell::new(4, 4)));
    }

    #[test]
    fn test_drag_release_uses_token_owner() {
        let (mut controller, _log) = observed();
        let black_pawn = controller
            .board()
            .piece_at(Cell::new(3, 1))
            .unwrap()
            .map(|piece| piece.id())
            .unwrap();

        let result = controller.handle(InputEvent::DragReleased {
            piece: black_pawn,
            from: Cell::new(3, 1),
            to: Cell::new(3, 3),
        });
        assert_eq!(result, Err(MoveError::NotYourTurn(Side::Black)));
        assert_eq!(controller.current_turn(), Side::White);
    }

    #[test]
    fn test_drag_release_with_stale_token() {
        let mut controller = TurnController::new();
        let knight = controller
            .board()
            .piece_at(Cell::new(1, 7))
            .unwrap()
            .map(|piece| piece.id())
            .unwrap();

        let result = controller.handle(InputEvent::DragReleased {
            piece: knight,
            from: Cell::new(0, 7),
            to: Cell::new(0, 5),
        });
        assert_eq!(result, Err(MoveError::NoPieceAtSource(Cell::new(0, 7))));
    }

    #[test]
    fn test_history_is_capped_but_totals_keep_counting() {
        let mut controller = TurnController::with_config(ClockConfig::new(1).unwrap());
        for _ in 0..(HISTORY_LIMIT + 40) {
            controller.tick();
        }
        assert_eq!(controller.history().len(), HISTORY_LIMIT);
        assert_eq!(controller.totals().expiries, HISTORY_LIMIT + 40);
        assert_eq!(controller.totals().turns(), HISTORY_LIMIT + 40);

        controller
            .attempt_move(Side::White, Cell::new(4, 6), Cell::new(4, 4))
            .unwrap();
        assert_eq!(controller.history().len(), HISTORY_LIMIT);
        assert!(matches!(
            controller.history().last(),
            Some(TurnRecord { side: Side::White, end: TurnEnd::Moved(_) })
        ));
        assert_eq!(controller.totals().moves, 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Move broke table invariants")]
    fn test_overfull_side_trips_move_postcondition() {
        let mut board = Board::new();
        board
            .place(PieceKind::Queen, Side::White, Cell::new(4, 4))
            .unwrap();
        let mut controller =
            TurnController::from_state(GameState::with_board(board, ClockConfig::default()));
        let _ = controller.attempt_move(Side::White, Cell::new(4, 6), Cell::new(4, 5));
    }

    #[test]
    fn test_capture_is_recorded_in_history() {
        let mut board = Board::empty();
        board.place(PieceKind::Queen, Side::White, Cell::new(3, 7)).unwrap();
        board.place(PieceKind::Bishop, Side::Black, Cell::new(3, 2)).unwrap();
        let mut controller =
            TurnController::from_state(GameState::with_board(board, ClockConfig::default()));

        let applied = controller
            .attempt_move(Side::White, Cell::new(3, 7), Cell::new(3, 2))
            .unwrap();

        assert_eq!(controller.board().piece_count(), 1);
        assert_eq!(controller.totals().captures, 1);
        assert_eq!(
            controller.history(),
            &[TurnRecord::new(Side::White, TurnEnd::Moved(applied))]
        );
    }
}
