//! Contract-based validation for turn changes.
//!
//! Contracts pair a precondition checked before a transition with a
//! postcondition checked after it: {P} action {Q}.

use super::action::{MoveAttempt, MoveError};
use super::controller::GameState;
use super::invariants::{InvariantSet, InvariantViolation, TableInvariants};
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Precondition: the side asking to move is the side to move.
pub struct SidesTurn;

impl SidesTurn {
    /// Rejects attempts by the side not on move.
    #[instrument(skip(state))]
    pub fn check(attempt: &MoveAttempt, state: &GameState) -> Result<(), MoveError> {
        if attempt.side != state.turn() {
            Err(MoveError::NotYourTurn(attempt.side))
        } else {
            Ok(())
        }
    }
}

/// Postconditions shared by every turn change.
fn turn_changed(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = TableInvariants::check_all(after).err().unwrap_or_default();

    if after.turn() != before.turn().opponent() {
        violations.push(InvariantViolation::new("Turn passes to the other side"));
    }
    if after.clock().remaining() != after.clock().turn_seconds() {
        violations.push(InvariantViolation::new("Clock is full after a turn change"));
    }
    if after.totals().turns() != before.totals().turns() + 1 {
        violations.push(InvariantViolation::new("Each turn change is recorded once"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        warn!(count = violations.len(), "Turn change postcondition failed");
        Err(violations)
    }
}

/// Contract for a move attempt.
///
/// Preconditions:
/// - The mover is the side to move
///
/// Postconditions:
/// - The turn passed to the opponent with a full clock
/// - Board invariants hold
pub struct MoveContract;

impl Contract<GameState, MoveAttempt> for MoveContract {
    fn pre(state: &GameState, attempt: &MoveAttempt) -> Result<(), MoveError> {
        SidesTurn::check(attempt, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        turn_changed(before, after)?;
        if after.board().piece_count() > before.board().piece_count() {
            return Err(vec![InvariantViolation::new("Moves never add pieces")]);
        }
        Ok(())
    }
}

/// Postconditions for a forced turn change on clock expiry.
///
/// Expiry has no precondition: any side to move can run out of time. The
/// board is untouched; only the turn and the clock move.
pub struct ExpiryContract;

impl ExpiryContract {
    /// Checks the table after the clock forced a turn change.
    pub fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        turn_changed(before, after)?;
        if before.board() != after.board() {
            return Err(vec![InvariantViolation::new("Clock expiry leaves the board alone")]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Side, TurnController};

    #[test]
    fn test_precondition_sides_turn() {
        let controller = TurnController::new();
        let attempt = MoveAttempt::new(Side::White, Cell::new(4, 6), Cell::new(4, 4));
        assert!(MoveContract::pre(controller.state(), &attempt).is_ok());

        let attempt = MoveAttempt::new(Side::Black, Cell::new(4, 1), Cell::new(4, 3));
        assert_eq!(
            MoveContract::pre(controller.state(), &attempt),
            Err(MoveError::NotYourTurn(Side::Black))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let mut controller = TurnController::new();
        let before = controller.state().clone();
        controller
            .attempt_move(Side::White, Cell::new(1, 7), Cell::new(2, 5))
            .unwrap();
        assert!(MoveContract::post(&before, controller.state()).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_flip() {
        let controller = TurnController::new();
        let state = controller.state().clone();
        assert!(MoveContract::post(&state, &state).is_err());
    }

    #[test]
    fn test_expiry_postcondition_holds() {
        let mut controller = TurnController::new();
        for _ in 0..59 {
            controller.tick();
        }
        let before = controller.state().clone();
        controller.tick();
        assert!(ExpiryContract::post(&before, controller.state()).is_ok());
    }
}
