//! Unique identity invariant: a token is in at most one place.

use super::Invariant;
use crate::{Board, GameState};
use std::collections::HashSet;

/// Invariant: no piece identity appears in more than one slot.
///
/// Captured tokens are gone for good, so a repeated identity means a
/// piece was copied instead of moved.
pub struct UniqueIdentityInvariant;

impl Invariant<Board> for UniqueIdentityInvariant {
    fn holds(board: &Board) -> bool {
        let mut seen = HashSet::new();
        board.pieces().all(|piece| seen.insert(piece.id()))
    }

    fn description() -> &'static str {
        "Each piece occupies exactly one cell"
    }
}

impl Invariant<GameState> for UniqueIdentityInvariant {
    fn holds(state: &GameState) -> bool {
        <Self as Invariant<Board>>::holds(state.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    #[test]
    fn test_capture_sequence_holds() {
        let mut board = Board::new();
        board.move_piece(Cell::new(3, 7), Cell::new(3, 1)).unwrap();
        board.move_piece(Cell::new(3, 1), Cell::new(4, 0)).unwrap();
        assert!(<UniqueIdentityInvariant as Invariant<Board>>::holds(&board));
        assert_eq!(board.piece_count(), 30);
    }

    #[test]
    fn test_duplicated_token_violates() {
        let mut board = Board::new();
        let knight = *board.piece_at(Cell::new(1, 7)).unwrap().unwrap();
        board.corrupt_slot(Cell::new(1, 4), Some(knight));
        assert!(!<UniqueIdentityInvariant as Invariant<Board>>::holds(&board));
    }
}
