//! Cell consistency invariant: each piece knows where it stands.

use super::Invariant;
use crate::{Board, GameState};

/// Invariant: every occupied slot holds a piece whose cell is that slot.
pub struct CellConsistencyInvariant;

impl Invariant<Board> for CellConsistencyInvariant {
    fn holds(board: &Board) -> bool {
        board
            .slots()
            .all(|(cell, slot)| slot.is_none_or(|piece| piece.cell() == cell))
    }

    fn description() -> &'static str {
        "Every piece reports the cell it occupies"
    }
}

impl Invariant<GameState> for CellConsistencyInvariant {
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
    use crate::{Cell, PieceKind, Side};

    #[test]
    fn test_fresh_board_holds() {
        assert!(<CellConsistencyInvariant as Invariant<Board>>::holds(&Board::new()));
    }

    #[test]
    fn test_moved_piece_holds() {
        let mut board = Board::new();
        board.move_piece(Cell::new(6, 7), Cell::new(5, 5)).unwrap();
        assert!(<CellConsistencyInvariant as Invariant<Board>>::holds(&board));
    }

    #[test]
    fn test_drifted_piece_violates() {
        let mut board = Board::empty();
        let rook = board.place(PieceKind::Rook, Side::White, Cell::new(0, 0)).unwrap();
        board.corrupt_slot(Cell::new(0, 0), None);
        board.corrupt_slot(Cell::new(1, 0), Some(rook));
        assert!(!<CellConsistencyInvariant as Invariant<Board>>::holds(&board));
    }
}
