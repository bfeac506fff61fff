//! Side count invariant: neither side outgrows its starting set.

use super::Invariant;
use crate::{Board, GameState, MAX_PIECES_PER_SIDE, Side};
use strum::IntoEnumIterator;

/// Invariant: each side has at most sixteen pieces on the board.
///
/// Moves only ever remove pieces, so a count above the starting set means
/// something was placed that never belonged to the game.
pub struct SideCountInvariant;

impl Invariant<Board> for SideCountInvariant {
    fn holds(board: &Board) -> bool {
        Side::iter().all(|side| board.count_for(side) <= MAX_PIECES_PER_SIDE)
    }

    fn description() -> &'static str {
        "Each side has at most sixteen pieces"
    }
}

impl Invariant<GameState> for SideCountInvariant {
    fn holds(state: &GameState) -> bool {
        <Self as Invariant<Board>>::holds(state.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}
