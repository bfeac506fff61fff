//! The 8x8 grid of piece tokens.
//!
//! The board is pure data: it knows where pieces are, refuses structurally
//! invalid moves, and removes captured pieces. It has no idea whose turn it
//! is or how much time is left.

use super::action::{AppliedMove, MoveError};
use super::types::{Cell, Piece, PieceId, PieceKind, SQUARE_COUNT, Side};
use tracing::{debug, instrument};

/// Back rank order from column 0 to column 7.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Grid of optional occupants in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; SQUARE_COUNT],
    next_id: u32,
}

impl Board {
    /// Creates a board in the standard starting layout.
    #[instrument]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.initialize();
        board
    }

    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Self {
            squares: [None; SQUARE_COUNT],
            next_id: 0,
        }
    }

    /// Clears the grid and sets up the starting layout.
    ///
    /// Black's back rank is row 0 with pawns on row 1; White's pawns are on
    /// row 6 and its back rank on row 7.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) {
        *self = Self::empty();
        for (column, kind) in BACK_RANK.iter().enumerate() {
            let column = column as i32;
            self.put(*kind, Side::Black, Cell::new(column, 0));
            self.put(PieceKind::Pawn, Side::Black, Cell::new(column, 1));
            self.put(PieceKind::Pawn, Side::White, Cell::new(column, 6));
            self.put(*kind, Side::White, Cell::new(column, 7));
        }
        debug!(pieces = self.piece_count(), "Board initialized");
    }

    /// Returns the occupant of `cell`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if the cell is off the board.
    pub fn piece_at(&self, cell: Cell) -> Result<Option<&Piece>, MoveError> {
        let index = cell.index().ok_or(MoveError::OutOfBounds(cell))?;
        Ok(self.squares[index].as_ref())
    }

    /// Moves the piece on `from` to `to`, capturing an enemy occupant.
    ///
    /// The grid is untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfBounds`] if either cell is off the board
    /// - [`MoveError::NoPieceAtSource`] if `from` is empty
    /// - [`MoveError::SelfCapture`] if `to` holds a piece of the mover's side
    #[instrument(skip(self))]
    pub fn move_piece(&mut self, from: Cell, to: Cell) -> Result<AppliedMove, MoveError> {
        let from_index = from.index().ok_or(MoveError::OutOfBounds(from))?;
        let to_index = to.index().ok_or(MoveError::OutOfBounds(to))?;

        let mover = self.squares[from_index].ok_or(MoveError::NoPieceAtSource(from))?;

        if let Some(target) = self.squares[to_index]
            && target.side == mover.side
        {
            debug!(mover = %mover.id, target = %target.id, "Rejected self-capture");
            return Err(MoveError::SelfCapture(to));
        }

        let captured = self.squares[to_index].take().map(|piece| piece.descriptor());
        self.squares[from_index] = None;
        self.squares[to_index] = Some(Piece { cell: to, ..mover });

        debug!(piece = %mover.id, ?captured, "Piece moved");
        Ok(AppliedMove::new(from, to, captured))
    }

    /// Places a new piece on an empty cell and returns it.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfBounds`] if the cell is off the board
    /// - [`MoveError::CellOccupied`] if the cell already holds a piece
    #[instrument(skip(self))]
    pub fn place(&mut self, kind: PieceKind, side: Side, cell: Cell) -> Result<Piece, MoveError> {
        let index = cell.index().ok_or(MoveError::OutOfBounds(cell))?;
        if self.squares[index].is_some() {
            return Err(MoveError::CellOccupied(cell));
        }
        Ok(self.put(kind, side, cell))
    }

    /// Takes the occupant off `cell`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if the cell is off the board.
    #[instrument(skip(self))]
    pub fn remove(&mut self, cell: Cell) -> Result<Option<Piece>, MoveError> {
        let index = cell.index().ok_or(MoveError::OutOfBounds(cell))?;
        Ok(self.squares[index].take())
    }

    /// Finds a piece by identity.
    pub fn find(&self, id: PieceId) -> Option<&Piece> {
        self.pieces().find(|piece| piece.id == id)
    }

    /// Iterates over every piece on the board in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    /// Iterates over slots with their coordinates.
    pub fn slots(&self) -> impl Iterator<Item = (Cell, Option<&Piece>)> {
        self.squares.iter().enumerate().filter_map(|(index, slot)| {
            Cell::from_index(index).map(|cell| (cell, slot.as_ref()))
        })
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Number of pieces belonging to `side`.
    pub fn count_for(&self, side: Side) -> usize {
        self.pieces().filter(|piece| piece.side == side).count()
    }

    /// Formats the board as text, row 0 first.
    ///
    /// White pieces are uppercase, Black lowercase, empty squares `.`.
    pub fn display(&self) -> String {
        self.squares
            .chunks(8)
            .map(|row| {
                row.iter()
                    .map(|slot| slot.map_or('.', |piece| piece.symbol()).to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Caller guarantees `cell` is on the board and empty.
    fn put(&mut self, kind: PieceKind, side: Side, cell: Cell) -> Piece {
        let piece = Piece {
            id: PieceId(self.next_id),
            kind,
            side,
            cell,
        };
        self.next_id += 1;
        if let Some(index) = cell.index() {
            self.squares[index] = Some(piece);
        }
        piece
    }

    #[cfg(test)]
    pub(crate) fn corrupt_slot(&mut self, cell: Cell, piece: Option<Piece>) {
        if let Some(index) = cell.index() {
            self.squares[index] = piece;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
