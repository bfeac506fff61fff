//! Core domain types for the chess table.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: i32 = 8;

/// Number of squares on the board.
pub const SQUARE_COUNT: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Pieces each side starts with, and the most it can ever have.
pub const MAX_PIECES_PER_SIDE: usize = 16;

/// One of the two turn-taking sides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Side {
    /// White (moves first).
    White,
    /// Black.
    Black,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// Kind of a piece token.
///
/// Kinds carry no movement rules here; they only travel with the token so
/// the host can pick a sprite and describe captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum PieceKind {
    /// Pawn.
    Pawn,
    /// Rook.
    Rook,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl PieceKind {
    /// Single-letter symbol (uppercase for White, lowercase for Black).
    pub fn symbol(self, side: Side) -> char {
        let upper = match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        match side {
            Side::White => upper,
            Side::Black => upper.to_ascii_lowercase(),
        }
    }
}

/// A (column, row) board coordinate.
///
/// Coordinates are raw: a host deriving cells from pointer geometry can
/// produce values outside the board, and the board reports those as
/// out of bounds rather than the type refusing to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column, 0 on the left.
    pub column: i32,
    /// Row, 0 at the top (Black's back rank).
    pub row: i32,
}

impl Cell {
    /// Creates a cell from raw coordinates.
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Returns true if both coordinates lie in `[0, 7]`.
    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.column) && (0..BOARD_SIZE).contains(&self.row)
    }

    /// Row-major slot index, or `None` when off the board.
    pub fn index(self) -> Option<usize> {
        self.is_on_board()
            .then(|| (self.row * BOARD_SIZE + self.column) as usize)
    }

    /// Cell for a row-major slot index.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= SQUARE_COUNT {
            return None;
        }
        let index = index as i32;
        Some(Self::new(index % BOARD_SIZE, index / BOARD_SIZE))
    }

    /// Parses algebraic notation such as `e2`.
    ///
    /// File `a` is column 0; rank 8 is row 0, so `e2` is `(4, 6)`.
    #[instrument]
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?.to_digit(10)? as i32;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return None;
        }
        Some(Self::new(file as i32 - 'a' as i32, BOARD_SIZE - rank))
    }

    /// Algebraic name of the cell, or `None` when off the board.
    pub fn to_algebraic(self) -> Option<String> {
        self.is_on_board().then(|| {
            let file = (b'a' + self.column as u8) as char;
            format!("{}{}", file, BOARD_SIZE - self.row)
        })
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Identity of a piece token, unique for the lifetime of a board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{}", _0)]
pub struct PieceId(pub u32);

/// A piece token on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) kind: PieceKind,
    pub(crate) side: Side,
    pub(crate) cell: Cell,
}

impl Piece {
    /// Token identity.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Kind of piece.
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Owning side.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Cell the piece currently sits on.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Kind and side, without identity or position.
    pub fn descriptor(&self) -> CapturedPiece {
        CapturedPiece {
            kind: self.kind,
            side: self.side,
        }
    }

    /// Board symbol for this piece.
    pub fn symbol(&self) -> char {
        self.kind.symbol(self.side)
    }
}

/// What remains of a captured piece: its kind and side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapturedPiece {
    /// Kind of the captured piece.
    pub kind: PieceKind,
    /// Side the captured piece belonged to.
    pub side: Side,
}

impl std::fmt::Display for CapturedPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.side, self.kind)
    }
}
