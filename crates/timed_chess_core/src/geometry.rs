//! Pixel-to-cell mapping for hosts that lay the board out on a canvas.
//!
//! The core never sees pixels; this is arithmetic a host can reuse to turn
//! pointer positions into the cells it reports.

use super::types::Cell;
use serde::{Deserialize, Serialize};

/// Square layout of the board on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    /// Pixel offset of the top-left corner of cell (0, 0).
    pub origin: f32,
    /// Side length of one square in pixels.
    pub square: f32,
}

impl CellGeometry {
    /// Cell under a pointer position.
    ///
    /// Positions left of or above the board produce negative coordinates,
    /// which the board reports as out of bounds.
    pub fn cell_at(&self, x: f32, y: f32) -> Cell {
        Cell::new(
            ((x - self.origin) / self.square).floor() as i32,
            ((y - self.origin) / self.square).floor() as i32,
        )
    }

    /// Pixel centre of a cell, where a released piece snaps to.
    pub fn center_of(&self, cell: Cell) -> (f32, f32) {
        let half = self.square / 2.0;
        (
            self.origin + half + cell.column as f32 * self.square,
            self.origin + half + cell.row as f32 * self.square,
        )
    }
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            origin: 60.0,
            square: 80.0,
        }
    }
}
