use serde::{Deserialize, Serialize};

use crate::*;

/// Stable identity of a cell, unaffected by rotations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub(crate) CellCount);

impl CellId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One unit square on the cube surface.
///
/// Position and normal change under layer rotation, everything else stays
/// attached to the cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    coords: Coord3,
    normal: Direction,
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn new(coords: Coord3, normal: Direction) -> Self {
        Self {
            coords,
            normal,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            adjacent_mines: 0,
        }
    }

    pub const fn coords(&self) -> Coord3 {
        self.coords
    }

    pub const fn normal(&self) -> Direction {
        self.normal
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Number of mines among the neighbors, meaningful only for safe cells.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn set_position(&mut self, coords: Coord3, normal: Direction) {
        self.coords = coords;
        self.normal = normal;
    }

    pub(crate) fn set_mine(&mut self, is_mine: bool) {
        self.is_mine = is_mine;
    }

    pub(crate) fn set_revealed(&mut self) {
        debug_assert!(!self.is_flagged, "flagged cells are never revealed");
        self.is_revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, is_flagged: bool) {
        debug_assert!(!self.is_revealed, "revealed cells are never flagged");
        self.is_flagged = is_flagged;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }
}

/// Player-visible state of a cell, what the presentation layer draws.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    Exploded,
    WrongFlag,
}

impl CellView {
    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::WrongFlag)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
