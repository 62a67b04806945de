use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    fn generate(self, board: &Board, mines: CellCount) -> MinePlacement;
}

/// How much of the first revealed cell's surroundings is kept free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartCell {
    Random,
    SimpleSafe,
    AlwaysZero,
}

impl Default for StartCell {
    fn default() -> Self {
        Self::AlwaysZero
    }
}

/// The cells chosen to hold mines, plus how many had been asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinePlacement {
    cells: Vec<CellId>,
    requested: CellCount,
}

impl MinePlacement {
    /// Fixed placement on exactly `cells`; duplicates are collapsed.
    pub fn from_cells(board: &Board, cells: &[CellId]) -> Result<Self> {
        let mut cells = cells
            .iter()
            .map(|&id| board.validate_id(id))
            .collect::<Result<Vec<_>>>()?;
        cells.sort_unstable();
        cells.dedup();
        let requested = cells.len() as CellCount;
        Ok(Self { cells, requested })
    }

    pub(crate) fn new(mut cells: Vec<CellId>, requested: CellCount) -> Self {
        cells.sort_unstable();
        Self { cells, requested }
    }

    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn placed(&self) -> CellCount {
        // never more than the board holds
        self.cells.len() as CellCount
    }

    pub fn requested(&self) -> CellCount {
        self.requested
    }

    /// Fewer mines were placed than requested because the safe zone left no room.
    pub fn is_clamped(&self) -> bool {
        self.placed() < self.requested
    }
}
