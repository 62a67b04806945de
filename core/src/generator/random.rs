use alloc::vec::Vec;

use super::*;

/// Generation strategy that keeps the starting cell (and optionally its neighbors) free of mines, but other than that
/// is purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    start: CellId,
    start_cell: StartCell,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, start: CellId, start_cell: StartCell) -> Self {
        Self {
            seed,
            start,
            start_cell,
        }
    }

    /// Cells that must stay safe for the configured start policy.
    fn safe_zone(&self, board: &Board) -> Vec<CellId> {
        use StartCell::*;

        match self.start_cell {
            Random => Vec::new(),
            SimpleSafe => alloc::vec![self.start],
            AlwaysZero => {
                let mut zone: Vec<CellId> = board.neighbors(self.start).into_iter().collect();
                zone.push(self.start);
                zone
            }
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, board: &Board, mines: CellCount) -> MinePlacement {
        use rand::prelude::*;

        let mut excluded = alloc::vec![false; board.cells().len()];
        for id in self.safe_zone(board) {
            excluded[id.index()] = true;
        }
        let candidates: Vec<CellId> = board.ids().filter(|id| !excluded[id.index()]).collect();

        let placeable = candidates.len() as CellCount;
        let amount = if mines > placeable {
            log::warn!(
                "Too many mines for this board and safe zone, requested {} but only fits {}",
                mines,
                placeable
            );
            placeable
        } else {
            mines
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let chosen = rand::seq::index::sample(&mut rng, candidates.len(), amount.into())
            .into_iter()
            .map(|i| candidates[i])
            .collect();

        let placement = MinePlacement::new(chosen, mines);
        log::debug!(
            "Placed {} mines around start cell {:?} ({:?})",
            placement.placed(),
            self.start,
            self.start_cell
        );
        placement
    }
}
