use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the presentation layer needs to draw one cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub id: CellId,
    pub coords: Coord3,
    pub normal: Direction,
    pub view: CellView,
}

/// Read-only picture of the whole game, taken between operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord,
    pub state: GameState,
    pub mines_left: isize,
    pub animating: bool,
    pub cells: Vec<CellSnapshot>,
}

impl BoardSnapshot {
    pub fn from_engine(engine: &CubeEngine) -> Self {
        let cells = engine
            .board()
            .iter()
            .map(|(id, cell)| CellSnapshot {
                id,
                coords: cell.coords(),
                normal: cell.normal(),
                view: engine.cell_view(id).unwrap_or_default(),
            })
            .collect();

        Self {
            size: engine.size(),
            state: engine.state(),
            mines_left: engine.mines_left(),
            animating: engine.is_animating(),
            cells,
        }
    }

    pub fn cell(&self, id: CellId) -> Option<&CellSnapshot> {
        self.cells.get(id.index())
    }

    pub fn count_views(&self, view: CellView) -> usize {
        self.cells.iter().filter(|cell| cell.view == view).count()
    }
}
