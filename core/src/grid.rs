use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array3;
use smallvec::SmallVec;

use crate::*;

/// Cells sharing one lattice position, at most one per touching face.
pub type CellsAt = SmallVec<[CellId; 3]>;

/// The cube surface: owns every cell plus a coordinate index derived from them.
#[derive(Clone, Debug)]
pub struct Board {
    size: Coord,
    cells: Vec<Cell>,
    index: Array3<CellsAt>,
    mine_count: CellCount,
}

impl Board {
    /// Enumerates every boundary lattice point and creates one cell per face it touches.
    pub fn build(size: Coord) -> Result<Self> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidSize { size });
        }

        let mut cells = Vec::with_capacity(surface_cells(size).into());
        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    let coords = [x, y, z];
                    for normal in Direction::ALL {
                        if normal.lies_on(coords, size) {
                            cells.push(Cell::new(coords, normal));
                        }
                    }
                }
            }
        }
        debug_assert_eq!(cells.len(), usize::from(surface_cells(size)));
        log::trace!("Built {} surface cells for size {}", cells.len(), size);

        let mut board = Self {
            size,
            cells,
            index: Array3::default([usize::from(size); 3]),
            mine_count: 0,
        };
        board.rebuild_index();
        Ok(board)
    }

    /// Builds a board with mines on the given `(coords, normal)` cells.
    pub fn from_mine_cells(size: Coord, mines: &[(Coord3, Direction)]) -> Result<Self> {
        let mut board = Self::build(size)?;
        let mut ids = Vec::with_capacity(mines.len());
        for &(coords, normal) in mines {
            ids.push(board.cell_at(coords, normal)?);
        }
        let placement = MinePlacement::from_cells(&board, &ids)?;
        board.apply_mines(&placement);
        Ok(board)
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        // bounded by MAX_SIZE
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn ids(&self) -> impl Iterator<Item = CellId> + use<> {
        (0..self.total_cells()).map(CellId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (CellId(i as CellCount), cell))
    }

    pub fn validate_id(&self, id: CellId) -> Result<CellId> {
        if id.index() < self.cells.len() {
            Ok(id)
        } else {
            Err(GameError::CellNotFound)
        }
    }

    pub fn cell(&self, id: CellId) -> Result<&Cell> {
        self.cells.get(id.index()).ok_or(GameError::CellNotFound)
    }

    pub fn validate_coords(&self, coords: Coord3) -> Result<Coord3> {
        if coords.iter().all(|&c| c < self.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// All cells currently at `coords`: 0 inside the cube, 1-3 on the surface.
    pub fn cells_at(&self, coords: Coord3) -> Result<&[CellId]> {
        let coords = self.validate_coords(coords)?;
        Ok(self.index[coords.to_nd_index()].as_slice())
    }

    /// The cell at `coords` facing `normal`.
    pub fn cell_at(&self, coords: Coord3, normal: Direction) -> Result<CellId> {
        self.cells_at(coords)?
            .iter()
            .copied()
            .find(|&id| self[id].normal() == normal)
            .ok_or(GameError::CellNotFound)
    }

    /// Same as [`Board::cell_at`] for coordinates already known to be in bounds.
    pub(crate) fn find(&self, coords: Coord3, normal: Direction) -> Option<CellId> {
        self.index[coords.to_nd_index()]
            .iter()
            .copied()
            .find(|&id| self[id].normal() == normal)
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.index()]
    }

    pub(crate) fn rebuild_index(&mut self) {
        self.index.iter_mut().for_each(CellsAt::clear);
        for (i, cell) in self.cells.iter().enumerate() {
            self.index[cell.coords().to_nd_index()].push(CellId(i as CellCount));
        }
    }

    pub(crate) fn apply_mines(&mut self, placement: &MinePlacement) {
        for cell in &mut self.cells {
            cell.set_mine(false);
        }
        for &id in placement.cells() {
            self.cell_mut(id).set_mine(true);
        }
        self.mine_count = placement.placed();
        self.recompute_adjacency();
    }

    /// Refreshes every safe cell's adjacent mine count from the current topology.
    pub(crate) fn recompute_adjacency(&mut self) {
        for id in self.ids() {
            if self[id].is_mine() {
                continue;
            }
            let count = self.adjacent_mine_count(id);
            self.cell_mut(id).set_adjacent_mines(count);
        }
    }

    pub(crate) fn adjacent_mine_count(&self, id: CellId) -> u8 {
        // at most 8 neighbors
        self.neighbors(id)
            .iter()
            .filter(|&&neighbor| self[neighbor].is_mine())
            .count() as u8
    }
}

impl Index<CellId> for Board {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Self::Output {
        &self.cells[id.index()]
    }
}
