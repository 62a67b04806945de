use smallvec::SmallVec;

use crate::*;

/// Neighbor set of a cell, sorted by id and free of duplicates.
pub type Neighbors = SmallVec<[CellId; 8]>;

impl Board {
    /// Every cell touching `id`, on its own face and across shared edges and corners.
    ///
    /// Same-face neighbors are the 8-neighborhood in the face's 2-D projection.
    /// Cross-face neighbors exist only where the cell sits on another face's
    /// boundary plane: the cell there with the same coordinate shares the edge,
    /// and the two one step along the edge share a corner point.
    pub fn neighbors(&self, id: CellId) -> Neighbors {
        let cell = &self[id];
        let (coords, normal) = (cell.coords(), cell.normal());
        let size = self.size();
        let mut neighbors = Neighbors::new();

        let (u, v) = normal.axis().others();
        for (du, dv) in DISPLACEMENTS {
            let Some(pos) = apply_delta(coords, u, du, size)
                .and_then(|pos| apply_delta(pos, v, dv, size))
            else {
                continue;
            };
            if let Some(neighbor) = self.find(pos, normal) {
                neighbors.push(neighbor);
            }
        }

        for other in Direction::ALL {
            if !normal.is_perpendicular(other) || !other.lies_on(coords, size) {
                continue;
            }
            let along_edge = Axis::third(normal.axis(), other.axis());
            for delta in [-1, 0, 1] {
                let Some(pos) = apply_delta(coords, along_edge, delta, size) else {
                    continue;
                };
                if let Some(neighbor) = self.find(pos, other) {
                    neighbors.push(neighbor);
                }
            }
        }

        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Whether `a` and `b` touch.
    pub fn are_neighbors(&self, a: CellId, b: CellId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(board: &Board, coords: Coord3, normal: Direction) -> CellId {
        board.cell_at(coords, normal).unwrap()
    }

    #[test]
    fn face_interior_sees_only_its_face() {
        let board = Board::build(3).unwrap();
        let center = id(&board, [1, 2, 1], Direction::PosY);

        let neighbors = board.neighbors(center);

        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.iter().all(|&n| board[n].normal() == Direction::PosY));
    }

    #[test]
    fn edge_cell_reaches_across_the_edge() {
        let board = Board::build(3).unwrap();
        let edge = id(&board, [2, 2, 1], Direction::PosY);

        let neighbors = board.neighbors(edge);
        let across = neighbors
            .iter()
            .filter(|&&n| board[n].normal() == Direction::PosX)
            .count();

        assert_eq!(neighbors.len(), 8);
        assert_eq!(across, 3);
        assert!(board.are_neighbors(edge, id(&board, [2, 2, 1], Direction::PosX)));
        assert!(board.are_neighbors(edge, id(&board, [2, 2, 0], Direction::PosX)));
        assert!(!board.are_neighbors(edge, id(&board, [2, 1, 1], Direction::PosX)));
    }

    #[test]
    fn corner_cell_touches_all_three_faces() {
        let board = Board::build(3).unwrap();
        let corner = id(&board, [0, 0, 0], Direction::NegX);

        let neighbors = board.neighbors(corner);
        let on = |normal: Direction| {
            neighbors
                .iter()
                .filter(|&&n| board[n].normal() == normal)
                .count()
        };

        assert_eq!(neighbors.len(), 7);
        assert_eq!(on(Direction::NegX), 3);
        assert_eq!(on(Direction::NegY), 2);
        assert_eq!(on(Direction::NegZ), 2);
    }

    #[test]
    fn smallest_cube_is_all_corners() {
        let board = Board::build(2).unwrap();

        for id in board.ids() {
            assert_eq!(board.neighbors(id).len(), 7);
        }
    }
}
