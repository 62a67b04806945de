use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    pub const fn inverse(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }

    /// Right-handed angle about the positive slice axis.
    pub const fn degrees(self) -> f32 {
        match self {
            Self::Clockwise => -90.0,
            Self::CounterClockwise => 90.0,
        }
    }
}

/// One layer of the cube together with the direction it is turned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slice {
    pub axis: Axis,
    pub layer: Coord,
    pub turn: Turn,
}

impl Slice {
    pub const fn new(axis: Axis, layer: Coord, turn: Turn) -> Self {
        Self { axis, layer, turn }
    }

    /// The slice along `axis` that contains `cell`.
    pub const fn through(cell: &Cell, axis: Axis, turn: Turn) -> Self {
        Self::new(axis, cell.coords()[axis.index()], turn)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: Coord) -> Self {
        let axis = Axis::ALL[rng.random_range(0..Axis::ALL.len())];
        let layer = rng.random_range(0..size);
        let turn = if rng.random_bool(0.5) {
            Turn::Clockwise
        } else {
            Turn::CounterClockwise
        };
        Self::new(axis, layer, turn)
    }

    pub const fn inverse(self) -> Self {
        Self::new(self.axis, self.layer, self.turn.inverse())
    }

    pub fn validate(self, size: Coord) -> Result<Self> {
        if self.layer < size {
            Ok(self)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub const fn contains(self, coords: Coord3) -> bool {
        coords[self.axis.index()] == self.layer
    }
}

/// Quarter turn of `v` about `axis`.
///
/// With `(b, c)` the remaining axes in cyclic order, clockwise maps
/// `(b, c) -> (c, -b)` and counter-clockwise maps `(b, c) -> (-c, b)`.
pub fn rotate_vector(v: [i16; 3], axis: Axis, turn: Turn) -> [i16; 3] {
    let (b, c) = axis.others();
    let (vb, vc) = (v[b.index()], v[c.index()]);
    let mut out = v;
    match turn {
        Turn::Clockwise => {
            out[b.index()] = vc;
            out[c.index()] = -vb;
        }
        Turn::CounterClockwise => {
            out[b.index()] = -vc;
            out[c.index()] = vb;
        }
    }
    out
}

/// New position and outward normal of a cell carried by a quarter turn about `axis`.
pub fn rotate_cell(
    coords: Coord3,
    normal: Direction,
    axis: Axis,
    turn: Turn,
    size: Coord,
) -> Result<(Coord3, Direction)> {
    let pos = rotate_vector(centered(coords, size), axis, turn);
    let coords = uncentered(pos, size).ok_or(GameError::InvalidCoords)?;

    let mut normal = Direction::nearest(rotate_vector(normal.vector().map(i16::from), axis, turn));
    if normal.dot(pos) < 0 {
        log::warn!("Rotated normal {:?} points inward at {:?}, flipped", normal, coords);
        normal = normal.opposite();
    }
    Ok((coords, normal))
}

/// Handed to the presentation layer when a rotation starts, describes what to animate.
#[derive(Clone, Debug, PartialEq)]
pub struct RotationHandle {
    pub slice: Slice,
    pub cells: Vec<CellId>,
    pub duration_millis: u32,
}

impl Board {
    pub fn slice_cells(&self, slice: Slice) -> impl Iterator<Item = CellId> + '_ {
        self.iter()
            .filter(move |(_, cell)| slice.contains(cell.coords()))
            .map(|(id, _)| id)
    }

    /// Turns every cell in `slice`, then rebuilds the index and mine counts.
    ///
    /// Returns how many cells moved.
    pub(crate) fn apply_rotation(&mut self, slice: Slice) -> Result<CellCount> {
        let slice = slice.validate(self.size())?;
        let size = self.size();

        let mut moves = Vec::new();
        for id in self.slice_cells(slice) {
            let cell = &self[id];
            let next = rotate_cell(cell.coords(), cell.normal(), slice.axis, slice.turn, size)?;
            moves.push((id, next));
        }
        for &(id, (coords, normal)) in &moves {
            self.cell_mut(id).set_position(coords, normal);
        }

        self.rebuild_index();
        self.recompute_adjacency();
        log::debug!("Rotated {:?}, {} cells moved", slice, moves.len());
        Ok(moves.len() as CellCount)
    }
}
