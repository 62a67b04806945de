use serde::{Deserialize, Serialize};

/// Single lattice axis value, used for cube size and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Lattice position `[x, y, z]`, each component in `[0, size - 1]`.
pub type Coord3 = [Coord; 3];

/// Largest supported cube edge, keeps `6 * size^2` inside `CellCount`.
pub const MAX_SIZE: Coord = 100;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord3 {
    type Output = [usize; 3];

    fn to_nd_index(self) -> Self::Output {
        [self[0].into(), self[1].into(), self[2].into()]
    }
}

/// Number of surface cells on a cube with edge `size`.
pub const fn surface_cells(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size).saturating_mul(6)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// The two remaining axes in cyclic order, `X -> (Y, Z)`, `Y -> (Z, X)`, `Z -> (X, Y)`.
    pub const fn others(self) -> (Axis, Axis) {
        match self {
            Self::X => (Self::Y, Self::Z),
            Self::Y => (Self::Z, Self::X),
            Self::Z => (Self::X, Self::Y),
        }
    }

    /// The axis that is neither `a` nor `b`. Both must differ.
    pub const fn third(a: Axis, b: Axis) -> Axis {
        match (a, b) {
            (Self::X, Self::Y) | (Self::Y, Self::X) => Self::Z,
            (Self::Y, Self::Z) | (Self::Z, Self::Y) => Self::X,
            _ => Self::Y,
        }
    }
}

/// Outward normal of a cell, one of the six cardinal directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    pub const fn new(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Self::PosX,
            (Axis::X, false) => Self::NegX,
            (Axis::Y, true) => Self::PosY,
            (Axis::Y, false) => Self::NegY,
            (Axis::Z, true) => Self::PosZ,
            (Axis::Z, false) => Self::NegZ,
        }
    }

    pub const fn axis(self) -> Axis {
        match self {
            Self::PosX | Self::NegX => Axis::X,
            Self::PosY | Self::NegY => Axis::Y,
            Self::PosZ | Self::NegZ => Axis::Z,
        }
    }

    pub const fn is_positive(self) -> bool {
        matches!(self, Self::PosX | Self::PosY | Self::PosZ)
    }

    pub const fn opposite(self) -> Self {
        Self::new(self.axis(), !self.is_positive())
    }

    pub fn vector(self) -> [i8; 3] {
        let mut v = [0; 3];
        v[self.axis().index()] = if self.is_positive() { 1 } else { -1 };
        v
    }

    /// Exact conversion from a unit axis vector.
    pub fn from_vector(v: [i16; 3]) -> Option<Self> {
        match v {
            [1, 0, 0] => Some(Self::PosX),
            [-1, 0, 0] => Some(Self::NegX),
            [0, 1, 0] => Some(Self::PosY),
            [0, -1, 0] => Some(Self::NegY),
            [0, 0, 1] => Some(Self::PosZ),
            [0, 0, -1] => Some(Self::NegZ),
            _ => None,
        }
    }

    /// Snaps `v` to the cardinal direction with the largest dot product.
    ///
    /// Ties resolve to the first direction in [`Direction::ALL`], a zero
    /// vector snaps to `PosX`.
    pub fn nearest(v: [i16; 3]) -> Self {
        let mut best = Self::PosX;
        let mut best_dot = i32::MIN;
        for dir in Self::ALL {
            let dot = dir.dot(v);
            if dot > best_dot {
                best_dot = dot;
                best = dir;
            }
        }
        best
    }

    pub fn dot(self, v: [i16; 3]) -> i32 {
        let component = i32::from(v[self.axis().index()]);
        if self.is_positive() { component } else { -component }
    }

    pub const fn is_perpendicular(self, other: Direction) -> bool {
        !matches!(
            (self.axis(), other.axis()),
            (Axis::X, Axis::X) | (Axis::Y, Axis::Y) | (Axis::Z, Axis::Z)
        )
    }

    /// Whether `coords` sits on the boundary plane this direction points out of.
    pub fn lies_on(self, coords: Coord3, size: Coord) -> bool {
        let value = coords[self.axis().index()];
        if self.is_positive() {
            value == size - 1
        } else {
            value == 0
        }
    }
}

/// In-face displacements around a cell, as `(du, dv)` along the two axes orthogonal to its normal.
pub(crate) const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` along `axis`, returning a value only when it remains inside the cube.
pub(crate) fn apply_delta(coords: Coord3, axis: Axis, delta: i8, size: Coord) -> Option<Coord3> {
    let mut next = coords;
    let value = coords[axis.index()].checked_add_signed(delta)?;
    if value >= size {
        return None;
    }
    next[axis.index()] = value;
    Some(next)
}

/// Position relative to the cube centre, doubled to stay integral for even sizes.
pub(crate) fn centered(coords: Coord3, size: Coord) -> [i16; 3] {
    let s = i16::from(size) - 1;
    coords.map(|c| 2 * i16::from(c) - s)
}

/// Inverse of [`centered`], `None` when the position falls outside the cube.
pub(crate) fn uncentered(pos: [i16; 3], size: Coord) -> Option<Coord3> {
    let s = i16::from(size) - 1;
    let mut coords = [0; 3];
    for (out, p) in coords.iter_mut().zip(pos) {
        let doubled = p + s;
        if doubled < 0 || doubled % 2 != 0 || doubled / 2 > s {
            return None;
        }
        *out = Coord::try_from(doubled / 2).ok()?;
    }
    Some(coords)
}
