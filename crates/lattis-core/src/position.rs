//! 3D grid positions and the position/index bijection.

use crate::direction::Direction;
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Add, Sub};

/// An integer cell position on a 3D grid.
///
/// Positions may be negative during layout quantization; the solver
/// itself only addresses positions inside a [`Resolution`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
    /// Z component.
    pub z: i32,
}

impl GridPosition {
    /// A position from explicit components.
    pub fn new(x: i32, y: i32, z: i32) -> GridPosition {
        GridPosition { x, y, z }
    }

    /// A position with all components equal to `v`.
    pub fn splat(v: i32) -> GridPosition {
        GridPosition { x: v, y: v, z: v }
    }

    /// Component-wise minimum.
    pub fn min(self, other: GridPosition) -> GridPosition {
        GridPosition {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Component-wise maximum.
    pub fn max(self, other: GridPosition) -> GridPosition {
        GridPosition {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// The position one step along `direction`.
    pub fn stepped(self, direction: Direction) -> GridPosition {
        let (dx, dy, dz) = direction.offset();
        GridPosition {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl Add for GridPosition {
    type Output = GridPosition;

    fn add(self, rhs: GridPosition) -> GridPosition {
        GridPosition {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for GridPosition {
    type Output = GridPosition;

    fn sub(self, rhs: GridPosition) -> GridPosition {
        GridPosition {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The fixed extent of a 3D grid.
///
/// Cells are addressed both by [`GridPosition`] and by flat index
/// through the bijection `index = x + y*rx + z*rx*ry`, with X the
/// fastest-varying axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Cells along X.
    pub x: u32,
    /// Cells along Y.
    pub y: u32,
    /// Cells along Z.
    pub z: u32,
}

impl Resolution {
    /// A resolution from explicit extents.
    pub fn new(x: u32, y: u32, z: u32) -> Resolution {
        Resolution { x, y, z }
    }

    /// Total number of cells.
    pub fn cell_count(self) -> usize {
        (self.x as usize) * (self.y as usize) * (self.z as usize)
    }

    /// Whether `position` lies inside the grid.
    pub fn contains(self, position: GridPosition) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.z >= 0
            && position.x < self.x as i32
            && position.y < self.y as i32
            && position.z < self.z as i32
    }

    /// Flat index of `position`, or `None` if out of bounds.
    pub fn index_of(self, position: GridPosition) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let rx = self.x as usize;
        let ry = self.y as usize;
        Some(position.x as usize + position.y as usize * rx + position.z as usize * rx * ry)
    }

    /// Position of a flat index.
    ///
    /// The caller must pass `index < cell_count()`; this is the inverse
    /// of [`index_of`](Resolution::index_of) on that domain.
    pub fn position_of(self, index: usize) -> GridPosition {
        debug_assert!(index < self.cell_count());
        let rx = self.x as usize;
        let ry = self.y as usize;
        let z = index / (rx * ry);
        let y = (index - z * rx * ry) / rx;
        let x = index - y * rx - z * rx * ry;
        GridPosition::new(x as i32, y as i32, z as i32)
    }

    /// In-bounds axis neighbours of `position`, with the direction from
    /// `position` to each neighbour.
    pub fn neighbour_positions(
        self,
        position: GridPosition,
    ) -> SmallVec<[(GridPosition, Direction); 6]> {
        let mut out = SmallVec::new();
        for direction in Direction::ALL {
            let neighbour = position.stepped(direction);
            if self.contains(neighbour) {
                out.push((neighbour, direction));
            }
        }
        out
    }

    /// In-bounds axis neighbours of a flat index, with the direction
    /// from the indexed cell to each neighbour.
    pub fn neighbours(self, index: usize) -> SmallVec<[(usize, Direction); 6]> {
        let position = self.position_of(index);
        self.neighbour_positions(position)
            .into_iter()
            .filter_map(|(p, d)| self.index_of(p).map(|i| (i, d)))
            .collect()
    }

    /// Half the resolution, used to convert between zero-based and
    /// centred positions.
    pub fn center_offset(self) -> GridPosition {
        GridPosition::new(
            (self.x / 2) as i32,
            (self.y / 2) as i32,
            (self.z / 2) as i32,
        )
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}
