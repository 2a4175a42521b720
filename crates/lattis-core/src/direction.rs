//! Axis-aligned adjacency directions.

use std::fmt;

/// One of the six axis-aligned neighbour relations on a 3D grid.
///
/// Constraints are keyed by direction: "option B may sit in direction
/// `d` of option A". [`opposite`](Direction::opposite) is an involution
/// and [`rotated_cw_z`](Direction::rotated_cw_z) cyclically permutes
/// the four horizontal directions while leaving the vertical pair
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards +X.
    PosX,
    /// Towards -X.
    NegX,
    /// Towards +Y.
    PosY,
    /// Towards -Y.
    NegY,
    /// Towards +Z (up).
    PosZ,
    /// Towards -Z (down).
    NegZ,
}

impl Direction {
    /// All six directions in canonical order.
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }

    /// Rotate 90 degrees clockwise about the Z axis (viewed from +Z).
    ///
    /// `PosX -> PosY -> NegX -> NegY -> PosX`; the vertical directions
    /// map to themselves. Applying this four times is the identity.
    pub fn rotated_cw_z(self) -> Direction {
        match self {
            Direction::PosX => Direction::PosY,
            Direction::PosY => Direction::NegX,
            Direction::NegX => Direction::NegY,
            Direction::NegY => Direction::PosX,
            Direction::PosZ => Direction::PosZ,
            Direction::NegZ => Direction::NegZ,
        }
    }

    /// Unit step along this direction as `(dx, dy, dz)`.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::PosX => (1, 0, 0),
            Direction::NegX => (-1, 0, 0),
            Direction::PosY => (0, 1, 0),
            Direction::NegY => (0, -1, 0),
            Direction::PosZ => (0, 0, 1),
            Direction::NegZ => (0, 0, -1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::PosX => "+X",
            Direction::NegX => "-X",
            Direction::PosY => "+Y",
            Direction::NegY => "-Y",
            Direction::PosZ => "+Z",
            Direction::NegZ => "-Z",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn opposite_negates_offset() {
        for d in Direction::ALL {
            let (x, y, z) = d.offset();
            assert_eq!(d.opposite().offset(), (-x, -y, -z));
        }
    }

    #[test]
    fn rotated_cw_z_four_times_is_identity() {
        for d in Direction::ALL {
            let r = d.rotated_cw_z().rotated_cw_z().rotated_cw_z().rotated_cw_z();
            assert_eq!(r, d);
        }
    }

    #[test]
    fn rotated_cw_z_fixes_vertical() {
        assert_eq!(Direction::PosZ.rotated_cw_z(), Direction::PosZ);
        assert_eq!(Direction::NegZ.rotated_cw_z(), Direction::NegZ);
    }

    #[test]
    fn rotated_cw_z_cycles_horizontal() {
        assert_eq!(Direction::PosX.rotated_cw_z(), Direction::PosY);
        assert_eq!(Direction::PosY.rotated_cw_z(), Direction::NegX);
        assert_eq!(Direction::NegX.rotated_cw_z(), Direction::NegY);
        assert_eq!(Direction::NegY.rotated_cw_z(), Direction::PosX);
    }
}
