//! Placeable options: object identity, rotation, and scale.

use crate::rotation::Yaw;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a placeable source object.
///
/// Three process-wide sentinel identities exist alongside real assets:
/// `Empty` (open space), `Border` (the one-sided floor/boundary key)
/// and `Void` (unreachable interior). Sentinels participate in
/// adjacency like ordinary identities but are never physically
/// instantiated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectId {
    /// Open space; spawns nothing.
    Empty,
    /// Boundary sentinel used as a one-sided constraint key.
    Border,
    /// Unreachable interior space; spawns nothing.
    Void,
    /// A real placeable object, identified by an opaque path or name.
    Asset(Arc<str>),
}

impl ObjectId {
    /// An asset identity from an opaque path or name.
    pub fn asset(path: impl Into<Arc<str>>) -> ObjectId {
        ObjectId::Asset(path.into())
    }

    /// Whether this is one of the three sentinel identities.
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, ObjectId::Asset(_))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Empty => write!(f, "<empty>"),
            ObjectId::Border => write!(f, "<border>"),
            ObjectId::Void => write!(f, "<void>"),
            ObjectId::Asset(path) => write!(f, "{path}"),
        }
    }
}

/// A 3D scale vector usable as part of a hash-map key.
///
/// Equality and hashing are bitwise on the `f32` components, so two
/// scales are equal exactly when their bit patterns match. This is
/// what makes [`TileOption`] hashable; scales that survive the same
/// serialization round trip compare equal.
#[derive(Clone, Copy, Debug)]
pub struct Scale3 {
    /// X scale factor.
    pub x: f32,
    /// Y scale factor.
    pub y: f32,
    /// Z scale factor.
    pub z: f32,
}

impl Scale3 {
    /// Unit scale.
    pub const ONE: Scale3 = Scale3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    /// A scale from explicit components.
    pub fn new(x: f32, y: f32, z: f32) -> Scale3 {
        Scale3 { x, y, z }
    }

    /// A uniform scale with all components equal to `v`.
    pub fn splat(v: f32) -> Scale3 {
        Scale3 { x: v, y: v, z: v }
    }
}

impl Default for Scale3 {
    fn default() -> Self {
        Scale3::ONE
    }
}

impl PartialEq for Scale3 {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

impl Eq for Scale3 {}

impl Hash for Scale3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
        self.z.to_bits().hash(state);
    }
}

impl fmt::Display for Scale3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An immutable placeable choice: object identity, canonical rotation,
/// and scale.
///
/// Two options are equal iff all three fields match; rotations are
/// already normalized by [`Yaw`], so equality is stable. Options are
/// the keys of the constraint model and the members of every tile's
/// remaining-option set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileOption {
    /// What would be placed.
    pub object: ObjectId,
    /// Normalized orientation about the vertical axis.
    pub yaw: Yaw,
    /// Scale applied at placement time.
    pub scale: Scale3,
}

impl TileOption {
    /// An option from explicit parts.
    pub fn new(object: ObjectId, yaw: Yaw, scale: Scale3) -> TileOption {
        TileOption { object, yaw, scale }
    }

    /// An unrotated, unit-scale option for an asset identity.
    pub fn asset(path: impl Into<Arc<str>>) -> TileOption {
        TileOption::new(ObjectId::asset(path), Yaw::Deg0, Scale3::ONE)
    }

    /// The process-wide `Empty` sentinel option.
    pub fn empty() -> TileOption {
        TileOption::new(ObjectId::Empty, Yaw::Deg0, Scale3::ONE)
    }

    /// The process-wide `Border` sentinel option.
    pub fn border() -> TileOption {
        TileOption::new(ObjectId::Border, Yaw::Deg0, Scale3::ONE)
    }

    /// The process-wide `Void` sentinel option.
    pub fn void() -> TileOption {
        TileOption::new(ObjectId::Void, Yaw::Deg0, Scale3::ONE)
    }

    /// Whether the option's identity is a sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.object.is_sentinel()
    }
}

impl fmt::Display for TileOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @{}", self.object, self.yaw)
    }
}
