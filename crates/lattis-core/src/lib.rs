//! Core types for the Lattis wave-function-collapse solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types shared by the model, grid, and solver crates:
//! object identities, canonical rotations, tile options, adjacency
//! directions, and the 3D grid addressing scheme.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod direction;
mod option;
mod position;
mod rotation;

pub use direction::Direction;
pub use option::{ObjectId, Scale3, TileOption};
pub use position::{GridPosition, Resolution};
pub use rotation::Yaw;
