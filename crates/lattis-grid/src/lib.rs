//! Grid and tile state for the Lattis solver.
//!
//! A [`Grid`] is a fixed-resolution 3D array of [`Tile`]s, each
//! holding the options still possible at that cell. Alongside it the
//! [`RemainingTiles`] index set tracks which cells are undetermined,
//! keeping the tied minimum-entropy indices at the front so the next
//! observation can pick among them without a full scan. [`GridFrame`]
//! handles the world-space mapping at the boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod frame;
mod grid;
mod remaining;
mod tile;

pub use error::GridError;
pub use frame::GridFrame;
pub use grid::Grid;
pub use remaining::RemainingTiles;
pub use tile::{Tile, ENTROPY_DECIDED};
