//! Lattis: a 3D wave function collapse solver.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Lattis sub-crates. For most users, adding `lattis` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lattis::prelude::*;
//!
//! // Learn an adjacency model from an example layout: one block,
//! // bordered by open space.
//! let samples = [PlacedSample::new([0.0, 0.0, 0.0], ObjectId::asset("block"))];
//! let config = DeriveConfig {
//!     floor_is_border: false,
//!     ..DeriveConfig::new(100.0)
//! };
//! let (model, warnings) = derive_from_layout(&samples, &config).unwrap();
//! assert!(warnings.is_empty());
//!
//! // Solve a 4x4x4 grid with that model, pinning one cell.
//! let mut solve = SolveConfig::new(Resolution::new(4, 4, 4));
//! solve.starter_options.insert(GridPosition::new(1, 1, 1), TileOption::asset("block"));
//! solve.random_seed = 42;
//! let solution = collapse(&model, &solve).unwrap();
//! assert_eq!(solution.tiles.len(), 64);
//! assert!(solution.tiles.iter().all(|tile| tile.is_collapsed()));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lattis-core` | Options, directions, rotations, grid addressing |
//! | [`model`] | `lattis-model` | The adjacency constraint model and layout derivation |
//! | [`grid`] | `lattis-grid` | Grid and tile state, the remaining-index set, world framing |
//! | [`solver`] | `lattis-solver` | Observation, propagation, and the retrying solve loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Options, directions, rotations, and grid addressing (`lattis-core`).
///
/// Contains the option vocabulary ([`types::TileOption`],
/// [`types::ObjectId`]), the six-direction adjacency algebra, and the
/// position/index bijection.
pub use lattis_core as types;

/// Adjacency constraint model and layout derivation (`lattis-model`).
///
/// Build a [`model::ConstraintModel`] by hand with
/// [`model::ConstraintModel::add_constraint`] or learn one from an
/// example layout with [`model::derive_from_layout`].
pub use lattis_model as model;

/// Grid and tile state (`lattis-grid`).
///
/// [`grid::Grid`] holds per-cell [`grid::Tile`]s;
/// [`grid::GridFrame`] maps cells to world space at the boundary.
pub use lattis_grid as grid;

/// Observation, propagation, and solve orchestration (`lattis-solver`).
///
/// [`solver::collapse`] is the top-level entry point; [`solver::observe`]
/// and [`solver::propagate`] are exposed for finer-grained control.
pub use lattis_solver as solver;

/// Common imports for typical Lattis usage.
///
/// ```rust
/// use lattis::prelude::*;
/// ```
pub mod prelude {
    // Core vocabulary
    pub use lattis_core::{
        Direction, GridPosition, ObjectId, Resolution, Scale3, TileOption, Yaw,
    };

    // Model building and derivation
    pub use lattis_model::{
        derive_from_layout, derive_from_positions, quantize_layout, ConstraintModel, DeriveConfig,
        DeriveError, DeriveWarning, PlacedSample,
    };

    // Grid state
    pub use lattis_grid::{Grid, GridError, GridFrame, RemainingTiles, Tile};

    // Solving
    pub use lattis_solver::{collapse, Contradiction, SolveConfig, SolveError, Solution};
}
