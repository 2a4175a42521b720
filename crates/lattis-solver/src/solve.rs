//! The observe/propagate loop and the retrying entry point.

use crate::observe::observe;
use crate::propagate::propagate;
use crate::queue::WorkQueue;
use indexmap::IndexMap;
use lattis_core::{GridPosition, Resolution, TileOption};
use lattis_grid::{Grid, GridError, RemainingTiles, Tile};
use lattis_model::ConstraintModel;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::fmt;

/// Parameters for one [`collapse`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveConfig {
    /// Grid extent to solve.
    pub resolution: Resolution,
    /// Options pre-placed at zero-based grid positions before the
    /// first observation. Out-of-bounds positions are ignored.
    pub starter_options: IndexMap<GridPosition, TileOption>,
    /// Number of attempts before giving up. Must be at least 1.
    pub try_count: u32,
    /// Seed for the whole solve; 0 asks for a freshly generated one.
    pub random_seed: u64,
}

impl SolveConfig {
    /// A single-attempt configuration with a fresh seed.
    pub fn new(resolution: Resolution) -> SolveConfig {
        SolveConfig {
            resolution,
            starter_options: IndexMap::new(),
            try_count: 1,
            random_seed: 0,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.try_count < 1 {
            return Err(SolveError::InvalidTryCount(self.try_count));
        }
        Ok(())
    }
}

/// A fully collapsed grid and how it was reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// The solved extent.
    pub resolution: Resolution,
    /// One collapsed tile per cell, in flat-index order.
    pub tiles: Vec<Tile>,
    /// The seed of the successful attempt.
    pub seed: u64,
    /// How many attempts were made, counting the successful one.
    pub attempts: u32,
    /// Propagation waves processed during the successful attempt.
    pub propagation_waves: u32,
}

impl Solution {
    /// The chosen option of every collapsed cell, in flat-index order.
    pub fn options(&self) -> impl Iterator<Item = &TileOption> {
        self.tiles.iter().filter_map(Tile::collapsed_option)
    }

    /// The cells a placement collaborator should instantiate: position
    /// and chosen option of every cell whose option is spawnable under
    /// `model`.
    pub fn spawnable_cells<'a>(
        &'a self,
        model: &'a ConstraintModel,
    ) -> impl Iterator<Item = (GridPosition, &'a TileOption)> + 'a {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(move |(index, tile)| {
                let option = tile.collapsed_option()?;
                model
                    .is_spawnable(option)
                    .then(|| (self.resolution.position_of(index), option))
            })
    }
}

/// Why a solve produced no solution.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    /// `try_count` was zero.
    InvalidTryCount(u32),
    /// The grid could not be initialized from the model.
    Grid(GridError),
    /// Every attempt contradicted or produced nothing spawnable.
    Exhausted {
        /// Attempts made.
        attempts: u32,
        /// Seed of the final failed attempt, for reproduction.
        last_seed: u64,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidTryCount(count) => {
                write!(f, "try count must be at least 1, got {count}")
            }
            SolveError::Grid(e) => write!(f, "{e}"),
            SolveError::Exhausted {
                attempts,
                last_seed,
            } => write!(f, "no solution after {attempts} attempts, last seed {last_seed}"),
        }
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SolveError::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SolveError {
    fn from(e: GridError) -> SolveError {
        SolveError::Grid(e)
    }
}

/// Run one attempt's observe/propagate loop to completion.
///
/// Each observation uses the current seed, then the seed is
/// deterministically stepped for the next one. A contradiction fails
/// the attempt immediately. A fully collapsed grid still fails if
/// every cell ended up with a non-spawnable option, since such a solve
/// places nothing.
///
/// On success `waves` holds the total propagation waves processed.
pub fn observation_propagation(
    model: &ConstraintModel,
    grid: &mut Grid,
    remaining: &mut RemainingTiles,
    queue: &mut WorkQueue,
    seed: u64,
    waves: &mut u32,
) -> bool {
    let mut step_seed = seed;
    while observe(model, grid, remaining, queue, step_seed) {
        match propagate(model, grid, remaining, queue) {
            Ok(attempt_waves) => *waves += attempt_waves,
            Err(_) => return false,
        }
        step_seed = step_seed.wrapping_sub(1);
    }
    !all_tiles_non_spawnable(model, grid)
}

fn all_tiles_non_spawnable(model: &ConstraintModel, grid: &Grid) -> bool {
    !grid
        .tiles()
        .iter()
        .filter_map(Tile::collapsed_option)
        .any(|option| model.is_spawnable(option))
}

/// Solve a grid against a model, retrying with derived seeds.
///
/// The initial grid is built once; every attempt works on a fresh copy
/// of it. The first attempt uses `random_seed` (or a generated seed if
/// it is 0); each later attempt draws its seed from a secondary stream
/// seeded with the first, so the whole retry chain is reproducible
/// from `(random_seed, try_count)`. Returns the first successful
/// attempt's tiles and seed, or [`SolveError::Exhausted`] carrying the
/// last seed tried.
pub fn collapse(model: &ConstraintModel, config: &SolveConfig) -> Result<Solution, SolveError> {
    config.validate()?;

    let mut seed = if config.random_seed != 0 {
        config.random_seed
    } else {
        rand::thread_rng().gen_range(1..=u64::MAX)
    };

    let (initial_grid, initial_remaining) =
        Grid::initialize(model, config.resolution, &config.starter_options)?;
    let mut seed_stream = ChaCha8Rng::seed_from_u64(seed);

    for attempt in 1..=config.try_count {
        if attempt > 1 {
            seed = seed_stream.gen_range(1..=u64::MAX);
        }
        let mut grid = initial_grid.clone();
        let mut remaining = initial_remaining.clone();
        let mut queue = WorkQueue::new();
        let mut waves = 0;

        if observation_propagation(model, &mut grid, &mut remaining, &mut queue, seed, &mut waves)
        {
            return Ok(Solution {
                resolution: config.resolution,
                tiles: grid.into_tiles(),
                seed,
                attempts: attempt,
                propagation_waves: waves,
            });
        }
    }

    Err(SolveError::Exhausted {
        attempts: config.try_count,
        last_seed: seed,
    })
}
