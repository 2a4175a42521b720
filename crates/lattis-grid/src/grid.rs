//! The 3D tile array and its initialization.

use crate::error::GridError;
use crate::remaining::RemainingTiles;
use crate::tile::Tile;
use indexmap::IndexMap;
use lattis_core::{GridPosition, Resolution, TileOption};
use lattis_model::ConstraintModel;

/// A fixed-size 3D array of [`Tile`]s addressed by flat index.
///
/// Each solve attempt owns one grid exclusively; retries clone the
/// initial state rather than reusing a mutated grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    resolution: Resolution,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build the starting grid and its remaining-tile index set.
    ///
    /// Every cell receives the shared maximally undetermined tile
    /// unless a starter option is supplied for its position, in which
    /// case the cell starts as a singleton with its entropy computed
    /// from the model. Starter positions outside the grid are ignored.
    ///
    /// The remaining set is filled incrementally: the first cell
    /// establishes the running minimum entropy; a later cell with
    /// strictly lower entropy is swapped to the front and resets the
    /// tie run, and one equal to the minimum (below the undetermined
    /// baseline) is swapped just past the last tied entry. This yields
    /// the tie-run-at-front arrangement without a sort.
    pub fn initialize(
        model: &ConstraintModel,
        resolution: Resolution,
        starter_options: &IndexMap<GridPosition, TileOption>,
    ) -> Result<(Grid, RemainingTiles), GridError> {
        let cell_count = resolution.cell_count();
        if cell_count == 0 {
            return Err(GridError::EmptyResolution(resolution));
        }
        let initial = Tile::initial(model)?;
        let baseline_entropy = initial.entropy;

        let mut tiles = Vec::with_capacity(cell_count);
        let mut remaining = RemainingTiles::with_capacity(cell_count);
        let mut min_entropy = baseline_entropy;
        let mut tie_end = 0;

        for index in 0..cell_count {
            let position = resolution.position_of(index);
            if let Some(option) = starter_options.get(&position) {
                let entropy = model.shannon_entropy([option]);
                tiles.push(Tile::new(vec![option.clone()], entropy));
                remaining.push(index);

                let last = remaining.len() - 1;
                if entropy < min_entropy {
                    remaining.swap(0, last);
                    min_entropy = entropy;
                    tie_end = 0;
                } else if entropy == min_entropy && entropy != baseline_entropy {
                    tie_end += 1;
                    remaining.swap(tie_end, last);
                }
            } else {
                tiles.push(initial.clone());
                remaining.push(index);
            }
        }

        Ok((Grid { resolution, tiles }, remaining))
    }

    /// The grid's extent.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid has no cells. Never true for an initialized
    /// grid.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in flat-index order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tile at a flat index.
    pub fn tile(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }

    /// Replace the tile at a flat index.
    pub fn set_tile(&mut self, index: usize, tile: Tile) {
        self.tiles[index] = tile;
    }

    /// Whether every tile is collapsed.
    pub fn is_fully_collapsed(&self) -> bool {
        self.tiles.iter().all(Tile::is_collapsed)
    }

    /// Consume the grid into its flat tile array.
    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }
}
