//! Mapping between grid cells and world space.

use lattis_core::{GridPosition, Resolution};

/// The spatial frame a grid lives in: a world-space origin and the
/// tile size cells are quantized by.
///
/// Solver combinatorics never touch this; it exists for the boundary
/// with placement collaborators, which address cells either zero-based
/// (as the solver does), centred on the grid's middle, or in absolute
/// cells shared between grids with different origins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridFrame {
    origin: [f64; 3],
    tile_size: f64,
}

impl GridFrame {
    /// A frame at a world origin with the given tile size.
    pub fn new(origin: [f64; 3], tile_size: f64) -> GridFrame {
        GridFrame { origin, tile_size }
    }

    /// The world origin.
    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    /// The tile size.
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// The absolute cell containing the origin.
    fn origin_cell(&self) -> GridPosition {
        GridPosition::new(
            (self.origin[0] / self.tile_size).floor() as i32,
            (self.origin[1] / self.tile_size).floor() as i32,
            (self.origin[2] / self.tile_size).floor() as i32,
        )
    }

    /// The absolute cell containing a world-space point.
    pub fn world_to_grid(&self, point: [f64; 3]) -> GridPosition {
        GridPosition::new(
            (point[0] / self.tile_size).floor() as i32,
            (point[1] / self.tile_size).floor() as i32,
            (point[2] / self.tile_size).floor() as i32,
        )
    }

    /// Convert a centred cell of this frame to an absolute cell.
    pub fn relative_to_absolute(&self, relative: GridPosition) -> GridPosition {
        relative + self.origin_cell()
    }

    /// Convert an absolute cell to a centred cell of this frame.
    pub fn absolute_to_relative(&self, absolute: GridPosition) -> GridPosition {
        absolute - self.origin_cell()
    }

    /// Convert an absolute cell to the zero-based starter position it
    /// occupies on a grid of the given resolution.
    pub fn starter_cell(&self, absolute: GridPosition, resolution: Resolution) -> GridPosition {
        self.absolute_to_relative(absolute) + resolution.center_offset()
    }

    /// Centred position of a zero-based cell.
    pub fn centred(resolution: Resolution, zero_based: GridPosition) -> GridPosition {
        zero_based - resolution.center_offset()
    }

    /// Whether a centred cell lies strictly inside the grid on every
    /// axis, away from the outer shell.
    pub fn is_strictly_interior(resolution: Resolution, centred: GridPosition) -> bool {
        let half = resolution.center_offset();
        centred.x > -half.x
            && centred.x < half.x
            && centred.y > -half.y
            && centred.y < half.y
            && centred.z > -half.z
            && centred.z < half.z
    }

    /// World-space centre of a centred cell: its minimum corner offset
    /// by half a tile on each axis.
    pub fn world_center(&self, centred: GridPosition) -> [f64; 3] {
        let half = self.tile_size * 0.5;
        [
            self.origin[0] + centred.x as f64 * self.tile_size + half,
            self.origin[1] + centred.y as f64 * self.tile_size + half,
            self.origin[2] + centred.z as f64 * self.tile_size + half,
        ]
    }
}
