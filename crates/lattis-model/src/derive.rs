//! Learning a [`ConstraintModel`] from an example layout.
//!
//! Derivation quantizes a set of world-space placements onto an integer
//! grid, records which options were observed next to which, wraps the
//! layout in a one-cell border shell so exterior-facing constraints can
//! be learned, and optionally multiplies every learned constraint into
//! its three vertical-axis rotational variants.

use crate::model::ConstraintModel;
use indexmap::{IndexMap, IndexSet};
use lattis_core::{Direction, GridPosition, ObjectId, Scale3, TileOption, Yaw};
use std::error::Error;
use std::fmt;

/// A single placed object observed in an example layout.
///
/// Positions are in world units; `yaw_degrees` is the raw orientation
/// and is canonicalized to a [`Yaw`] during quantization.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedSample {
    /// World-space location of the object's origin.
    pub position: [f64; 3],
    /// What was placed.
    pub object: ObjectId,
    /// Raw orientation about the vertical axis, in degrees.
    pub yaw_degrees: f64,
    /// Scale the object was placed at.
    pub scale: Scale3,
}

impl PlacedSample {
    /// An unrotated, unit-scale sample.
    pub fn new(position: [f64; 3], object: ObjectId) -> PlacedSample {
        PlacedSample {
            position,
            object,
            yaw_degrees: 0.0,
            scale: Scale3::ONE,
        }
    }

    /// The same sample with a different raw yaw.
    pub fn with_yaw(mut self, yaw_degrees: f64) -> PlacedSample {
        self.yaw_degrees = yaw_degrees;
        self
    }

    /// The same sample with a different scale.
    pub fn with_scale(mut self, scale: Scale3) -> PlacedSample {
        self.scale = scale;
        self
    }
}

/// Settings controlling derivation.
#[derive(Clone, Debug, PartialEq)]
pub struct DeriveConfig {
    /// Spatial quantization unit in world units. Must be finite and
    /// positive.
    pub tile_size: f64,
    /// Treat the layout's outer shell as bordering open space, adding
    /// `Empty` adjacency for every exterior-facing side.
    pub empty_border: bool,
    /// Treat the layout's minimum-Z exterior as a floor, keyed by the
    /// one-sided `Border` sentinel.
    pub floor_is_border: bool,
    /// Reset every contribution to 1 before weights are computed, so
    /// all options draw with equal probability.
    pub uniform_weights: bool,
    /// Multiply every learned constraint into its 90/180/270-degree
    /// vertical-axis rotational variants.
    pub derive_z_rotations: bool,
    /// Identities appended to the model's spawn-exclusion set.
    pub spawn_exclusions: IndexSet<ObjectId>,
    /// Identities whose orientation is discarded: their samples are
    /// quantized at yaw 0 and they are never rotated into variants.
    pub ignore_rotation: IndexSet<ObjectId>,
}

impl DeriveConfig {
    /// A configuration with the given tile size, bordered by open
    /// space, with a `Border` floor, observed weights, and no
    /// rotational variants.
    pub fn new(tile_size: f64) -> DeriveConfig {
        DeriveConfig {
            tile_size,
            empty_border: true,
            floor_is_border: true,
            uniform_weights: false,
            derive_z_rotations: false,
            spawn_exclusions: IndexSet::new(),
            ignore_rotation: IndexSet::new(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), DeriveError> {
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(DeriveError::InvalidTileSize(self.tile_size));
        }
        Ok(())
    }
}

impl Default for DeriveConfig {
    fn default() -> Self {
        DeriveConfig::new(100.0)
    }
}

/// Why derivation could not produce a model.
#[derive(Clone, Debug, PartialEq)]
pub enum DeriveError {
    /// No samples survived quantization.
    EmptyLayout,
    /// The tile size was zero, negative, or non-finite.
    InvalidTileSize(f64),
}

impl fmt::Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeriveError::EmptyLayout => write!(f, "example layout contains no samples"),
            DeriveError::InvalidTileSize(size) => {
                write!(f, "tile size must be finite and positive, got {size}")
            }
        }
    }
}

impl Error for DeriveError {}

/// A non-fatal condition noticed during quantization.
#[derive(Clone, Debug, PartialEq)]
pub enum DeriveWarning {
    /// Two samples quantized to the same cell; the later one was
    /// skipped.
    OverlappingSample {
        /// The contested cell.
        position: GridPosition,
        /// The sample that was skipped.
        skipped: TileOption,
    },
}

impl fmt::Display for DeriveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeriveWarning::OverlappingSample { position, skipped } => {
                write!(f, "{skipped} overlaps an earlier sample at {position}, skipping")
            }
        }
    }
}

/// Quantize world-space samples onto the integer grid.
///
/// Cell coordinates are taken relative to the first sample and rounded
/// half away from zero. Later samples landing on an occupied cell are
/// skipped with a warning. Identities in `ignore_rotation` are
/// recorded at yaw 0 regardless of their sampled orientation.
pub fn quantize_layout(
    samples: &[PlacedSample],
    tile_size: f64,
    ignore_rotation: &IndexSet<ObjectId>,
) -> (IndexMap<GridPosition, TileOption>, Vec<DeriveWarning>) {
    let mut layout = IndexMap::with_capacity(samples.len());
    let mut warnings = Vec::new();

    let Some(first) = samples.first() else {
        return (layout, warnings);
    };
    let origin = first.position;

    for sample in samples {
        let cell = GridPosition::new(
            ((sample.position[0] - origin[0]) / tile_size).round() as i32,
            ((sample.position[1] - origin[1]) / tile_size).round() as i32,
            ((sample.position[2] - origin[2]) / tile_size).round() as i32,
        );

        let yaw = if ignore_rotation.contains(&sample.object) {
            Yaw::Deg0
        } else {
            Yaw::from_degrees(sample.yaw_degrees)
        };
        let option = TileOption::new(sample.object.clone(), yaw, sample.scale);

        if layout.contains_key(&cell) {
            warnings.push(DeriveWarning::OverlappingSample {
                position: cell,
                skipped: option,
            });
            continue;
        }
        layout.insert(cell, option);
    }

    (layout, warnings)
}

/// Derive a constraint model from already-quantized cell placements.
///
/// The layout is shifted so its minimum corner sits one cell inside a
/// border shell, then each occupied cell contributes a constraint per
/// axis neighbour: occupied neighbours are recorded directly, the
/// minimum-Z exterior becomes a `Border` floor when configured, and
/// the remaining exterior and interior gaps become `Empty` adjacency.
pub fn derive_from_positions(
    layout: &IndexMap<GridPosition, TileOption>,
    config: &DeriveConfig,
) -> Result<ConstraintModel, DeriveError> {
    config.validate()?;
    if layout.is_empty() {
        return Err(DeriveError::EmptyLayout);
    }

    let mut model = ConstraintModel::new(config.tile_size);

    // Empty tiles always sit next to each other.
    for direction in Direction::ALL {
        model.add_constraint(TileOption::empty(), direction, TileOption::empty());
    }

    // Shift so the minimum corner lands at (1, 1, 1) inside the shell.
    let mut min = GridPosition::splat(i32::MAX);
    let mut max = GridPosition::splat(i32::MIN);
    for &position in layout.keys() {
        min = min.min(position);
        max = max.max(position);
    }
    let span = max - min;
    let bordered = lattis_core::Resolution::new(
        span.x as u32 + 3,
        span.y as u32 + 3,
        span.z as u32 + 3,
    );
    let shift = GridPosition::splat(1) - min;
    let mut bordered_layout: IndexMap<GridPosition, &TileOption> =
        IndexMap::with_capacity(layout.len());
    for (&position, option) in layout {
        bordered_layout.insert(position + shift, option);
    }

    for (&position, &option) in &bordered_layout {
        for (neighbour, direction) in bordered.neighbour_positions(position) {
            if let Some(&occupant) = bordered_layout.get(&neighbour) {
                model.add_constraint(option.clone(), direction, occupant.clone());
            } else if config.floor_is_border && neighbour.z == 0 {
                model.add_constraint(TileOption::border(), direction.opposite(), option.clone());
            } else if neighbour.x == 0
                || neighbour.y == 0
                || neighbour.z == 0
                || neighbour.x == bordered.x as i32 - 1
                || neighbour.y == bordered.y as i32 - 1
                || neighbour.z == bordered.z as i32 - 1
            {
                if config.empty_border {
                    model.add_constraint(option.clone(), direction, TileOption::empty());
                    model.add_constraint(TileOption::empty(), direction.opposite(), option.clone());
                }
            } else {
                // An interior gap with no sample in it.
                model.add_constraint(option.clone(), direction, TileOption::empty());
                model.add_constraint(TileOption::empty(), direction.opposite(), option.clone());
            }
        }
    }

    if config.derive_z_rotations {
        add_rotational_variants(&mut model, &config.ignore_rotation);
    }

    let mut inferred = Vec::new();
    infer_through_sentinel(&model, &TileOption::empty(), &mut inferred);
    infer_through_sentinel(&model, &TileOption::void(), &mut inferred);
    for (key, direction, neighbour) in inferred {
        model.add_constraint(key, direction, neighbour);
    }

    if config.uniform_weights {
        model.set_all_contributions(1);
    }
    // Border only ever constrains, it must never be drawn.
    model.set_contribution(&TileOption::border(), 0);
    model.weights_from_contributions();

    for id in &config.spawn_exclusions {
        model.exclude_from_spawn(id.clone());
    }

    Ok(model)
}

/// Derive a constraint model straight from world-space samples.
///
/// Combines [`quantize_layout`] and [`derive_from_positions`],
/// returning the model together with any quantization warnings.
pub fn derive_from_layout(
    samples: &[PlacedSample],
    config: &DeriveConfig,
) -> Result<(ConstraintModel, Vec<DeriveWarning>), DeriveError> {
    config.validate()?;
    let (layout, warnings) = quantize_layout(samples, config.tile_size, &config.ignore_rotation);
    let model = derive_from_positions(&layout, config)?;
    Ok((model, warnings))
}

/// Rotate every learned constraint 90, 180, and 270 degrees about the
/// vertical axis and record the variants.
///
/// Sentinel identities and identities in `ignore_rotation` keep their
/// orientation while the direction still rotates, so a fixed option's
/// relationship to a rotating neighbour is preserved from every side.
fn add_rotational_variants(model: &mut ConstraintModel, ignore_rotation: &IndexSet<ObjectId>) {
    let rotates = |option: &TileOption| -> bool {
        !option.is_sentinel() && !ignore_rotation.contains(&option.object)
    };

    let mut variants = Vec::new();
    for (key, direction, neighbour) in model.iter_constraints() {
        let key_rotates = rotates(key);
        let neighbour_rotates = rotates(neighbour);

        let mut key = key.clone();
        let mut neighbour = neighbour.clone();
        let mut direction = direction;
        for _ in 0..3 {
            if key_rotates {
                key.yaw = key.yaw.rotated_cw();
            }
            if neighbour_rotates {
                neighbour.yaw = neighbour.yaw.rotated_cw();
            }
            direction = direction.rotated_cw_z();
            variants.push((key.clone(), direction, neighbour.clone()));
        }
    }

    for (key, direction, neighbour) in variants {
        model.add_constraint(key, direction, neighbour);
    }
}

/// Close adjacency through a non-physical sentinel: whenever
/// `sentinel -> dir -> A` and `sentinel -> opposite(dir) -> B` both
/// exist, options A and B are also directly compatible across that
/// axis, so record `A -> opposite(dir) -> B`.
///
/// Collects into `inferred` without touching the model, so every
/// sentinel pass reads the same pre-closure tables; the caller inserts
/// the accumulated triples once all passes have run.
fn infer_through_sentinel(
    model: &ConstraintModel,
    sentinel: &TileOption,
    inferred: &mut Vec<(TileOption, Direction, TileOption)>,
) {
    for direction in Direction::ALL {
        for a in model.options(sentinel, direction) {
            if a == sentinel {
                continue;
            }
            for b in model.options(sentinel, direction.opposite()) {
                if b == sentinel {
                    continue;
                }
                inferred.push((a.clone(), direction.opposite(), b.clone()));
            }
        }
    }
}
