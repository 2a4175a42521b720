//! A single cell's remaining possibilities.

use crate::error::GridError;
use lattis_core::{ObjectId, TileOption};
use lattis_model::ConstraintModel;

/// Entropy sentinel given to a tile the moment it is collapsed, so it
/// never again reports as the minimum.
pub const ENTROPY_DECIDED: f64 = f64::MAX;

/// One grid cell: the options still possible there and the cached
/// entropy of that set.
///
/// A tile is *collapsed* with exactly one option left, a
/// *contradiction* with none, and *undetermined* otherwise. The cached
/// entropy is recomputed by whoever shrinks the option set.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Options still possible at this cell. Stored order is the
    /// model's key order and drives the weighted draw.
    pub remaining_options: Vec<TileOption>,
    /// Cached weighted Shannon entropy of `remaining_options`.
    pub entropy: f64,
}

impl Tile {
    /// A tile from an explicit option set and its entropy.
    pub fn new(remaining_options: Vec<TileOption>, entropy: f64) -> Tile {
        Tile {
            remaining_options,
            entropy,
        }
    }

    /// A tile already fixed to a single option, carrying the
    /// [`ENTROPY_DECIDED`] sentinel.
    pub fn decided(option: TileOption) -> Tile {
        Tile {
            remaining_options: vec![option],
            entropy: ENTROPY_DECIDED,
        }
    }

    /// The maximally undetermined tile: every key option in the model
    /// except `Border`, with entropy computed over that full set.
    ///
    /// Fails with [`GridError::NoUsableOptions`] when nothing but
    /// `Border` or non-physical sentinels remains, since such a grid
    /// could never produce a placement.
    pub fn initial(model: &ConstraintModel) -> Result<Tile, GridError> {
        let remaining_options: Vec<TileOption> = model
            .keys()
            .filter(|key| key.object != ObjectId::Border)
            .cloned()
            .collect();
        if remaining_options.is_empty()
            || remaining_options.iter().all(TileOption::is_sentinel)
        {
            return Err(GridError::NoUsableOptions);
        }
        let entropy = model.shannon_entropy(&remaining_options);
        Ok(Tile {
            remaining_options,
            entropy,
        })
    }

    /// Whether exactly one option remains.
    pub fn is_collapsed(&self) -> bool {
        self.remaining_options.len() == 1
    }

    /// The sole remaining option, if collapsed.
    pub fn collapsed_option(&self) -> Option<&TileOption> {
        match self.remaining_options.as_slice() {
            [option] => Some(option),
            _ => None,
        }
    }
}
