//! Propagation: arc consistency in waves.

use crate::queue::{enqueue_adjacent, QueueEntry, WorkQueue};
use lattis_core::TileOption;
use lattis_grid::{Grid, RemainingTiles, Tile};
use lattis_model::ConstraintModel;
use std::error::Error;
use std::fmt;

/// A tile lost its last remaining option; the attempt is unrecoverable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    /// Flat index of the tile that emptied out.
    pub index: usize,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contradiction at tile index {}", self.index)
    }
}

impl Error for Contradiction {}

/// Drain the work queue in waves until no tile changes.
///
/// For each queued entry still among the remaining indices, the
/// neighbour's option set is intersected with the union of what the
/// centre's remaining options allow in the entry's direction. A shrunk
/// but non-empty set has its entropy recomputed, its index
/// repositioned within the tie run, and its own neighbours enqueued
/// into the next wave; a set shrunk to nothing aborts the whole
/// attempt immediately.
///
/// Returns the number of extra waves processed after the initial
/// queue.
pub fn propagate(
    model: &ConstraintModel,
    grid: &mut Grid,
    remaining: &mut RemainingTiles,
    queue: &mut WorkQueue,
) -> Result<u32, Contradiction> {
    let mut next_wave = WorkQueue::new();
    let mut waves = 0;

    while !queue.is_empty() {
        for (&neighbour_index, entry) in queue.iter() {
            if !remaining.contains(neighbour_index) {
                continue;
            }

            let admissible = admissible_options(model, grid, entry);

            let current = &grid.tile(neighbour_index).remaining_options;
            let mut kept: Vec<TileOption> = Vec::with_capacity(current.len());
            let mut changed = false;
            for option in current {
                if admissible.contains(option) {
                    if !kept.contains(option) {
                        kept.push(option.clone());
                    }
                } else {
                    changed = true;
                }
            }
            if !changed {
                continue;
            }
            if kept.is_empty() {
                return Err(Contradiction {
                    index: neighbour_index,
                });
            }

            enqueue_adjacent(neighbour_index, grid.resolution(), remaining, &mut next_wave);
            let new_entropy = model.shannon_entropy(&kept);
            remaining.reposition(neighbour_index, new_entropy, grid.tiles());
            grid.set_tile(neighbour_index, Tile::new(kept, new_entropy));
        }

        std::mem::swap(queue, &mut next_wave);
        next_wave.clear();
        if !queue.is_empty() {
            waves += 1;
        }
    }

    Ok(waves)
}

/// Union, over the centre's remaining options, of what each allows in
/// the entry's direction. Order follows first appearance.
fn admissible_options(model: &ConstraintModel, grid: &Grid, entry: &QueueEntry) -> Vec<TileOption> {
    let mut admissible = Vec::new();
    for center_option in &grid.tile(entry.center_index).remaining_options {
        for option in model.options(center_option, entry.direction) {
            if !admissible.contains(option) {
                admissible.push(option.clone());
            }
        }
    }
    admissible
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use lattis_core::{Direction, GridPosition, Resolution};

    fn opt(name: &str) -> TileOption {
        TileOption::asset(name)
    }

    /// a and b each only tolerate themselves, in every direction.
    fn segregated_model() -> ConstraintModel {
        let mut model = ConstraintModel::new(100.0);
        for name in ["a", "b"] {
            for direction in Direction::ALL {
                model.add_constraint(opt(name), direction, opt(name));
            }
        }
        model.weights_from_contributions();
        model
    }

    #[test]
    fn propagation_narrows_the_neighbour_to_the_admissible_set() {
        let model = segregated_model();
        let mut starters = IndexMap::new();
        starters.insert(GridPosition::new(0, 0, 0), opt("a"));
        let (mut grid, mut remaining) =
            Grid::initialize(&model, Resolution::new(2, 1, 1), &starters).unwrap();

        // Simulate having just observed the starter cell.
        remaining.remove_at_swap(0);
        let mut queue = WorkQueue::new();
        enqueue_adjacent(0, grid.resolution(), &remaining, &mut queue);

        let waves = propagate(&model, &mut grid, &mut remaining, &mut queue).unwrap();
        assert_eq!(grid.tile(1).remaining_options, vec![opt("a")]);
        assert_eq!(waves, 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn changes_ripple_across_waves() {
        let model = segregated_model();
        let mut starters = IndexMap::new();
        starters.insert(GridPosition::new(0, 0, 0), opt("a"));
        let (mut grid, mut remaining) =
            Grid::initialize(&model, Resolution::new(3, 1, 1), &starters).unwrap();

        remaining.remove_at_swap(0);
        let mut queue = WorkQueue::new();
        enqueue_adjacent(0, grid.resolution(), &remaining, &mut queue);

        let waves = propagate(&model, &mut grid, &mut remaining, &mut queue).unwrap();
        assert_eq!(grid.tile(1).remaining_options, vec![opt("a")]);
        assert_eq!(grid.tile(2).remaining_options, vec![opt("a")]);
        // Narrowing cell 1 queues cell 2, and narrowing cell 2 queues
        // cell 1 back for a final no-op check.
        assert_eq!(waves, 2);
    }

    #[test]
    fn unchanged_neighbours_produce_no_further_work() {
        let model = segregated_model();
        let mut starters = IndexMap::new();
        starters.insert(GridPosition::new(0, 0, 0), opt("a"));
        starters.insert(GridPosition::new(1, 0, 0), opt("a"));
        let (mut grid, mut remaining) =
            Grid::initialize(&model, Resolution::new(2, 1, 1), &starters).unwrap();

        // Observe cell 0; cell 1 is already the singleton {a}.
        if let Some(slot) = remaining.slot_of(0) {
            remaining.remove_at_swap(slot);
        }
        let mut queue = WorkQueue::new();
        enqueue_adjacent(0, grid.resolution(), &remaining, &mut queue);

        let waves = propagate(&model, &mut grid, &mut remaining, &mut queue).unwrap();
        assert_eq!(waves, 0);
        assert_eq!(grid.tile(1).remaining_options, vec![opt("a")]);
    }

    #[test]
    fn emptied_neighbour_is_a_contradiction_and_left_untouched() {
        // x allows nothing anywhere; the neighbour cannot comply.
        let mut model = ConstraintModel::new(100.0);
        for direction in Direction::ALL {
            model.add_constraint(opt("y"), direction, opt("y"));
        }
        model.add_constraint(opt("x"), Direction::PosZ, opt("x"));
        model.weights_from_contributions();

        let mut starters = IndexMap::new();
        starters.insert(GridPosition::new(0, 0, 0), opt("x"));
        let (mut grid, mut remaining) =
            Grid::initialize(&model, Resolution::new(2, 1, 1), &starters).unwrap();
        let before = grid.tile(1).clone();

        remaining.remove_at_swap(0);
        let mut queue = WorkQueue::new();
        enqueue_adjacent(0, grid.resolution(), &remaining, &mut queue);

        let result = propagate(&model, &mut grid, &mut remaining, &mut queue);
        assert_eq!(result, Err(Contradiction { index: 1 }));
        assert_eq!(grid.tile(1), &before);
    }

    #[test]
    fn entries_for_already_collapsed_tiles_are_skipped() {
        let model = segregated_model();
        let (mut grid, mut remaining) =
            Grid::initialize(&model, Resolution::new(2, 1, 1), &IndexMap::new()).unwrap();

        // Queue an entry for a cell that is no longer remaining.
        let mut queue = WorkQueue::new();
        queue.insert(
            1,
            QueueEntry {
                center_index: 0,
                direction: Direction::PosX,
            },
        );
        if let Some(slot) = remaining.slot_of(1) {
            remaining.remove_at_swap(slot);
        }
        let before = grid.tile(1).clone();

        let waves = propagate(&model, &mut grid, &mut remaining, &mut queue).unwrap();
        assert_eq!(waves, 0);
        assert_eq!(grid.tile(1), &before);
    }
}
