//! Observation: collapsing the most constrained tile.

use crate::queue::{enqueue_adjacent, WorkQueue};
use lattis_grid::{Grid, RemainingTiles, Tile};
use lattis_model::ConstraintModel;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Collapse one tile and enqueue its neighbours for propagation.
///
/// Picks uniformly at random among the leading tied minimum-entropy
/// indices, then draws one of the tile's remaining options by
/// cumulative weight, both from a stream seeded with `seed` so the
/// same seed always observes identically. The chosen index is removed
/// from `remaining` with swap bookkeeping, re-scanning the tie run if
/// the removal changed the minimum entropy.
///
/// Returns `true` while undetermined tiles remain afterwards, `false`
/// once the grid is fully collapsed.
pub fn observe(
    model: &ConstraintModel,
    grid: &mut Grid,
    remaining: &mut RemainingTiles,
    queue: &mut WorkQueue,
    seed: u64,
) -> bool {
    if remaining.is_empty() {
        return false;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Pick among the leading tied minimum-entropy indices.
    let mut min_entropy = 0.0;
    let mut last_tied_slot = 0;
    let selected_slot;
    let selected_index;
    if remaining.len() > 1 {
        min_entropy = grid.tile(remaining.get(0)).entropy;
        last_tied_slot = remaining.last_tied_slot(grid.tiles());
        selected_slot = rng.gen_range(0..=last_tied_slot);
        selected_index = remaining.get(selected_slot);
    } else {
        selected_slot = 0;
        selected_index = remaining.get(0);
    }

    // Weighted draw by cumulative density over the stored order.
    let options = &grid.tile(selected_index).remaining_options;
    let mut cumulative = Vec::with_capacity(options.len());
    let mut total = 0.0;
    for option in options {
        total += model.weight(option);
        cumulative.push(total);
    }
    let mut chosen = 0;
    if total > 0.0 {
        let draw = rng.gen_range(0.0..total);
        for (slot, &density) in cumulative.iter().enumerate() {
            if density > draw {
                chosen = slot;
                break;
            }
        }
    }
    let chosen_option = options[chosen].clone();
    grid.set_tile(selected_index, Tile::decided(chosen_option));

    // Remove the collapsed index, keeping the tie run contiguous.
    if selected_slot != last_tied_slot {
        remaining.swap(selected_slot, last_tied_slot);
    }
    remaining.remove_at_swap(last_tied_slot);

    if remaining.is_empty() {
        return false;
    }
    if grid.tile(remaining.get(0)).entropy != min_entropy {
        remaining.rebuild_tie_run(grid.tiles());
    }
    enqueue_adjacent(selected_index, grid.resolution(), remaining, queue);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use lattis_core::{Direction, Resolution, TileOption};

    fn opt(name: &str) -> TileOption {
        TileOption::asset(name)
    }

    fn permissive_model(names: &[&str]) -> ConstraintModel {
        let mut model = ConstraintModel::new(100.0);
        for a in names {
            for b in names {
                for direction in Direction::ALL {
                    model.add_constraint(opt(a), direction, opt(b));
                }
            }
        }
        model.weights_from_contributions();
        model
    }

    #[test]
    fn observe_collapses_one_tile_to_a_remaining_option() {
        let model = permissive_model(&["a", "b"]);
        let (mut grid, mut remaining) =
            Grid::initialize(&model, Resolution::new(2, 2, 1), &IndexMap::new()).unwrap();
        let mut queue = WorkQueue::new();

        let more = observe(&model, &mut grid, &mut remaining, &mut queue, 17);
        assert!(more);
        assert_eq!(remaining.len(), 3);

        let collapsed: Vec<usize> = (0..grid.len())
            .filter(|&i| grid.tile(i).is_collapsed())
            .collect();
        assert_eq!(collapsed.len(), 1);
        let chosen = grid.tile(collapsed[0]).collapsed_option().unwrap();
        assert!(chosen == &opt("a") || chosen == &opt("b"));
        assert!(!remaining.contains(collapsed[0]));
        assert!(!queue.is_empty());
    }

    #[test]
    fn observing_the_last_tile_reports_completion() {
        let model = permissive_model(&["a"]);
        let (mut grid, mut remaining) =
            Grid::initialize(&model, Resolution::new(1, 1, 1), &IndexMap::new()).unwrap();
        let mut queue = WorkQueue::new();

        let more = observe(&model, &mut grid, &mut remaining, &mut queue, 3);
        assert!(!more);
        assert!(remaining.is_empty());
        assert_eq!(grid.tile(0).collapsed_option(), Some(&opt("a")));
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_total_weight_falls_back_to_the_first_option() {
        let mut model = permissive_model(&["a", "b"]);
        model.set_all_weights(0.0);
        let (mut grid, mut remaining) =
            Grid::initialize(&model, Resolution::new(1, 1, 1), &IndexMap::new()).unwrap();
        let mut queue = WorkQueue::new();

        observe(&model, &mut grid, &mut remaining, &mut queue, 9);
        assert_eq!(grid.tile(0).collapsed_option(), Some(&opt("a")));
    }

    #[test]
    fn identical_seeds_observe_identically() {
        let model = permissive_model(&["a", "b", "c"]);
        let mut outcomes = Vec::new();
        for _ in 0..2 {
            let (mut grid, mut remaining) =
                Grid::initialize(&model, Resolution::new(3, 3, 1), &IndexMap::new()).unwrap();
            let mut queue = WorkQueue::new();
            observe(&model, &mut grid, &mut remaining, &mut queue, 1234);
            outcomes.push(grid.tiles().to_vec());
        }
        assert_eq!(outcomes[0], outcomes[1]);
    }
}
