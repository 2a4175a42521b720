//! The propagation work queue.

use indexmap::IndexMap;
use lattis_core::{Direction, Resolution};
use lattis_grid::RemainingTiles;

/// A pending re-check of one neighbour cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueEntry {
    /// The cell whose option set changed.
    pub center_index: usize,
    /// Direction from the centre to the neighbour being re-checked.
    pub direction: Direction,
}

/// Work queue keyed by the neighbour index to re-check.
///
/// Keying by neighbour deduplicates work within a wave: a later
/// enqueue for the same neighbour overwrites the earlier entry, and
/// iteration follows insertion order.
pub type WorkQueue = IndexMap<usize, QueueEntry>;

/// Enqueue every still-undetermined axis neighbour of `center_index`,
/// tagged with the direction from the centre to it.
pub fn enqueue_adjacent(
    center_index: usize,
    resolution: Resolution,
    remaining: &RemainingTiles,
    queue: &mut WorkQueue,
) {
    for (neighbour, direction) in resolution.neighbours(center_index) {
        if remaining.contains(neighbour) {
            queue.insert(
                neighbour,
                QueueEntry {
                    center_index,
                    direction,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattis_core::GridPosition;

    #[test]
    fn only_undetermined_neighbours_are_enqueued() {
        let resolution = Resolution::new(3, 1, 1);
        let mut remaining = RemainingTiles::new();
        remaining.push(0);
        remaining.push(1);
        // Index 2 is already collapsed.
        let mut queue = WorkQueue::new();
        enqueue_adjacent(1, resolution, &remaining, &mut queue);

        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.get(&0),
            Some(&QueueEntry {
                center_index: 1,
                direction: Direction::NegX,
            })
        );
    }

    #[test]
    fn later_enqueues_overwrite_earlier_entries() {
        let resolution = Resolution::new(3, 1, 1);
        let mut remaining = RemainingTiles::new();
        for index in 0..3 {
            remaining.push(index);
        }
        let mut queue = WorkQueue::new();
        enqueue_adjacent(0, resolution, &remaining, &mut queue);
        enqueue_adjacent(2, resolution, &remaining, &mut queue);

        // Cell 1 was reachable from both centres; the later one wins,
        // and the two enqueues collapse into a single entry.
        assert_eq!(queue.get(&1).map(|e| e.center_index), Some(2));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn interior_cell_enqueues_all_six_neighbours() {
        let resolution = Resolution::new(3, 3, 3);
        let center = resolution
            .index_of(GridPosition::new(1, 1, 1))
            .expect("in bounds");
        let mut remaining = RemainingTiles::new();
        for index in 0..resolution.cell_count() {
            remaining.push(index);
        }
        let mut queue = WorkQueue::new();
        enqueue_adjacent(center, resolution, &remaining, &mut queue);
        assert_eq!(queue.len(), 6);
    }
}
