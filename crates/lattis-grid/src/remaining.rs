//! The index set of not-yet-collapsed tiles.

use crate::tile::Tile;

/// Indices of the tiles still undetermined, arranged as a prefix of
/// tied minimum-entropy entries followed by an unordered remainder.
///
/// The arrangement is maintained with swaps rather than sorting; it is
/// an optimization invariant only. Membership is always exactly the
/// undetermined tile indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemainingTiles {
    indices: Vec<usize>,
}

impl RemainingTiles {
    /// An empty set.
    pub fn new() -> RemainingTiles {
        RemainingTiles::default()
    }

    /// An empty set with reserved capacity.
    pub fn with_capacity(capacity: usize) -> RemainingTiles {
        RemainingTiles {
            indices: Vec::with_capacity(capacity),
        }
    }

    /// Number of undetermined tiles.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no undetermined tiles remain.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a tile index at the back.
    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// The tile index stored at `slot`.
    pub fn get(&self, slot: usize) -> usize {
        self.indices[slot]
    }

    /// The tile index at the front, if any.
    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Whether `index` is still undetermined.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// The slot holding `index`, if present.
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == index)
    }

    /// Swap two slots.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.indices.swap(a, b);
    }

    /// Remove the entry at `slot` by swapping in the last entry.
    pub fn remove_at_swap(&mut self, slot: usize) -> usize {
        self.indices.swap_remove(slot)
    }

    /// Iterate over the stored tile indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Last slot of the leading tie run: scan from the front while
    /// entropy does not exceed the front entry's, stopping at the
    /// first strictly larger value.
    ///
    /// The set must be non-empty.
    pub fn last_tied_slot(&self, tiles: &[Tile]) -> usize {
        let mut min_entropy = 0.0;
        let mut last_tied = 0;
        for (slot, &index) in self.indices.iter().enumerate() {
            if slot == 0 {
                min_entropy = tiles[index].entropy;
            } else if tiles[index].entropy > min_entropy {
                break;
            } else {
                last_tied = slot;
            }
        }
        last_tied
    }

    /// Rebuild the tie-run prefix from scratch with a single swap
    /// pass, used after a removal changed what the minimum entropy is.
    pub fn rebuild_tie_run(&mut self, tiles: &[Tile]) {
        let mut min_entropy = 0.0;
        let mut swap_to = 0;
        for slot in 0..self.indices.len() {
            let entropy = tiles[self.indices[slot]].entropy;
            if slot == 0 {
                min_entropy = entropy;
            } else if entropy < min_entropy {
                swap_to = 0;
                min_entropy = entropy;
                self.indices.swap(swap_to, slot);
            } else if entropy == min_entropy {
                swap_to += 1;
                self.indices.swap(swap_to, slot);
            }
        }
    }

    /// Restore the tie-run invariant after the tile at `index` had its
    /// entropy lowered to `new_entropy` (which must not exceed the
    /// current minimum's): swap it to the front if strictly smaller
    /// than the minimum, or just past the tie run if equal.
    ///
    /// Called before the tile itself is rewritten, so the scan still
    /// sees the old entropies.
    pub fn reposition(&mut self, index: usize, new_entropy: f64, tiles: &[Tile]) {
        let Some(&front) = self.indices.first() else {
            return;
        };
        let min_entropy = tiles[front].entropy;
        if new_entropy < min_entropy {
            if let Some(slot) = self.slot_of(index) {
                if slot != 0 {
                    self.indices.swap(0, slot);
                }
            }
        } else if new_entropy == min_entropy {
            if let Some(slot) = self.slot_of(index) {
                for candidate in 1..self.indices.len() {
                    if tiles[self.indices[candidate]].entropy != min_entropy {
                        if slot != candidate {
                            self.indices.swap(candidate, slot);
                        }
                        break;
                    }
                }
            }
        }
    }
}
