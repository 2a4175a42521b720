//! The adjacency constraint model.

use indexmap::{IndexMap, IndexSet};
use lattis_core::{Direction, ObjectId, TileOption};
use std::sync::LazyLock;

/// Entropy sentinel reported for empty or all-zero-weight option sets.
pub(crate) const ENTROPY_UNDEFINED: f64 = -1.0;

static NO_OPTIONS: LazyLock<IndexSet<TileOption>> = LazyLock::new(IndexSet::new);

/// Per-key-option constraint data: the allowed neighbour set for each
/// direction, plus the option's raw contribution count and the weight
/// recomputed from it.
#[derive(Clone, Debug, Default, PartialEq)]
struct AdjacencyRules {
    /// Number of distinct (direction, neighbour) pairs recorded for
    /// this key. Backs the learned weight.
    contribution: u32,
    /// Normalized selection weight in `[0, 1]`, recomputed by
    /// [`ConstraintModel::weights_from_contributions`]. Per key
    /// option, not per direction.
    weight: f64,
    allowed: IndexMap<Direction, IndexSet<TileOption>>,
}

/// A model of adjacency constraints sufficient to solve an arbitrary
/// grid size.
///
/// Maps each key option to the options allowed next to it per
/// direction, with a learned weight per key. The model is mutated only
/// while being built or derived; during a solve it is read through a
/// shared reference and never changes.
///
/// Constraint tables preserve insertion order, and the solver's
/// cumulative-weight draw iterates that order, so two identically
/// built models behave identically.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstraintModel {
    tile_size: f64,
    constraints: IndexMap<TileOption, AdjacencyRules>,
    spawn_exclusion: IndexSet<ObjectId>,
}

impl ConstraintModel {
    /// An empty model with the given spatial quantization unit.
    ///
    /// `tile_size` is only used for boundary-facing spatial mapping,
    /// never by the solver's combinatorics.
    pub fn new(tile_size: f64) -> ConstraintModel {
        ConstraintModel {
            tile_size,
            ..ConstraintModel::default()
        }
    }

    /// The spatial quantization unit.
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Set the spatial quantization unit.
    pub fn set_tile_size(&mut self, tile_size: f64) {
        self.tile_size = tile_size;
    }

    /// Record that `neighbour` may sit in `direction` of `key`.
    ///
    /// Idempotent: re-adding an existing pair is a no-op. Each newly
    /// inserted (direction, neighbour) pair increments the key's
    /// contribution; a brand-new key starts at contribution 1 covering
    /// its first pair, so contribution always equals the number of
    /// distinct pairs recorded for the key.
    pub fn add_constraint(&mut self, key: TileOption, direction: Direction, neighbour: TileOption) {
        match self.constraints.get_mut(&key) {
            Some(rules) => {
                let options = rules.allowed.entry(direction).or_default();
                if options.insert(neighbour) {
                    rules.contribution += 1;
                }
            }
            None => {
                let mut rules = AdjacencyRules {
                    contribution: 1,
                    ..AdjacencyRules::default()
                };
                let mut options = IndexSet::new();
                options.insert(neighbour);
                rules.allowed.insert(direction, options);
                self.constraints.insert(key, rules);
            }
        }
    }

    /// The options allowed in `direction` of `key`.
    ///
    /// Returns an empty set if the key or direction is absent; never
    /// an error.
    pub fn options(&self, key: &TileOption, direction: Direction) -> &IndexSet<TileOption> {
        self.constraints
            .get(key)
            .and_then(|rules| rules.allowed.get(&direction))
            .unwrap_or(&NO_OPTIONS)
    }

    /// Iterate over the model's key options in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &TileOption> {
        self.constraints.keys()
    }

    /// Iterate over every (key, direction, neighbour) triple in
    /// insertion order.
    pub fn iter_constraints(
        &self,
    ) -> impl Iterator<Item = (&TileOption, Direction, &TileOption)> {
        self.constraints.iter().flat_map(|(key, rules)| {
            rules.allowed.iter().flat_map(move |(&direction, options)| {
                options.iter().map(move |neighbour| (key, direction, neighbour))
            })
        })
    }

    /// Number of key options.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether the model has no key options.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Total number of allowed (key, direction, neighbour) pairs.
    pub fn constraint_count(&self) -> usize {
        self.constraints
            .values()
            .flat_map(|rules| rules.allowed.values())
            .map(IndexSet::len)
            .sum()
    }

    /// The learned weight of `option`, or 0 for unknown keys.
    pub fn weight(&self, option: &TileOption) -> f64 {
        self.constraints
            .get(option)
            .map_or(0.0, |rules| rules.weight)
    }

    /// The raw contribution count of `option`, or 0 for unknown keys.
    pub fn contribution(&self, option: &TileOption) -> u32 {
        self.constraints
            .get(option)
            .map_or(0, |rules| rules.contribution)
    }

    /// Recompute every key's weight as its contribution divided by the
    /// sum of all contributions.
    ///
    /// No-op on an empty model; callers that require a usable model
    /// must treat emptiness as an error upstream. When the sum is zero
    /// every weight becomes zero.
    pub fn weights_from_contributions(&mut self) {
        if self.constraints.is_empty() {
            return;
        }
        let sum: u64 = self
            .constraints
            .values()
            .map(|rules| u64::from(rules.contribution))
            .sum();
        for rules in self.constraints.values_mut() {
            rules.weight = if sum > 0 {
                f64::from(rules.contribution) / sum as f64
            } else {
                0.0
            };
        }
    }

    /// Override every key's weight. Normally followed by a solve only
    /// after weights are made consistent again.
    pub fn set_all_weights(&mut self, weight: f64) {
        for rules in self.constraints.values_mut() {
            rules.weight = weight;
        }
    }

    /// Override every key's contribution.
    pub fn set_all_contributions(&mut self, contribution: u32) {
        for rules in self.constraints.values_mut() {
            rules.contribution = contribution;
        }
    }

    /// Override one key's contribution. Unknown keys are ignored.
    pub fn set_contribution(&mut self, key: &TileOption, contribution: u32) {
        if let Some(rules) = self.constraints.get_mut(key) {
            rules.contribution = contribution;
        }
    }

    /// Rewrite every key and neighbour option whose identity equals
    /// `old` to use `new`, preserving rotation and scale.
    ///
    /// Used for asset substitution; topology and weights are
    /// unchanged. If two keys collide after the rewrite their allowed
    /// sets are unioned and the first key's weight data kept.
    pub fn swap_identity(&mut self, old: &ObjectId, new: &ObjectId) {
        let remap = |option: &TileOption| -> TileOption {
            if &option.object == old {
                TileOption::new(new.clone(), option.yaw, option.scale)
            } else {
                option.clone()
            }
        };

        let mut rebuilt: IndexMap<TileOption, AdjacencyRules> =
            IndexMap::with_capacity(self.constraints.len());
        for (key, rules) in std::mem::take(&mut self.constraints) {
            let mut remapped = AdjacencyRules {
                contribution: rules.contribution,
                weight: rules.weight,
                allowed: IndexMap::with_capacity(rules.allowed.len()),
            };
            for (direction, options) in rules.allowed {
                remapped
                    .allowed
                    .insert(direction, options.iter().map(&remap).collect());
            }
            match rebuilt.entry(remap(&key)) {
                indexmap::map::Entry::Occupied(mut existing) => {
                    for (direction, options) in remapped.allowed {
                        existing
                            .get_mut()
                            .allowed
                            .entry(direction)
                            .or_default()
                            .extend(options);
                    }
                }
                indexmap::map::Entry::Vacant(slot) => {
                    slot.insert(remapped);
                }
            }
        }
        self.constraints = rebuilt;

        if self.spawn_exclusion.shift_remove(old) {
            self.spawn_exclusion.insert(new.clone());
        }
    }

    /// Identities that must never be physically instantiated even when
    /// chosen by the solver.
    pub fn spawn_exclusion(&self) -> &IndexSet<ObjectId> {
        &self.spawn_exclusion
    }

    /// Add an identity to the spawn-exclusion set (deduplicated).
    pub fn exclude_from_spawn(&mut self, id: ObjectId) {
        self.spawn_exclusion.insert(id);
    }

    /// Whether a chosen option would produce a physical placement.
    ///
    /// `Empty` and `Void` spawn nothing, as does any excluded identity.
    pub fn is_spawnable(&self, option: &TileOption) -> bool {
        !matches!(option.object, ObjectId::Empty | ObjectId::Void)
            && !self.spawn_exclusion.contains(&option.object)
    }

    /// Weighted Shannon entropy of a set of options under this model's
    /// weights: `H = ln(ΣW) − (Σ W·ln W) / ΣW`.
    ///
    /// Options unknown to the model contribute nothing; zero-weight
    /// options are skipped (the `w·ln w` limit at zero). Returns the
    /// `-1.0` sentinel, never NaN, when the set is empty or the total
    /// weight is zero.
    pub fn shannon_entropy<'a, I>(&self, options: I) -> f64
    where
        I: IntoIterator<Item = &'a TileOption>,
    {
        let mut sum_weights = 0.0f64;
        let mut sum_weight_log_weight = 0.0f64;
        for option in options {
            let weight = self.weight(option);
            if weight > 0.0 {
                sum_weights += weight;
                sum_weight_log_weight += weight * weight.ln();
            }
        }
        if sum_weights == 0.0 {
            return ENTROPY_UNDEFINED;
        }
        sum_weights.ln() - sum_weight_log_weight / sum_weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn opt(name: &str) -> TileOption {
        TileOption::asset(name)
    }

    #[test]
    fn add_constraint_is_idempotent() {
        let mut model = ConstraintModel::new(100.0);
        model.add_constraint(opt("a"), Direction::PosX, opt("b"));
        model.add_constraint(opt("a"), Direction::PosX, opt("b"));
        assert_eq!(model.constraint_count(), 1);
        assert_eq!(model.contribution(&opt("a")), 1);
    }

    #[test]
    fn contribution_counts_distinct_pairs() {
        let mut model = ConstraintModel::new(100.0);
        model.add_constraint(opt("a"), Direction::PosX, opt("b"));
        model.add_constraint(opt("a"), Direction::PosX, opt("c"));
        model.add_constraint(opt("a"), Direction::NegY, opt("b"));
        assert_eq!(model.contribution(&opt("a")), 3);
    }

    #[test]
    fn options_for_missing_key_is_empty() {
        let model = ConstraintModel::new(100.0);
        assert!(model.options(&opt("a"), Direction::PosZ).is_empty());
    }

    #[test]
    fn options_for_missing_direction_is_empty() {
        let mut model = ConstraintModel::new(100.0);
        model.add_constraint(opt("a"), Direction::PosX, opt("b"));
        assert!(model.options(&opt("a"), Direction::NegX).is_empty());
    }

    #[test]
    fn weights_from_contributions_normalizes() {
        let mut model = ConstraintModel::new(100.0);
        model.add_constraint(opt("a"), Direction::PosX, opt("b"));
        model.add_constraint(opt("a"), Direction::NegX, opt("b"));
        model.add_constraint(opt("b"), Direction::PosX, opt("a"));
        model.weights_from_contributions();
        assert!((model.weight(&opt("a")) - 2.0 / 3.0).abs() < 1e-12);
        assert!((model.weight(&opt("b")) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn weights_from_contributions_on_empty_model_is_noop() {
        let mut model = ConstraintModel::new(100.0);
        model.weights_from_contributions();
        assert!(model.is_empty());
    }

    #[test]
    fn all_zero_contributions_give_zero_weights() {
        let mut model = ConstraintModel::new(100.0);
        model.add_constraint(opt("a"), Direction::PosX, opt("a"));
        model.set_all_contributions(0);
        model.weights_from_contributions();
        assert_eq!(model.weight(&opt("a")), 0.0);
    }

    #[test]
    fn entropy_of_single_full_weight_option_is_zero() {
        let mut model = ConstraintModel::new(100.0);
        model.add_constraint(opt("a"), Direction::PosX, opt("a"));
        model.weights_from_contributions();
        assert_eq!(model.weight(&opt("a")), 1.0);
        assert_eq!(model.shannon_entropy([&opt("a")]), 0.0);
    }

    #[test]
    fn entropy_of_empty_set_is_sentinel() {
        let model = ConstraintModel::new(100.0);
        assert_eq!(model.shannon_entropy([]), ENTROPY_UNDEFINED);
    }

    #[test]
    fn entropy_of_zero_weight_set_is_sentinel_not_nan() {
        let mut model = ConstraintModel::new(100.0);
        model.add_constraint(opt("a"), Direction::PosX, opt("a"));
        model.set_all_weights(0.0);
        let entropy = model.shannon_entropy([&opt("a")]);
        assert_eq!(entropy, ENTROPY_UNDEFINED);
        assert!(!entropy.is_nan());
    }

    #[test]
    fn entropy_is_higher_for_more_uniform_sets() {
        let mut model = ConstraintModel::new(100.0);
        model.add_constraint(opt("a"), Direction::PosX, opt("b"));
        model.add_constraint(opt("b"), Direction::NegX, opt("a"));
        model.weights_from_contributions();
        let pair = model.shannon_entropy([&opt("a"), &opt("b")]);
        let single = model.shannon_entropy([&opt("a")]);
        assert!(pair > single);
    }

    #[test]
    fn swap_identity_rewrites_keys_and_neighbours() {
        let mut model = ConstraintModel::new(100.0);
        model.add_constraint(opt("old"), Direction::PosX, opt("old"));
        model.add_constraint(opt("other"), Direction::NegX, opt("old"));
        model.weights_from_contributions();
        let before = model.constraint_count();

        let old = ObjectId::asset("old");
        let new = ObjectId::asset("new");
        model.swap_identity(&old, &new);

        assert_eq!(model.constraint_count(), before);
        assert_eq!(model.contribution(&opt("new")), 1);
        assert_eq!(model.contribution(&opt("old")), 0);
        assert!(model.options(&opt("other"), Direction::NegX).contains(&opt("new")));
        assert!(model.options(&opt("new"), Direction::PosX).contains(&opt("new")));
    }

    #[test]
    fn spawnability_excludes_sentinels_and_exclusions() {
        let mut model = ConstraintModel::new(100.0);
        model.exclude_from_spawn(ObjectId::asset("scaffold"));
        assert!(!model.is_spawnable(&TileOption::empty()));
        assert!(!model.is_spawnable(&TileOption::void()));
        assert!(!model.is_spawnable(&opt("scaffold")));
        assert!(model.is_spawnable(&TileOption::border()));
        assert!(model.is_spawnable(&opt("rock")));
    }

    proptest! {
        #[test]
        fn weights_sum_to_one_when_contributions_positive(
            contributions in proptest::collection::vec(0u32..50, 1..20),
        ) {
            prop_assume!(contributions.iter().any(|&c| c > 0));
            let mut model = ConstraintModel::new(100.0);
            for (i, &c) in contributions.iter().enumerate() {
                let key = TileOption::asset(format!("opt-{i}"));
                model.add_constraint(key.clone(), Direction::PosX, key.clone());
                model.set_contribution(&key, c);
            }
            model.weights_from_contributions();
            let total: f64 = model
                .keys()
                .map(|k| model.weight(k))
                .sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
    }
}
