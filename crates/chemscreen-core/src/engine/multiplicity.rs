use crate::core::chemistry::neutrality::count_neutral_ratios;
use crate::core::chemistry::species::CombinationKey;
use crate::core::data::Element;
use itertools::Itertools;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of neutral stoichiometries for every oxidation-state key of one length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplicityTable {
    n: usize,
    counts: HashMap<CombinationKey, u64>,
}

impl MultiplicityTable {
    /// Evaluates every length-`n` multiset of `states` up front.
    #[instrument(skip_all, name = "multiplicity_table", fields(n = n, states = states.len()))]
    pub fn build(states: &[i32], n: usize, threshold: u32, distinct_ratios: bool) -> Self {
        let keys = key_space(states, n);

        #[cfg(not(feature = "parallel"))]
        let iterator = keys.into_iter();

        #[cfg(feature = "parallel")]
        let iterator = keys.into_par_iter();

        let counts: HashMap<CombinationKey, u64> = iterator
            .map(|key| {
                let count = count_neutral_ratios(key.states(), threshold, distinct_ratios);
                (key, count)
            })
            .collect();

        debug!(keys = counts.len(), "Multiplicity table built.");
        Self { n, counts }
    }

    pub fn get(&self, key: &CombinationKey) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Sorted, deduplicated union of the oxidation states of `universe`.
pub fn distinct_states(universe: &[&Element]) -> Vec<i32> {
    universe
        .iter()
        .flat_map(|element| element.oxidation_states.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// All sorted multisets of length `n` drawn from `states`.
pub fn key_space(states: &[i32], n: usize) -> Vec<CombinationKey> {
    let distinct: Vec<i32> = states.iter().copied().sorted_unstable().dedup().collect();
    if n == 0 || distinct.is_empty() {
        return Vec::new();
    }
    distinct
        .into_iter()
        .combinations_with_replacement(n)
        .map(CombinationKey::new)
        .collect()
}

/// `C(states + n - 1, n)`, the size of [`key_space`] without materializing it.
pub fn key_space_size(distinct_states: usize, n: usize) -> u64 {
    if n == 0 || distinct_states == 0 {
        return 0;
    }
    binomial(distinct_states + n - 1, n)
}

/// Exact binomial coefficient, saturating at `u64::MAX`.
pub(crate) fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    acc as u64
}
