//! Lazy two-level enumeration: element combinations, then oxidation-state assignments.
//!
//! Both levels are plain iterators. Nothing is materialized beyond the slice a caller pulls,
//! and the whole sequence can be replayed by constructing a new [`ElementCombinations`].

use super::multiplicity::binomial;
use crate::core::chemistry::species::{Species, species_of};
use crate::core::data::{ElectronegativityScale, Element};
use itertools::Itertools;
use itertools::structs::Combinations;
use std::iter::Copied;
use std::slice;

/// Every combination of 2 to `max_size` elements, size-major, lexicographic in universe order.
pub struct ElementCombinations<'a> {
    universe: &'a [&'a Element],
    max_size: usize,
    size: usize,
    current: Combinations<Copied<slice::Iter<'a, &'a Element>>>,
}

impl<'a> ElementCombinations<'a> {
    pub fn new(universe: &'a [&'a Element], max_size: usize) -> Self {
        Self {
            universe,
            max_size,
            size: 2,
            current: universe.iter().copied().combinations(2),
        }
    }
}

impl<'a> Iterator for ElementCombinations<'a> {
    type Item = Vec<&'a Element>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.size > self.max_size || self.size > self.universe.len() {
                return None;
            }
            if let Some(combination) = self.current.next() {
                return Some(combination);
            }
            self.size += 1;
            self.current = self.universe.iter().copied().combinations(self.size);
        }
    }
}

/// Length of the sequence produced by [`ElementCombinations::new`] for the same arguments.
pub fn combination_count(universe_len: usize, max_size: usize) -> u64 {
    (2..=max_size)
        .map(|size| binomial(universe_len, size))
        .fold(0u64, u64::saturating_add)
}

/// All `n`-combinations of the species contributed by `combination`.
///
/// Species are listed element by element, each element's states ascending. An element with
/// more than one state can therefore appear several times in one assignment when `n` exceeds
/// the number of elements.
pub fn state_assignments<'a>(
    combination: &[&'a Element],
    n: usize,
    scale: ElectronegativityScale,
) -> impl Iterator<Item = Vec<Species<'a>>> + use<'a> {
    let species: Vec<Species<'a>> = combination
        .iter()
        .flat_map(|&element| species_of(element, scale))
        .collect();
    species.into_iter().combinations(n)
}
