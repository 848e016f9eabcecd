use crate::core::data::{ElectronegativityScale, Element};
use std::fmt;

/// One element in one of its oxidation states, with the electronegativity used for ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Species<'a> {
    pub symbol: &'a str,
    pub oxidation_state: i32,
    pub electronegativity: f64,
}

impl<'a> Species<'a> {
    pub fn new(symbol: &'a str, oxidation_state: i32, electronegativity: f64) -> Self {
        Self {
            symbol,
            oxidation_state,
            electronegativity,
        }
    }

    pub fn is_cation(&self) -> bool {
        self.oxidation_state > 0
    }

    pub fn is_anion(&self) -> bool {
        self.oxidation_state < 0
    }
}

impl fmt::Display for Species<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}", self.symbol, self.oxidation_state)
    }
}

/// All species of `element` in ascending oxidation-state order.
///
/// Yields nothing when the element has no value on the requested scale. Under Pauling
/// this removes Rn and Lr from a full-table screen entirely, so their cation states add no
/// stoichiometries; switch to Mulliken to screen them.
pub fn species_of(
    element: &Element,
    scale: ElectronegativityScale,
) -> impl Iterator<Item = Species<'_>> {
    let eneg = element.electronegativity(scale);
    element
        .oxidation_states
        .iter()
        .filter_map(move |&state| eneg.map(|e| Species::new(&element.symbol, state, e)))
}

/// Sorted multiset of oxidation states, independent of which elements hold them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombinationKey(Vec<i32>);

impl CombinationKey {
    pub fn new(states: impl IntoIterator<Item = i32>) -> Self {
        let mut states: Vec<i32> = states.into_iter().collect();
        states.sort_unstable();
        Self(states)
    }

    pub fn from_species(species: &[Species<'_>]) -> Self {
        Self::new(species.iter().map(|s| s.oxidation_state))
    }

    pub fn states(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, state) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", state)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{ElementProvider, ElementTable};

    #[test]
    fn combination_key_is_independent_of_input_order() {
        let a = CombinationKey::new([1, -2, 1]);
        let b = CombinationKey::new([-2, 1, 1]);
        assert_eq!(a, b);
        assert_eq!(a.states(), &[-2, 1, 1]);
    }

    #[test]
    fn combination_key_from_species_ignores_which_element_holds_the_state() {
        let with_h = [Species::new("H", 1, 2.2), Species::new("O", -2, 3.44)];
        let with_na = [Species::new("S", -2, 2.58), Species::new("Na", 1, 0.93)];
        assert_eq!(
            CombinationKey::from_species(&with_h),
            CombinationKey::from_species(&with_na)
        );
    }

    #[test]
    fn combination_key_displays_as_tuple() {
        assert_eq!(CombinationKey::new([1, -2]).to_string(), "(-2, 1)");
        assert_eq!(CombinationKey::new([]).to_string(), "()");
    }

    #[test]
    fn species_display_includes_signed_state() {
        assert_eq!(Species::new("Fe", 3, 1.83).to_string(), "Fe+3");
        assert_eq!(Species::new("O", -2, 3.44).to_string(), "O-2");
    }

    #[test]
    fn species_of_expands_every_oxidation_state() {
        let table = ElementTable::embedded().unwrap();
        let h = table.element("H").unwrap();
        let species: Vec<_> = species_of(h, ElectronegativityScale::Pauling).collect();
        assert_eq!(species.len(), 2);
        assert_eq!(species[0].oxidation_state, -1);
        assert_eq!(species[1].oxidation_state, 1);
        assert!(species.iter().all(|s| s.electronegativity == 2.20));
    }

    #[test]
    fn species_of_skips_elements_missing_the_scale() {
        let table = ElementTable::embedded().unwrap();
        let rn = table.element("Rn").unwrap();
        assert_eq!(species_of(rn, ElectronegativityScale::Pauling).count(), 0);
        assert_eq!(species_of(rn, ElectronegativityScale::Mulliken).count(), 2);
    }
}
