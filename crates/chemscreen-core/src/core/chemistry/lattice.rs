//! Site-lattice composition search.
//!
//! A lattice is a list of crystallographic sites, each with a multiplicity (its ratio in
//! the formula unit) and the oxidation states it may host. A composition assigns one
//! element in one allowed state to every site such that the lattice is charge neutral.

use super::ChemistryError;
use super::neutrality::is_neutral;
use crate::core::data::Element;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub label: String,
    pub ratio: u32,
    pub oxidation_states: Vec<i32>,
}

impl Site {
    pub fn new(label: impl Into<String>, ratio: u32, oxidation_states: Vec<i32>) -> Self {
        Self {
            label: label.into(),
            ratio,
            oxidation_states,
        }
    }
}

/// Structure prototypes known by their site ratios alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prototype {
    /// ABX3
    Perovskite,
    /// AB2X4
    Spinel,
    /// AX
    Wurtzite,
}

impl Prototype {
    pub fn sites(&self) -> &'static [(&'static str, u32)] {
        match self {
            Self::Perovskite => &[("A", 1), ("B", 1), ("X", 3)],
            Self::Spinel => &[("A", 1), ("B", 2), ("X", 4)],
            Self::Wurtzite => &[("A", 1), ("X", 1)],
        }
    }
}

impl FromStr for Prototype {
    type Err = ChemistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perovskite" => Ok(Self::Perovskite),
            "spinel" => Ok(Self::Spinel),
            "wurtzite" => Ok(Self::Wurtzite),
            _ => Err(ChemistryError::UnknownPrototype(s.to_string())),
        }
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Perovskite => "perovskite",
            Self::Spinel => "spinel",
            Self::Wurtzite => "wurtzite",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lattice {
    sites: Vec<Site>,
}

impl Lattice {
    pub fn new(sites: Vec<Site>) -> Self {
        Self { sites }
    }

    /// Builds a lattice from a prototype's site ratios and one oxidation-state set per site.
    pub fn from_prototype(
        prototype: Prototype,
        site_states: Vec<Vec<i32>>,
    ) -> Result<Self, ChemistryError> {
        let layout = prototype.sites();
        if layout.len() != site_states.len() {
            return Err(ChemistryError::SiteCountMismatch {
                prototype: prototype.to_string(),
                expected: layout.len(),
                found: site_states.len(),
            });
        }
        let sites = layout
            .iter()
            .zip(site_states)
            .map(|(&(label, ratio), states)| Site::new(label, ratio, states))
            .collect();
        Ok(Self { sites })
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteOccupant<'a> {
    pub symbol: &'a str,
    pub oxidation_state: i32,
}

impl fmt::Display for SiteOccupant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}", self.symbol, self.oxidation_state)
    }
}

/// Every (element, state) pair in `universe` whose state is one of `oxidation_states`.
pub fn possible_elements<'a>(
    universe: &[&'a Element],
    oxidation_states: &[i32],
) -> Vec<SiteOccupant<'a>> {
    universe
        .iter()
        .flat_map(|element| {
            element
                .oxidation_states
                .iter()
                .filter(|state| oxidation_states.contains(state))
                .map(move |&oxidation_state| SiteOccupant {
                    symbol: element.symbol.as_str(),
                    oxidation_state,
                })
        })
        .collect()
}

/// All charge-neutral site assignments, one occupant per site in site order.
///
/// Finding nothing is a normal outcome and yields an empty list.
pub fn possible_compositions<'a>(
    lattice: &Lattice,
    universe: &[&'a Element],
) -> Vec<Vec<SiteOccupant<'a>>> {
    if lattice.sites.is_empty() {
        return Vec::new();
    }

    let ratios: Vec<u32> = lattice.sites.iter().map(|site| site.ratio).collect();
    let candidates: Vec<Vec<SiteOccupant<'a>>> = lattice
        .sites
        .iter()
        .map(|site| possible_elements(universe, &site.oxidation_states))
        .collect();

    candidates
        .into_iter()
        .multi_cartesian_product()
        .filter(|occupants| {
            let states: Vec<i32> = occupants.iter().map(|o| o.oxidation_state).collect();
            is_neutral(&states, &ratios)
        })
        .collect()
}
