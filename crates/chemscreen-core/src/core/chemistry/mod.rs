//! Pure chemistry predicates and formulas.
//!
//! Nothing in this module holds state. Every function is deterministic for identical inputs
//! and safe to call from any number of worker threads.

pub mod lattice;
pub mod neutrality;
pub mod pauling;
pub mod properties;
pub mod species;

use crate::core::data::DataLookupError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChemistryError {
    #[error(transparent)]
    DataLookup(#[from] DataLookupError),

    #[error("Element '{symbol}' has no {scale} electronegativity")]
    MissingElectronegativity { symbol: String, scale: String },

    #[error("Mismatched input lengths: {elements} elements but {stoichs} stoichiometries")]
    LengthMismatch { elements: usize, stoichs: usize },

    #[error("Stoichiometries must be positive and sum to a non-zero value")]
    InvalidStoichiometry,

    #[error("Unknown lattice prototype '{0}'. Expected 'perovskite', 'spinel' or 'wurtzite'.")]
    UnknownPrototype(String),

    #[error("Prototype '{prototype}' has {expected} sites but {found} oxidation-state sets were given")]
    SiteCountMismatch {
        prototype: String,
        expected: usize,
        found: usize,
    },
}
