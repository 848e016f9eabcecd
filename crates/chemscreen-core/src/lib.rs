//! # chemscreen Core Library
//!
//! A high-performance library for screening combinations of chemical elements for
//! charge-neutral, electronegativity-plausible compounds.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that each concern can be tested
//! and reasoned about in isolation.
//!
//! - **[`core`]: The Foundation.** Immutable element reference data (`ElementTable`) and the
//!   pure chemistry predicates and formulas built on it: the charge-neutral stoichiometry
//!   search, the Pauling electronegativity test, compound electronegativity and the
//!   site-lattice composition search.
//!
//! - **[`engine`]: The Logic Core.** The stateful screening machinery. It holds the
//!   configuration model, the lazily evaluated combination enumerator, the per-round
//!   multiplicity table and the batched, optionally parallel counting driver with progress
//!   and ETA reporting.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that tie `engine` and `core`
//!   together, such as screening every combination size from 2 up to `max_n`.

pub mod core;
pub mod engine;
pub mod workflows;
