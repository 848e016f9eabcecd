//! # Engine Module
//!
//! The counting engine: it turns a validated [`config::ScreeningConfig`] and a loaded element
//! universe into per-round totals of charge-neutral, electronegativity-ordered stoichiometries.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Screening parameters and their builder
//! - **Multiplicity** ([`multiplicity`]) - Per-round lookup table of neutral stoichiometry counts
//! - **Enumeration** ([`enumerator`]) - Lazy element combinations and oxidation-state assignments
//! - **Counting** ([`counter`]) - Batched, optionally parallel driver for one round
//! - **State Tracking** ([`state`]) - Progress counters and round summaries
//! - **Progress Monitoring** ([`progress`]) - Events forwarded to an optional callback
//! - **Error Handling** ([`error`]) - Engine errors tagged with round and stage
//!
//! Every shared input (element universe, multiplicity table, filter options) is fully built
//! before a round starts counting and is only ever borrowed immutably by workers.

pub mod config;
pub mod context;
pub mod counter;
pub mod enumerator;
pub mod error;
pub mod multiplicity;
pub mod progress;
pub mod state;
pub(crate) mod tasks;
