//! # Workflows Module
//!
//! Top-level entry points that own a complete screening run: loading element data, validating
//! configuration, summarizing the oxidation-state space and driving one counting round per
//! combination size.
//!
//! - **Screening Workflow** ([`screen`]) - Counts charge-neutral stoichiometries for every
//!   combination size from 2 up to `max_n`.

pub mod screen;
