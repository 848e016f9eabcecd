//! Element reference data.
//!
//! The embedded dataset is parsed once per process and shared read-only by every consumer;
//! alternative datasets with the same CSV schema can be loaded from disk.

pub mod elements;
pub mod symbols;

pub use elements::{
    DataLookupError, ElectronegativityScale, Element, ElementProvider, ElementTable,
    UnknownScaleError,
};
