//! Units of work dispatched by the counting driver.
//!
//! A task receives self-contained, read-only inputs and returns a scalar, so any number of
//! them can run concurrently and their results can be summed in any order.

pub mod count;
