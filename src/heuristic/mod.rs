//! Polynomial-time route construction.
//!
//! The exhaustive search is factorial in the customer count; this module
//! trades optimality for a single constructed route over the same instance
//! data and cost semantics.

mod insertion;

pub use insertion::{cheapest_insertion, InsertionResult};
