//! Domain model for depot-rooted capacitated routing.
//!
//! Provides the core data: a directed cost matrix with explicit missing
//! edges, a problem instance pairing costs with per-node demands, per-trip
//! capacity and stop limits, and depot-framed routes made of trip segments.

mod constraints;
mod graph;
mod matrix;
mod route;

pub use constraints::Constraints;
pub use graph::Graph;
pub use matrix::CostMatrix;
pub use route::{Route, DEPOT};

/// Node identifier; node [`DEPOT`] is the depot, all others are customers.
pub type NodeId = usize;
