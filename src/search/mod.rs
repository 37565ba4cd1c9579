//! Exhaustive route search: candidate enumeration, segmentation, costing,
//! and reduction to a single best route.
//!
//! The pipeline is enumerate → segment → cost → reduce. Each stage is usable
//! on its own; [`search`], [`search_parallel`], and [`search_range`] drive
//! the whole pipeline for a candidate stream, the full space, or one
//! contiguous shard of it.

mod cost;
mod exhaustive;
mod incumbent;
mod permutation;
mod segment;

pub use cost::route_cost;
pub use exhaustive::{search, search_parallel, search_range};
pub use incumbent::{Evaluated, Incumbent};
pub use permutation::{candidate_count, DepotPermutations};
pub use segment::{segment_route, SegmentError};
