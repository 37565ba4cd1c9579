//! Multi-process search tier.
//!
//! The candidate space is sliced into one contiguous shard per rank. Rank 0
//! coordinates and searches its own shard; the remaining ranks are spawned
//! copies of the current executable talking newline-delimited JSON over
//! their standard streams. See [`coordinator::search`] for the full
//! exchange.

pub mod coordinator;
pub mod protocol;
pub mod worker;

pub use coordinator::search;
pub use protocol::{BestSummary, Directive, DistributedError, RoutePayload, Summary};
