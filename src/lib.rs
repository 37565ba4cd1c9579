//! # rota
//!
//! Route search engine for capacitated vehicle routing with depot returns:
//! exhaustive search over depot-framed customer permutations, split across
//! threads and worker processes, plus a greedy insertion heuristic for
//! instances the exhaustive tier cannot reach.
//!
//! ## Modules
//!
//! - [`model`]: core domain types (cost matrix, demands, constraints, routes)
//! - [`io`]: the instance text format
//! - [`search`]: candidate enumeration, segmentation, evaluation, parallel search
//! - [`heuristic`]: cheapest-insertion route construction
//! - [`distributed`]: multi-process coordination

pub mod distributed;
pub mod heuristic;
pub mod io;
pub mod model;
pub mod search;
