//! Exhaustive search over the candidate permutation space.
//!
//! # Algorithm
//!
//! Every candidate runs through the same pipeline: segmentation against the
//! trip limits, then cost evaluation. Candidates that fail either stage are
//! dropped; the survivors compete in an [`Incumbent`] keyed by
//! `(cost, enumeration index)`, which makes the winner independent of
//! evaluation order and therefore of the thread or process layout.
//!
//! The threaded entry points materialize their candidate slice up front and
//! split it into one contiguous span per thread. Each span folds into a
//! thread-local incumbent; the merge into the shared incumbent is the only
//! locked step.
//!
//! # Complexity
//!
//! O(k! · k) time over k customers; the materialized slice dominates memory.

use std::ops::Range;
use std::sync::Mutex;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::model::{Constraints, Graph, Route};

use super::cost::route_cost;
use super::incumbent::{Evaluated, Incumbent};
use super::permutation::DepotPermutations;
use super::segment::segment_route;

/// Segments and costs one candidate, keeping it only if feasible.
fn evaluate(graph: &Graph, limits: &Constraints, index: u64, raw: &Route) -> Option<Evaluated> {
    let segmented = segment_route(raw, graph, limits).ok()?;
    let cost = route_cost(&segmented, graph)?;
    Some(Evaluated {
        cost,
        index,
        route: segmented,
    })
}

/// Searches a candidate stream sequentially.
///
/// Candidates are indexed by their position in the stream. Any stream of
/// depot-framed routes works here, so a bounded enumeration strategy can
/// stand in for the full permutation stream.
///
/// Returns `None` when no candidate survives segmentation and costing.
///
/// # Examples
///
/// ```
/// use rota::model::{Constraints, CostMatrix, Graph};
/// use rota::search::{search, DepotPermutations};
///
/// let costs = CostMatrix::from_edges(
///     3,
///     &[(0, 1, 1), (1, 2, 1), (2, 0, 1), (0, 2, 1), (2, 1, 1), (1, 0, 1)],
/// )
/// .expect("valid edges");
/// let graph = Graph::new(costs, vec![0, 5, 5]).expect("valid instance");
/// let limits = Constraints::new(15, 5).expect("positive limits");
///
/// let best = search(&graph, &limits, DepotPermutations::new(&graph.customer_ids()))
///     .expect("feasible");
/// assert_eq!(best.cost, 3);
/// ```
pub fn search<I>(graph: &Graph, limits: &Constraints, candidates: I) -> Option<Evaluated>
where
    I: IntoIterator<Item = Route>,
{
    let mut best = Incumbent::new();
    for (index, raw) in candidates.into_iter().enumerate() {
        if let Some(found) = evaluate(graph, limits, index as u64, &raw) {
            best.offer(found);
        }
    }
    best.into_best()
}

/// Searches the full candidate space on a thread pool.
///
/// `threads == 0` uses the rayon default pool size.
pub fn search_parallel(graph: &Graph, limits: &Constraints, threads: usize) -> Option<Evaluated> {
    let slice = materialize(graph, None);
    search_slice(graph, limits, slice, threads)
}

/// Searches a contiguous index range of the candidate space on a thread pool.
///
/// Indexes refer to the lexicographic enumeration of the full space, so
/// disjoint ranges searched by different workers never overlap and their
/// merged result matches a sequential search of the union. An empty range
/// yields `None`.
pub fn search_range(
    graph: &Graph,
    limits: &Constraints,
    candidates: Range<u64>,
    threads: usize,
) -> Option<Evaluated> {
    let slice = materialize(graph, Some(candidates));
    search_slice(graph, limits, slice, threads)
}

/// Materializes indexed candidates, optionally restricted to a range.
fn materialize(graph: &Graph, range: Option<Range<u64>>) -> Vec<(u64, Route)> {
    let indexed = DepotPermutations::new(&graph.customer_ids())
        .enumerate()
        .map(|(index, route)| (index as u64, route));
    match range {
        Some(range) => {
            let len = (range.end - range.start) as usize;
            indexed.skip(range.start as usize).take(len).collect()
        }
        None => indexed.collect(),
    }
}

fn search_slice(
    graph: &Graph,
    limits: &Constraints,
    slice: Vec<(u64, Route)>,
    threads: usize,
) -> Option<Evaluated> {
    if slice.is_empty() {
        return None;
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("cannot build a thread pool");
    let span = slice.len().div_ceil(pool.current_num_threads()).max(1);

    let best = Mutex::new(Incumbent::new());
    pool.install(|| {
        slice.par_chunks(span).for_each(|chunk| {
            let mut local = Incumbent::new();
            for (index, raw) in chunk {
                if let Some(found) = evaluate(graph, limits, *index, raw) {
                    local.offer(found);
                }
            }
            best.lock().expect("incumbent lock poisoned").merge(local);
        });
    });

    best.into_inner().expect("incumbent lock poisoned").into_best()
}
