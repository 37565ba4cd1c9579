//! Segmentation of a raw candidate route into feasible depot-bounded trips.
//!
//! # Algorithm
//!
//! Scans the candidate left to right, copying nodes into a fresh output
//! sequence while tracking the running load and stop count of the trip under
//! construction. A depot visit is spliced in before the current node when the
//! edge from its predecessor is missing (the trip must restart from the
//! depot) or when accepting the node would overflow the capacity or stop
//! limit. The input sequence is never mutated.
//!
//! Splices triggered by a limit overflow do not validate the new depot
//! departure edge; cost evaluation is the final feasibility guard for every
//! consecutive pair.
//!
//! # Complexity
//!
//! O(n) time and memory per candidate of n nodes.

use thiserror::Error;

use crate::model::{Constraints, Graph, NodeId, Route, DEPOT};

/// Structural failure while segmenting a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// A node has no incoming edge from the depot, so no trip can start
    /// with it. The candidate admits no segmentation.
    #[error("node {node} has no edge from the depot")]
    Unreachable { node: NodeId },
}

/// Rewrites a depot-framed candidate into one with feasible trip segments.
///
/// Returns a new route with depot visits inserted wherever an edge was
/// missing or a limit would have been exceeded. Interior depot visits already
/// present in the input reset the running counters, so a route whose
/// segments are all feasible passes through unchanged.
///
/// A node whose own demand exceeds the capacity is still admitted alone in
/// its own trip: the overflow check only fires while the trip holds more
/// than that one node.
///
/// # Errors
///
/// [`SegmentError::Unreachable`] if a node with a missing predecessor edge
/// also has no edge from the depot.
///
/// # Examples
///
/// ```
/// use rota::model::{Constraints, CostMatrix, Graph, Route};
/// use rota::search::segment_route;
///
/// // Edge (1, 2) is missing, so the trip restarts from the depot.
/// let costs = CostMatrix::from_edges(
///     3,
///     &[(0, 1, 1), (1, 0, 1), (0, 2, 1), (2, 0, 1), (2, 1, 1)],
/// )
/// .expect("valid edges");
/// let graph = Graph::new(costs, vec![0, 5, 5]).expect("valid instance");
/// let limits = Constraints::new(15, 5).expect("positive limits");
///
/// let raw = Route::new(vec![0, 1, 2, 0]).expect("depot framed");
/// let segmented = segment_route(&raw, &graph, &limits).expect("reachable");
/// assert_eq!(segmented.nodes(), &[0, 1, 0, 2, 0]);
/// ```
pub fn segment_route(
    route: &Route,
    graph: &Graph,
    limits: &Constraints,
) -> Result<Route, SegmentError> {
    let input = route.nodes();
    let mut out: Vec<NodeId> = Vec::with_capacity(input.len());
    out.push(DEPOT);

    let mut load: u64 = 0;
    let mut stops: usize = 0;

    for &to in &input[1..] {
        if to == DEPOT {
            out.push(DEPOT);
            load = 0;
            stops = 0;
            continue;
        }

        let mut from = *out.last().expect("output starts at the depot");
        if graph.cost(from, to).is_none() {
            if from == DEPOT {
                return Err(SegmentError::Unreachable { node: to });
            }
            out.push(DEPOT);
            load = 0;
            stops = 0;
            from = DEPOT;
            if graph.cost(from, to).is_none() {
                return Err(SegmentError::Unreachable { node: to });
            }
        }

        load += graph.demand(to);
        stops += 1;
        if (load > limits.capacity() || stops > limits.max_stops()) && from != DEPOT {
            out.push(DEPOT);
            load = graph.demand(to);
            stops = 1;
        }
        out.push(to);
    }

    Ok(Route::from_frame(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CostMatrix;
    use proptest::prelude::*;

    /// Fully connected graph with uniform edge cost 1.
    fn uniform_graph(demands: Vec<u64>) -> Graph {
        let n = demands.len();
        let mut costs = CostMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    costs.set(i, j, 1);
                }
            }
        }
        Graph::new(costs, demands).expect("valid instance")
    }

    fn limits(capacity: u64, max_stops: usize) -> Constraints {
        Constraints::new(capacity, max_stops).expect("positive limits")
    }

    fn route(nodes: &[NodeId]) -> Route {
        Route::new(nodes.to_vec()).expect("depot framed")
    }

    #[test]
    fn test_fitting_candidate_is_unchanged() {
        let g = uniform_graph(vec![0, 5, 5, 5]);
        let out = segment_route(&route(&[0, 1, 2, 3, 0]), &g, &limits(15, 5)).expect("reachable");
        assert_eq!(out.nodes(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_missing_edge_inserts_depot() {
        // Fully connected except the direct 1 -> 2 edge.
        let mut costs = CostMatrix::new(3);
        for i in 0..3 {
            for j in 0..3 {
                if i != j && !(i == 1 && j == 2) {
                    costs.set(i, j, 1);
                }
            }
        }
        let g = Graph::new(costs, vec![0, 5, 5]).expect("valid instance");
        let out = segment_route(&route(&[0, 1, 2, 0]), &g, &limits(15, 5)).expect("reachable");
        assert_eq!(out.nodes(), &[0, 1, 0, 2, 0]);
    }

    #[test]
    fn test_capacity_overflow_splits_trip() {
        // 10 + 10 = 20 > 15, so node 2 starts a fresh trip.
        let g = uniform_graph(vec![0, 10, 10]);
        let out = segment_route(&route(&[0, 1, 2, 0]), &g, &limits(15, 5)).expect("reachable");
        assert_eq!(out.nodes(), &[0, 1, 0, 2, 0]);
    }

    #[test]
    fn test_stop_limit_splits_trip() {
        let g = uniform_graph(vec![0, 1, 1, 1]);
        let out = segment_route(&route(&[0, 1, 2, 3, 0]), &g, &limits(100, 2)).expect("reachable");
        assert_eq!(out.nodes(), &[0, 1, 2, 0, 3, 0]);
    }

    #[test]
    fn test_counters_restart_after_split() {
        // Split after node 2; node 3 then fits in the second trip: 10 + 4 = 14 <= 15.
        let g = uniform_graph(vec![0, 10, 10, 4]);
        let out = segment_route(&route(&[0, 1, 2, 3, 0]), &g, &limits(15, 5)).expect("reachable");
        assert_eq!(out.nodes(), &[0, 1, 0, 2, 3, 0]);
    }

    #[test]
    fn test_over_capacity_node_admitted_alone() {
        // Demand 20 > capacity 15, but a lone node is never rejected.
        let g = uniform_graph(vec![0, 20]);
        let out = segment_route(&route(&[0, 1, 0]), &g, &limits(15, 5)).expect("reachable");
        assert_eq!(out.nodes(), &[0, 1, 0]);
    }

    #[test]
    fn test_unreachable_after_split_attempt() {
        // Node 2 has neither the 1 -> 2 edge nor a depot departure edge.
        let costs = CostMatrix::from_edges(3, &[(0, 1, 1), (1, 0, 1), (2, 0, 1)])
            .expect("valid edges");
        let g = Graph::new(costs, vec![0, 5, 5]).expect("valid instance");
        let err = segment_route(&route(&[0, 1, 2, 0]), &g, &limits(15, 5))
            .expect_err("node 2 is unreachable");
        assert_eq!(err, SegmentError::Unreachable { node: 2 });
    }

    #[test]
    fn test_unreachable_first_node() {
        let costs = CostMatrix::from_edges(2, &[(1, 0, 1)]).expect("valid edges");
        let g = Graph::new(costs, vec![0, 5]).expect("valid instance");
        let err = segment_route(&route(&[0, 1, 0]), &g, &limits(15, 5))
            .expect_err("node 1 is unreachable");
        assert_eq!(err, SegmentError::Unreachable { node: 1 });
    }

    #[test]
    fn test_segmented_route_passes_through_unchanged() {
        let g = uniform_graph(vec![0, 10, 10, 4]);
        let lim = limits(15, 5);
        let first = segment_route(&route(&[0, 1, 2, 3, 0]), &g, &lim).expect("reachable");
        let second = segment_route(&first, &g, &lim).expect("reachable");
        assert_eq!(first, second);
    }

    #[test]
    fn test_interior_depot_resets_counters() {
        // Each trip is at capacity; the explicit depot visit must reset the
        // load so no further split is inserted.
        let g = uniform_graph(vec![0, 15, 15]);
        let out = segment_route(&route(&[0, 1, 0, 2, 0]), &g, &limits(15, 5)).expect("reachable");
        assert_eq!(out.nodes(), &[0, 1, 0, 2, 0]);
    }

    proptest! {
        /// With every depot departure edge present, segmentation succeeds and
        /// every output trip respects both limits; stripping the depot visits
        /// recovers the input customer order exactly.
        #[test]
        fn output_trips_respect_limits(
            demands in proptest::collection::vec(1_u64..=5, 1..6),
            capacity in 5_u64..=20,
            max_stops in 1_usize..=4,
            edge_bits in proptest::collection::vec(any::<bool>(), 49),
        ) {
            let n = demands.len() + 1;
            let mut costs = CostMatrix::new(n);
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    // Depot departures always exist so no node is unreachable.
                    if i == DEPOT || edge_bits[i * 7 + j] {
                        costs.set(i, j, 1);
                    }
                }
            }
            let mut table = vec![0];
            table.extend(demands);
            let graph = Graph::new(costs, table).expect("valid instance");
            let lim = limits(capacity, max_stops);

            let raw: Vec<NodeId> = std::iter::once(DEPOT)
                .chain(1..n)
                .chain(std::iter::once(DEPOT))
                .collect();
            let out = segment_route(&route(&raw), &graph, &lim).expect("depot edges present");

            for trip in out.segments() {
                let total: u64 = trip.iter().map(|&v| graph.demand(v)).sum();
                prop_assert!(total <= lim.capacity());
                prop_assert!(trip.len() <= lim.max_stops());
            }

            let customers: Vec<NodeId> =
                out.nodes().iter().copied().filter(|&v| v != DEPOT).collect();
            let expected: Vec<NodeId> = (1..n).collect();
            prop_assert_eq!(customers, expected);
        }
    }
}
