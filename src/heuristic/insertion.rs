//! Cheapest-insertion construction of a single route.
//!
//! # Algorithm
//!
//! Grows the route outward from the degenerate `[0, 0]` frame. Each round
//! scans every unvisited node against every adjacent pair of the current
//! route and inserts the globally cheapest `(node, position)`; ascending
//! node ids and leftmost positions win ties. Running load and stop counters
//! trigger a depot return spliced in right after the node that overflowed
//! them. Nodes left without any feasible position go through two force
//! rules: the first position where both new edges exist, else insertion
//! after any node with an edge toward them plus an immediate depot return.
//! A final pass collapses depot visits doubled by back-to-back returns.
//!
//! # Complexity
//!
//! O(n³) worst case: up to n rounds, each scanning n nodes over n positions.

use log::warn;

use crate::model::{Constraints, Graph, NodeId, Route, DEPOT};

/// Result of the insertion construction.
#[derive(Debug, Clone)]
pub struct InsertionResult {
    /// The constructed depot-framed route.
    pub route: Route,
    /// Nodes no rule could place, in ascending order.
    pub unplaced: Vec<NodeId>,
}

impl InsertionResult {
    /// Returns `true` if every customer was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Builds one route by repeated cheapest insertion.
///
/// The construction always terminates with every placeable node in the
/// route; nodes that resist both force rules are reported in
/// [`InsertionResult::unplaced`] instead of aborting the construction. The
/// result is not guaranteed to be cost-feasible: a forced insertion can
/// leave a pair without an edge, which cost evaluation rejects later.
///
/// # Examples
///
/// ```
/// use rota::model::{Constraints, CostMatrix, Graph};
/// use rota::heuristic::cheapest_insertion;
///
/// let costs = CostMatrix::from_edges(
///     3,
///     &[(0, 1, 1), (1, 2, 1), (2, 0, 1), (0, 2, 1), (2, 1, 1), (1, 0, 1)],
/// )
/// .expect("valid edges");
/// let graph = Graph::new(costs, vec![0, 5, 5]).expect("valid instance");
/// let limits = Constraints::new(15, 5).expect("positive limits");
///
/// let built = cheapest_insertion(&graph, &limits);
/// assert!(built.is_complete());
/// assert_eq!(built.route.nodes(), &[0, 2, 1, 0]);
/// ```
pub fn cheapest_insertion(graph: &Graph, limits: &Constraints) -> InsertionResult {
    let n = graph.num_nodes();
    let mut nodes: Vec<NodeId> = vec![DEPOT, DEPOT];
    let mut visited = vec![false; n];
    visited[DEPOT] = true;

    let mut load: u64 = 0;
    let mut stops: usize = 0;

    loop {
        // Globally cheapest (node, position) across all unvisited nodes.
        let mut best: Option<(NodeId, usize, i64)> = None;
        for node in 1..n {
            if visited[node] {
                continue;
            }
            if let Some((pos, delta)) = best_insertion(&nodes, node, graph) {
                let wins = match best {
                    None => true,
                    Some((_, _, best_delta)) => delta < best_delta,
                };
                if wins {
                    best = Some((node, pos, delta));
                }
            }
        }
        let (node, pos, _) = match best {
            Some(found) => found,
            None => break,
        };

        nodes.insert(pos, node);
        visited[node] = true;
        load += graph.demand(node);
        stops += 1;
        if load > limits.capacity() || stops >= limits.max_stops() {
            nodes.insert(pos + 1, DEPOT);
            load = 0;
            stops = 0;
        }
    }

    let mut unplaced = Vec::new();
    for node in 1..n {
        if visited[node] {
            continue;
        }
        if force_insert(&mut nodes, node, graph, limits, &mut load, &mut stops) {
            visited[node] = true;
        } else {
            warn!("no insertion rule places node {}", node);
            unplaced.push(node);
        }
    }

    // The bare [0, 0] frame carries no doubled returns; dedup would strip
    // its closing depot.
    if nodes.len() > 2 {
        nodes.dedup_by(|a, b| *a == DEPOT && *b == DEPOT);
    }
    InsertionResult {
        route: Route::from_frame(nodes),
        unplaced,
    }
}

/// Cheapest position for `node`, scanning adjacent pairs left to right.
///
/// Both new edges must exist. The displaced pair edge enters the delta as
/// `-1` when missing, so positions bridging a gap carry a one-unit surcharge
/// instead of being skipped.
fn best_insertion(nodes: &[NodeId], node: NodeId, graph: &Graph) -> Option<(usize, i64)> {
    let mut best: Option<(usize, i64)> = None;
    for (i, pair) in nodes.windows(2).enumerate() {
        let approach = match graph.cost(pair[0], node) {
            Some(cost) => cost,
            None => continue,
        };
        let depart = match graph.cost(node, pair[1]) {
            Some(cost) => cost,
            None => continue,
        };
        let displaced = graph.cost(pair[0], pair[1]).map(i64::from).unwrap_or(-1);
        let delta = i64::from(approach) + i64::from(depart) - displaced;
        let wins = match best {
            None => true,
            Some((_, best_delta)) => delta < best_delta,
        };
        if wins {
            best = Some((i + 1, delta));
        }
    }
    best
}

/// Places a node the first possible way, full rule first, then relaxed.
///
/// The full rule behaves like a regular insertion and keeps the counters
/// honest. The relaxed rule only needs an edge toward the node; it forces a
/// depot return right behind it and leaves the counters untouched.
fn force_insert(
    nodes: &mut Vec<NodeId>,
    node: NodeId,
    graph: &Graph,
    limits: &Constraints,
    load: &mut u64,
    stops: &mut usize,
) -> bool {
    for i in 0..nodes.len() - 1 {
        if graph.cost(nodes[i], node).is_some() && graph.cost(node, nodes[i + 1]).is_some() {
            nodes.insert(i + 1, node);
            *load += graph.demand(node);
            *stops += 1;
            if *load > limits.capacity() || *stops >= limits.max_stops() {
                nodes.insert(i + 2, DEPOT);
                *load = 0;
                *stops = 0;
            }
            return true;
        }
    }
    for i in 0..nodes.len() - 1 {
        if graph.cost(nodes[i], node).is_some() {
            nodes.insert(i + 1, node);
            nodes.insert(i + 2, DEPOT);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CostMatrix;
    use crate::search::route_cost;

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

    #[test]
    fn test_uniform_instance_builds_complete_route() {
        let g = uniform_graph(vec![0, 5, 5, 5]);
        let built = cheapest_insertion(&g, &limits(15, 5));
        assert!(built.is_complete());
        // Later nodes slot in at the cheapest leftmost position, which keeps
        // pushing the front: 1, then 2 before it, then 3 before that.
        assert_eq!(built.route.nodes(), &[0, 3, 2, 1, 0]);
        assert_eq!(route_cost(&built.route, &g), Some(4));
    }

    #[test]
    fn test_capacity_overflow_forces_depot_return() {
        // 10 + 10 > 15: the second insertion closes its trip on the spot.
        let g = uniform_graph(vec![0, 10, 10]);
        let built = cheapest_insertion(&g, &limits(15, 5));
        assert!(built.is_complete());
        assert_eq!(built.route.nodes(), &[0, 2, 0, 1, 0]);
    }

    #[test]
    fn test_stop_limit_forces_depot_return() {
        let g = uniform_graph(vec![0, 1, 1, 1]);
        let built = cheapest_insertion(&g, &limits(100, 2));
        assert!(built.is_complete());
        assert_eq!(built.route.nodes(), &[0, 3, 2, 0, 1, 0]);
    }

    #[test]
    fn test_counters_are_global_running_totals() {
        // Insertions can land in an earlier trip while the counters keep
        // accumulating globally, so a trip may exceed the nominal capacity.
        let g = uniform_graph(vec![0, 4, 4, 4, 4, 4]);
        let built = cheapest_insertion(&g, &limits(10, 5));
        assert!(built.is_complete());
        assert_eq!(built.route.nodes(), &[0, 5, 4, 3, 0, 2, 1, 0]);
    }

    #[test]
    fn test_relaxed_rule_places_dead_end_node() {
        // Node 2 can be entered from 1 but never left.
        let costs = CostMatrix::from_edges(3, &[(0, 1, 1), (1, 0, 1), (1, 2, 1)])
            .expect("valid edges");
        let g = Graph::new(costs, vec![0, 5, 5]).expect("valid instance");
        let built = cheapest_insertion(&g, &limits(15, 5));
        assert!(built.is_complete());
        assert_eq!(built.route.nodes(), &[0, 1, 2, 0]);
        // The forced placement bridges a missing return edge.
        assert_eq!(route_cost(&built.route, &g), None);
    }

    #[test]
    fn test_unplaceable_node_is_reported() {
        // Node 2 has no incoming edge at all.
        let costs = CostMatrix::from_edges(3, &[(0, 1, 1), (1, 0, 1), (2, 0, 1)])
            .expect("valid edges");
        let g = Graph::new(costs, vec![0, 5, 5]).expect("valid instance");
        let built = cheapest_insertion(&g, &limits(15, 5));
        assert_eq!(built.unplaced, vec![2]);
        assert!(!built.is_complete());
        assert_eq!(built.route.nodes(), &[0, 1, 0]);
    }

    #[test]
    fn test_all_customers_unplaceable_keeps_depot_frame() {
        // No edges at all: both customers resist every insertion rule.
        let g = Graph::new(CostMatrix::new(3), vec![0, 5, 5]).expect("valid instance");
        let built = cheapest_insertion(&g, &limits(15, 5));
        assert_eq!(built.unplaced, vec![1, 2]);
        assert_eq!(built.route.nodes(), &[0, 0]);
    }

    #[test]
    fn test_no_customers_yields_degenerate_route() {
        let g = uniform_graph(vec![0]);
        let built = cheapest_insertion(&g, &limits(15, 5));
        assert!(built.is_complete());
        assert_eq!(built.route.nodes(), &[0, 0]);
    }
}
