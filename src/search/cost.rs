//! Total cost of a finalized route.

use crate::model::{Graph, Route};

/// Sums the edge costs along a route, walking every consecutive pair.
///
/// Returns `None` as soon as any pair has no edge: an infeasible route has no
/// cost at all and never competes with real candidates. Depot boundaries get
/// no special treatment here, so a segmentation that spliced in a depot visit
/// without a return or departure edge is rejected at this stage.
///
/// # Examples
///
/// ```
/// use rota::model::{CostMatrix, Graph, Route};
/// use rota::search::route_cost;
///
/// let costs = CostMatrix::from_edges(3, &[(0, 1, 2), (1, 2, 3), (2, 0, 4)])
///     .expect("valid edges");
/// let graph = Graph::new(costs, vec![0, 1, 1]).expect("valid instance");
///
/// let route = Route::new(vec![0, 1, 2, 0]).expect("depot framed");
/// assert_eq!(route_cost(&route, &graph), Some(9));
///
/// let back = Route::new(vec![0, 2, 1, 0]).expect("depot framed");
/// assert_eq!(route_cost(&back, &graph), None);
/// ```
pub fn route_cost(route: &Route, graph: &Graph) -> Option<u64> {
    let mut total: u64 = 0;
    for pair in route.nodes().windows(2) {
        total += u64::from(graph.cost(pair[0], pair[1])?);
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CostMatrix;

    fn uniform_graph(n: usize) -> Graph {
        let mut costs = CostMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    costs.set(i, j, 1);
                }
            }
        }
        Graph::new(costs, std::iter::once(0).chain(std::iter::repeat(1)).take(n).collect())
            .expect("valid instance")
    }

    #[test]
    fn test_cost_sums_every_pair() {
        let g = uniform_graph(4);
        let r = Route::new(vec![0, 1, 2, 3, 0]).expect("depot framed");
        // 0→1→2→3→0 = 1+1+1+1 = 4
        assert_eq!(route_cost(&r, &g), Some(4));
    }

    #[test]
    fn test_cost_includes_depot_returns() {
        let g = uniform_graph(3);
        let r = Route::new(vec![0, 1, 0, 2, 0]).expect("depot framed");
        // 0→1→0→2→0 = 1+1+1+1 = 4
        assert_eq!(route_cost(&r, &g), Some(4));
    }

    #[test]
    fn test_missing_edge_yields_none() {
        let costs = CostMatrix::from_edges(3, &[(0, 1, 1), (1, 2, 1)]).expect("valid edges");
        let g = Graph::new(costs, vec![0, 1, 1]).expect("valid instance");
        let r = Route::new(vec![0, 1, 2, 0]).expect("depot framed");
        // 2→0 is missing.
        assert_eq!(route_cost(&r, &g), None);
    }

    #[test]
    fn test_degenerate_route_needs_self_loop() {
        let g = uniform_graph(1);
        let r = Route::new(vec![0, 0]).expect("depot framed");
        assert_eq!(route_cost(&r, &g), None);
    }
}
