//! Problem instance: cost matrix plus demand table.

use super::{CostMatrix, NodeId, DEPOT};

/// A routing instance: directed edge costs and per-node demands.
///
/// Node ids are `0..num_nodes()`, with node `0` the depot. The depot carries
/// demand `0`; every other node has a strictly positive demand. Instances are
/// immutable once built and safe to share across threads.
///
/// # Examples
///
/// ```
/// use rota::model::{CostMatrix, Graph};
///
/// let costs = CostMatrix::from_edges(3, &[(0, 1, 2), (1, 2, 3), (2, 0, 4)])
///     .expect("valid edges");
/// let graph = Graph::new(costs, vec![0, 5, 7]).expect("valid instance");
/// assert_eq!(graph.num_customers(), 2);
/// assert_eq!(graph.demand(2), 7);
/// assert_eq!(graph.cost(1, 2), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    costs: CostMatrix,
    demands: Vec<u64>,
}

impl Graph {
    /// Creates an instance from a cost matrix and a demand table indexed by
    /// node id.
    ///
    /// Returns `None` if the table length differs from the matrix size, the
    /// instance has no depot, the depot entry is nonzero, or any customer
    /// demand is zero.
    pub fn new(costs: CostMatrix, demands: Vec<u64>) -> Option<Self> {
        if demands.len() != costs.size() || demands.is_empty() {
            return None;
        }
        if demands[DEPOT] != 0 {
            return None;
        }
        if demands[1..].iter().any(|&d| d == 0) {
            return None;
        }
        Some(Self { costs, demands })
    }

    /// Total number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.demands.len()
    }

    /// Number of customer nodes (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.demands.len() - 1
    }

    /// Customer node ids in ascending order.
    pub fn customer_ids(&self) -> Vec<NodeId> {
        (1..self.num_nodes()).collect()
    }

    /// Demand of the given node. The depot's demand is `0`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn demand(&self, node: NodeId) -> u64 {
        self.demands[node]
    }

    /// Cost of the directed edge `from -> to`, or `None` if absent.
    ///
    /// # Panics
    ///
    /// Panics if either node is out of range.
    pub fn cost(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.costs.get(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_new() {
        let costs = CostMatrix::from_edges(3, &[(0, 1, 1), (1, 2, 1)]).expect("valid edges");
        let g = Graph::new(costs, vec![0, 5, 7]).expect("valid instance");
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_customers(), 2);
        assert_eq!(g.customer_ids(), vec![1, 2]);
        assert_eq!(g.demand(0), 0);
        assert_eq!(g.demand(1), 5);
        assert_eq!(g.cost(0, 1), Some(1));
        assert_eq!(g.cost(2, 1), None);
    }

    #[test]
    fn test_graph_rejects_length_mismatch() {
        let costs = CostMatrix::new(3);
        assert!(Graph::new(costs, vec![0, 5]).is_none());
    }

    #[test]
    fn test_graph_rejects_depot_demand() {
        let costs = CostMatrix::new(2);
        assert!(Graph::new(costs, vec![3, 5]).is_none());
    }

    #[test]
    fn test_graph_rejects_zero_customer_demand() {
        let costs = CostMatrix::new(3);
        assert!(Graph::new(costs, vec![0, 5, 0]).is_none());
    }

    #[test]
    fn test_graph_rejects_empty() {
        let costs = CostMatrix::new(0);
        assert!(Graph::new(costs, vec![]).is_none());
    }

    #[test]
    fn test_depot_only_instance() {
        let costs = CostMatrix::new(1);
        let g = Graph::new(costs, vec![0]).expect("valid instance");
        assert_eq!(g.num_customers(), 0);
        assert!(g.customer_ids().is_empty());
    }
}
