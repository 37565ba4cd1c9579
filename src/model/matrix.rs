//! Dense directed edge-cost matrix.

use super::NodeId;

/// A dense n×n matrix of directed edge costs stored in row-major order.
///
/// `None` marks a missing directed edge. Present costs are non-negative
/// integers; entries need not be symmetric (the graph is directed).
///
/// # Examples
///
/// ```
/// use rota::model::CostMatrix;
///
/// let mut m = CostMatrix::new(3);
/// m.set(0, 1, 4);
/// assert_eq!(m.get(0, 1), Some(4));
/// assert_eq!(m.get(1, 0), None);
/// assert_eq!(m.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CostMatrix {
    entries: Vec<Option<u32>>,
    size: usize,
}

impl CostMatrix {
    /// Creates a matrix of the given size with every edge absent.
    pub fn new(size: usize) -> Self {
        Self {
            entries: vec![None; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit edge list.
    ///
    /// A repeated `(from, to)` pair overwrites the earlier cost. Returns
    /// `None` if any endpoint is outside `[0, size)`.
    pub fn from_edges(size: usize, edges: &[(NodeId, NodeId, u32)]) -> Option<Self> {
        let mut m = Self::new(size);
        for &(from, to, cost) in edges {
            if from >= size || to >= size {
                return None;
            }
            m.set(from, to, cost);
        }
        Some(m)
    }

    /// Returns the cost of the directed edge `from -> to`, or `None` if the
    /// edge does not exist.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.entries[from * self.size + to]
    }

    /// Sets the cost of the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn set(&mut self, from: NodeId, to: NodeId, cost: u32) {
        self.entries[from * self.size + to] = Some(cost);
    }

    /// Number of nodes covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}
