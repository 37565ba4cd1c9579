//! Depot-framed route representation.

use std::fmt;

use super::NodeId;

/// The fixed depot node id. Every route starts and ends here.
pub const DEPOT: NodeId = 0;

/// An ordered sequence of node visits beginning and ending at the depot.
///
/// Interior depot entries mark a return to the depot: the stretches between
/// consecutive depot visits are the trip segments of the route.
///
/// # Examples
///
/// ```
/// use rota::model::Route;
///
/// let route = Route::new(vec![0, 1, 3, 0, 2, 0]).expect("depot framed");
/// assert_eq!(route.len(), 6);
/// let segments: Vec<_> = route.segments().collect();
/// assert_eq!(segments, vec![&[1, 3][..], &[2][..]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    nodes: Vec<NodeId>,
}

impl Route {
    /// Creates a route from a node sequence.
    ///
    /// Returns `None` unless the sequence has at least two entries and both
    /// the first and last entry are the depot.
    pub fn new(nodes: Vec<NodeId>) -> Option<Self> {
        if nodes.len() < 2 || nodes[0] != DEPOT || nodes[nodes.len() - 1] != DEPOT {
            return None;
        }
        Some(Self { nodes })
    }

    /// Wraps a sequence already known to be depot framed.
    pub(crate) fn from_frame(nodes: Vec<NodeId>) -> Self {
        debug_assert!(
            nodes.len() >= 2 && nodes[0] == DEPOT && nodes[nodes.len() - 1] == DEPOT,
            "sequence must be depot framed"
        );
        Self { nodes }
    }

    /// Returns the full node sequence, depot entries included.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Length of the node sequence, depot entries included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the route visits no nodes at all.
    ///
    /// A valid route is never empty; this exists for completeness alongside
    /// [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the trip segments: maximal stretches of non-depot nodes
    /// between consecutive depot visits.
    ///
    /// The degenerate route `[0, 0]` has no segments.
    pub fn segments(&self) -> impl Iterator<Item = &[NodeId]> + '_ {
        self.nodes
            .split(|&n| n == DEPOT)
            .filter(|seg: &&[NodeId]| !seg.is_empty())
    }

    /// Consumes the route, returning the underlying node sequence.
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_new_depot_framed() {
        let r = Route::new(vec![0, 1, 2, 0]).expect("depot framed");
        assert_eq!(r.nodes(), &[0, 1, 2, 0]);
        assert_eq!(r.len(), 4);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_route_new_rejects_unframed() {
        assert!(Route::new(vec![1, 2, 0]).is_none());
        assert!(Route::new(vec![0, 1, 2]).is_none());
        assert!(Route::new(vec![0]).is_none());
        assert!(Route::new(vec![]).is_none());
    }

    #[test]
    fn test_degenerate_route_has_no_segments() {
        let r = Route::new(vec![0, 0]).expect("depot framed");
        assert_eq!(r.segments().count(), 0);
    }

    #[test]
    fn test_segments_between_depot_visits() {
        let r = Route::new(vec![0, 1, 3, 0, 2, 0]).expect("depot framed");
        let segments: Vec<_> = r.segments().collect();
        assert_eq!(segments, vec![&[1, 3][..], &[2][..]]);
    }

    #[test]
    fn test_segments_skip_adjacent_depots() {
        let r = Route::new(vec![0, 1, 0, 0, 2, 0]).expect("depot framed");
        let segments: Vec<_> = r.segments().collect();
        assert_eq!(segments, vec![&[1][..], &[2][..]]);
    }

    #[test]
    fn test_display_space_separated() {
        let r = Route::new(vec![0, 1, 2, 0]).expect("depot framed");
        assert_eq!(r.to_string(), "0 1 2 0");
    }

    #[test]
    fn test_into_nodes() {
        let r = Route::new(vec![0, 2, 1, 0]).expect("depot framed");
        assert_eq!(r.into_nodes(), vec![0, 2, 1, 0]);
    }
}
