//! Lazy lexicographic enumeration of depot-framed candidate routes.
//!
//! # Algorithm
//!
//! In-place next-permutation stepping: locate the longest non-increasing
//! suffix, swap the element before it (the pivot) with the rightmost element
//! greater than the pivot, then reverse the suffix. Starting from the
//! ascending arrangement this visits every arrangement of the customer set in
//! lexicographic order without materializing the factorial candidate set.
//!
//! # Complexity
//!
//! O(k) worst case per step for k customers, O(k) memory total.

use crate::model::{NodeId, Route, DEPOT};

/// Iterator over all depot-framed permutations of a customer set.
///
/// Candidates appear in lexicographic order of the customer sequence, so the
/// position of a candidate in the stream is stable across runs and across
/// processes enumerating the same set. The stream is restartable by
/// constructing a new iterator from the same customers.
///
/// An empty customer set yields exactly one candidate, the degenerate route
/// `[0, 0]`.
///
/// # Examples
///
/// ```
/// use rota::search::DepotPermutations;
///
/// let routes: Vec<_> = DepotPermutations::new(&[1, 2]).collect();
/// assert_eq!(routes.len(), 2);
/// assert_eq!(routes[0].nodes(), &[0, 1, 2, 0]);
/// assert_eq!(routes[1].nodes(), &[0, 2, 1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct DepotPermutations {
    customers: Vec<NodeId>,
    exhausted: bool,
}

impl DepotPermutations {
    /// Creates the stream over the given distinct customer ids.
    ///
    /// The ids are sorted internally so enumeration starts from the
    /// lexicographically smallest arrangement regardless of input order.
    pub fn new(customers: &[NodeId]) -> Self {
        let mut customers = customers.to_vec();
        customers.sort_unstable();
        debug_assert!(
            customers.windows(2).all(|w| w[0] != w[1]),
            "customer ids must be distinct"
        );
        debug_assert!(
            !customers.contains(&DEPOT),
            "the depot is not a customer"
        );
        Self {
            customers,
            exhausted: false,
        }
    }

    /// Frames the current arrangement with the depot on both ends.
    fn frame(&self) -> Route {
        let mut nodes = Vec::with_capacity(self.customers.len() + 2);
        nodes.push(DEPOT);
        nodes.extend_from_slice(&self.customers);
        nodes.push(DEPOT);
        Route::from_frame(nodes)
    }

    /// Advances to the next lexicographic arrangement.
    ///
    /// Returns `false` when the current arrangement is already the last.
    fn step(&mut self) -> bool {
        let seq = &mut self.customers;
        let pivot = match seq.windows(2).rposition(|w| w[0] < w[1]) {
            Some(p) => p,
            None => return false,
        };
        let successor = seq
            .iter()
            .rposition(|&x| x > seq[pivot])
            .expect("pivot is smaller than some suffix element");
        seq.swap(pivot, successor);
        seq[pivot + 1..].reverse();
        true
    }
}

impl Iterator for DepotPermutations {
    type Item = Route;

    fn next(&mut self) -> Option<Route> {
        if self.exhausted {
            return None;
        }
        let route = self.frame();
        if !self.step() {
            self.exhausted = true;
        }
        Some(route)
    }
}

/// Number of candidates for a customer set of size `k`, i.e. `k!`.
///
/// Returns `None` if the count overflows `u64` (k > 20).
pub fn candidate_count(k: usize) -> Option<u64> {
    let mut total: u64 = 1;
    for i in 2..=k as u64 {
        total = total.checked_mul(i)?;
    }
    Some(total)
}
