//! Running best-candidate accumulator.

use crate::model::Route;

/// A feasible candidate after segmentation and costing.
///
/// `index` is the candidate's position in the lexicographic enumeration of
/// the full candidate set, used to break cost ties deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluated {
    /// Total cost of the segmented route.
    pub cost: u64,
    /// Position in the candidate enumeration.
    pub index: u64,
    /// The segmented, depot-framed route.
    pub route: Route,
}

impl Evaluated {
    /// Returns `true` if this candidate wins against `other`: strictly
    /// cheaper, or equally cheap and enumerated earlier.
    pub fn beats(&self, other: &Evaluated) -> bool {
        self.cost < other.cost || (self.cost == other.cost && self.index < other.index)
    }
}

/// The best candidate seen so far by one worker unit.
///
/// Each thread folds its candidates into a private incumbent; incumbents are
/// then merged pairwise, which keeps the comparison step outside any lock
/// except the final merge.
///
/// # Examples
///
/// ```
/// use rota::model::Route;
/// use rota::search::{Evaluated, Incumbent};
///
/// let mut best = Incumbent::new();
/// assert!(best.best().is_none());
///
/// let route = Route::new(vec![0, 1, 0]).expect("depot framed");
/// best.offer(Evaluated { cost: 7, index: 3, route });
/// assert_eq!(best.best().expect("one candidate").cost, 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Incumbent {
    best: Option<Evaluated>,
}

impl Incumbent {
    /// Creates an empty incumbent holding no candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Considers a candidate, keeping it only if it beats the current best.
    pub fn offer(&mut self, candidate: Evaluated) {
        let wins = match &self.best {
            None => true,
            Some(current) => candidate.beats(current),
        };
        if wins {
            self.best = Some(candidate);
        }
    }

    /// Folds another incumbent into this one.
    pub fn merge(&mut self, other: Incumbent) {
        if let Some(candidate) = other.best {
            self.offer(candidate);
        }
    }

    /// The current best candidate, if any was feasible.
    pub fn best(&self) -> Option<&Evaluated> {
        self.best.as_ref()
    }

    /// Consumes the incumbent, returning the best candidate.
    pub fn into_best(self) -> Option<Evaluated> {
        self.best
    }
}
