//! Per-trip operating limits.

/// Limits applied to every depot-to-depot trip of the vehicle.
///
/// Both limits are strictly positive: a vehicle that can carry nothing or
/// stop nowhere cannot serve any node.
///
/// # Examples
///
/// ```
/// use rota::model::Constraints;
///
/// let limits = Constraints::new(15, 5).expect("positive limits");
/// assert_eq!(limits.capacity(), 15);
/// assert_eq!(limits.max_stops(), 5);
/// assert!(Constraints::new(0, 5).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    capacity: u64,
    max_stops: usize,
}

impl Constraints {
    /// Creates trip limits from a load capacity and a stop count.
    ///
    /// Returns `None` if either limit is zero.
    pub fn new(capacity: u64, max_stops: usize) -> Option<Self> {
        if capacity == 0 || max_stops == 0 {
            return None;
        }
        Some(Self {
            capacity,
            max_stops,
        })
    }

    /// Maximum total demand a single trip may serve.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Maximum number of nodes a single trip may visit.
    pub fn max_stops(&self) -> usize {
        self.max_stops
    }
}
