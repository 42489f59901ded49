use std::cmp::Ordering;

use crate::Weight;

/// Priority queue entry.
///
/// Ordered by accumulated weight, then by push sequence, so that of two
/// entries with equal weight the one pushed first is popped first.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) struct State<'a> {
    pub(super) weight: Weight,
    pub(super) sequence: u64,
    pub(super) station: &'a str,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap (reversed from standard Rust BinaryHeap)
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for State<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
