//! The search result model: final path plus the full temporal trace.

use std::collections::HashSet;

use scout_core::Point;

/// Everything one search invocation produced.
///
/// Immutable after construction; every query below is a cheap borrow with no
/// hidden mutation, so a replay layer can poll the same result across frames
/// (or threads) freely.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Route from start to goal inclusive; empty when no path exists.
    pub path: Vec<Point>,
    /// Cells in the exact order they were finalized. No duplicates.
    pub visited_order: Vec<Point>,
    /// Frontier snapshots over time: the initial frontier (just the start
    /// cell) followed by one snapshot per processed pop. Append-only and
    /// never empty. Stale priority-queue entries can make consecutive
    /// snapshots identical.
    pub frontier_history: Vec<HashSet<Point>>,
}

impl SearchResult {
    /// Whether a path was found.
    #[inline]
    pub fn succeeded(&self) -> bool {
        !self.path.is_empty()
    }

    /// The frontier snapshot for replay step `step`, clamped to the last
    /// recorded snapshot so a replay can keep stepping past the end of the
    /// data.
    pub fn frontier_at(&self, step: usize) -> &HashSet<Point> {
        let last = self.frontier_history.len().saturating_sub(1);
        &self.frontier_history[step.min(last)]
    }

    /// The final frontier snapshot.
    pub fn last_frontier(&self) -> &HashSet<Point> {
        self.frontier_at(usize::MAX)
    }

    /// The first `step` visited cells, clamped to the full visitation
    /// order. This is the slice a replay layer renders at step `step`.
    pub fn visited_prefix(&self, step: usize) -> &[Point] {
        &self.visited_order[..step.min(self.visited_order.len())]
    }
}
