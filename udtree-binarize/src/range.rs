//! Arc intervals and the crossing test.

use std::cmp::{max, min};

use udtree::graph::DepTree;

/// The closed token interval covered by a dependency arc.
///
/// Equality takes the `lifted` flag into account, so the interval of a
/// lifted arc is distinct from the same numeric range produced by an
/// original arc.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TRange {
    start: usize,
    end: usize,
    lifted: bool,
}

impl TRange {
    /// Construct an interval. `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "interval start exceeds end");
        TRange {
            start,
            end,
            lifted: false,
        }
    }

    /// Construct the interval covered by the arc between `head` and
    /// `dependent`.
    pub fn from_edge(head: usize, dependent: usize) -> Self {
        TRange::new(min(head, dependent), max(head, dependent))
    }

    /// Mark this interval as produced by a lifted arc.
    pub fn into_lifted(mut self) -> Self {
        self.lifted = true;
        self
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns `true` iff `idx` lies within the interval. Both ends are
    /// inclusive.
    pub fn contains(&self, idx: usize) -> bool {
        self.start <= idx && idx <= self.end
    }

    /// Returns `true` iff `other` lies entirely within this interval.
    pub fn contains_range(&self, other: &TRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Returns `true` iff the intervals cross: they overlap in more
    /// than an endpoint and neither contains the other. Two arcs that
    /// share a token do not cross.
    pub fn crosses(&self, other: &TRange) -> bool {
        !self.contains_range(other)
            && !other.contains_range(self)
            && max(self.start, other.start) < min(self.end, other.end)
    }
}

/// Returns `true` iff `range` crosses any member of `ranges`.
pub(crate) fn crosses_any(range: &TRange, ranges: &[TRange]) -> bool {
    ranges.iter().any(|r| range.crosses(r))
}

/// Returns `true` iff the tree contains a pair of crossing arcs.
///
/// This is a read-only O(n^2) scan over all arcs, used as a cheap gate
/// before running the projectivizer.
pub fn has_crossing(tree: &DepTree) -> bool {
    let mut ranges = Vec::with_capacity(tree.len());

    for node in 1..tree.len() {
        let triple = match tree.head(node) {
            Some(triple) => triple,
            None => continue,
        };

        let range = TRange::from_edge(triple.head(), node);
        if crosses_any(&range, &ranges) {
            return true;
        }

        ranges.push(range);
    }

    false
}
