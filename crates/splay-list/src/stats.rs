//! The pluggable aggregate ("order statistic") reducer.
//!
//! Each node carries a fixed record of aggregate fields describing its
//! whole subtree.  The record type and the rule for computing it are
//! chosen at list construction time through [`OrderStats`]; the list is
//! generic over the reducer instead of being subclassed.

/// Recomputes a node's aggregate record purely from its own value and its
/// two children's already-correct records.
///
/// The record must always expose the subtree size through
/// [`OrderStats::count`]: `1 + count(left) + count(right)`, with an
/// absent child contributing 0.  Any field used as a search key with
/// [`SplayList::find_by`](crate::SplayList::find_by) must be monotone
/// (a child's value never exceeds its parent's) and non-negative; that
/// holds for any per-value sum of non-negative numbers.
pub trait OrderStats<V> {
    /// Aggregate record attached to every node.
    type Stats;

    /// `combine(value, left, right)` — pure; `None` means the child is
    /// absent and contributes its identity.
    fn combine(
        &self,
        value: &V,
        left: Option<&Self::Stats>,
        right: Option<&Self::Stats>,
    ) -> Self::Stats;

    /// Subtree size stored in `stats`.
    fn count(stats: &Self::Stats) -> usize;
}

/// Default reducer: the record is the subtree size and nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl<V> OrderStats<V> for Count {
    type Stats = usize;

    fn combine(&self, _value: &V, left: Option<&usize>, right: Option<&usize>) -> usize {
        1 + left.copied().unwrap_or(0) + right.copied().unwrap_or(0)
    }

    fn count(stats: &usize) -> usize {
        *stats
    }
}
