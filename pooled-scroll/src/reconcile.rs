use std::collections::VecDeque;

use crate::VisibleRange;
use crate::pool::PoolHandle;

/// A pooled instance bound to a logical index.
///
/// The index is rewritten every time the instance is reused for another position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Holder {
    pub index: usize,
    pub handle: PoolHandle,
}

pub(crate) trait Indexed {
    fn index(&self) -> usize;
}

impl Indexed for Holder {
    fn index(&self) -> usize {
        self.index
    }
}

/// Creates and retires the slots of a window during reconciliation.
pub(crate) trait Materializer {
    type Item: Indexed;

    fn retire(&mut self, item: Self::Item);

    /// Returns `None` when nothing could be spawned (e.g. pool exhausted).
    fn create(&mut self, index: usize) -> Option<Self::Item>;
}

/// Pool traffic caused by one reconciliation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub retired: usize,
    pub created: usize,
    /// Slots of the new range that could not be materialized.
    pub skipped: usize,
}

impl ReconcileStats {
    pub fn is_noop(&self) -> bool {
        self.retired == 0 && self.created == 0
    }
}

/// Brings `active` (sorted ascending by index) in line with `range`.
///
/// Holders still inside the range are left untouched. When none survive, the range is built
/// ascending from scratch; otherwise only the uncovered prefix (inserted front, descending) and
/// suffix (inserted back, ascending) are created.
pub(crate) fn reconcile<M: Materializer>(
    active: &mut VecDeque<M::Item>,
    range: Option<VisibleRange>,
    m: &mut M,
) -> ReconcileStats {
    let mut stats = ReconcileStats::default();
    let keep = |index: usize| range.is_some_and(|r| r.contains(index));

    // `active` is sorted and `range` contiguous, so out-of-range items sit at either end.
    while active.front().is_some_and(|it| !keep(it.index())) {
        if let Some(item) = active.pop_front() {
            m.retire(item);
            stats.retired += 1;
        }
    }
    while active.back().is_some_and(|it| !keep(it.index())) {
        if let Some(item) = active.pop_back() {
            m.retire(item);
            stats.retired += 1;
        }
    }

    let Some(range) = range else {
        return stats;
    };

    let retained = active
        .front()
        .map(Indexed::index)
        .zip(active.back().map(Indexed::index));

    match retained {
        None => {
            for i in range.start_index..=range.end_index {
                match m.create(i) {
                    Some(item) => {
                        active.push_back(item);
                        stats.created += 1;
                    }
                    None => stats.skipped += 1,
                }
            }
        }
        Some((first, last)) => {
            for i in (range.start_index..first).rev() {
                match m.create(i) {
                    Some(item) => {
                        active.push_front(item);
                        stats.created += 1;
                    }
                    None => stats.skipped += 1,
                }
            }
            for i in last + 1..=range.end_index {
                match m.create(i) {
                    Some(item) => {
                        active.push_back(item);
                        stats.created += 1;
                    }
                    None => stats.skipped += 1,
                }
            }
        }
    }

    stats
}
