use std::sync::Arc;

use crate::ScrollRange;

/// Lifecycle and range notifications of a scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollEvent {
    /// The first materialization after `initialize`/`reinitialize` produced content.
    ContentCalculated,
    /// A drag began (or a screen transition started).
    ScrollStarted(ScrollRange),
    /// Motion stopped after having been observed.
    ScrollEnded(ScrollRange),
    /// The materialized range changed.
    ScrollRangeChanged(ScrollRange),
}

pub type EventCallback = Arc<dyn Fn(ScrollEvent) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered subscriber list. Events are delivered synchronously in subscription order.
#[derive(Clone, Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, EventCallback)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, callback: EventCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        before != self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn emit(&self, event: ScrollEvent) {
        vtrace!(?event, "emit");
        for (_, cb) in &self.entries {
            cb(event);
        }
    }
}

impl core::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
