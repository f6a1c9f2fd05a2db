use std::sync::Arc;

use crate::events::Subscribers;
use crate::host::{ObjectSource, ScreenCallbacks, SourceHooks, Transition};
use crate::pool::ObjectPool;
use crate::reconcile::Holder;
use crate::{EventCallback, LifecycleState, ScrollError, ScrollEvent, ScrollRange, SubscriptionId};

/// Result of a screen navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScreenStep {
    /// The new screen is active and the previous one was recycled.
    Moved,
    /// The transition callback is still running; see [`ScreenScroll::finish_transition`].
    Pending,
    /// The target is outside `[0, count)`; nothing changed.
    CantMove,
    /// Another transition is pending; the request was ignored.
    Busy,
    /// Not initialized, disposed, empty, or the pool could not spawn the next screen.
    Unavailable,
}

/// Transition hooks for scrolls that need none.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCallbacks;

impl<O> ScreenCallbacks<O> for NoCallbacks {}

#[derive(Clone, Copy, Debug)]
struct PendingMove {
    next: Holder,
}

/// Full-screen paging: exactly one active element, swapped through transition callbacks
/// instead of physical scrolling.
///
/// Transitions never overlap. While a host-driven transition is running, further requests
/// return [`ScreenStep::Busy`].
pub struct ScreenScroll<S: ObjectSource, CB = NoCallbacks> {
    source: S,
    callbacks: Option<CB>,
    pool: ObjectPool<S::Object>,
    active: Option<Holder>,
    pending: Option<PendingMove>,
    count: usize,
    state: LifecycleState,
    subscribers: Subscribers,
}

impl<S: ObjectSource> ScreenScroll<S, NoCallbacks> {
    pub fn without_callbacks(source: S) -> Self {
        Self::new(source, None)
    }
}

impl<S: ObjectSource, CB: ScreenCallbacks<S::Object>> ScreenScroll<S, CB> {
    pub fn new(source: S, callbacks: Option<CB>) -> Self {
        Self {
            source,
            callbacks,
            pool: ObjectPool::new(None),
            active: None,
            pending: None,
            count: 0,
            state: LifecycleState::Uninitialized,
            subscribers: Subscribers::default(),
        }
    }

    /// Bounds the pool. At most two screens are alive at a time, so `Some(2)` is enough.
    pub fn with_max_pool_size(mut self, max_size: Option<usize>) -> Self {
        self.pool = ObjectPool::new(max_size);
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn callbacks(&self) -> Option<&CB> {
        self.callbacks.as_ref()
    }

    pub fn callbacks_mut(&mut self) -> Option<&mut CB> {
        self.callbacks.as_mut()
    }

    pub fn pool(&self) -> &ObjectPool<S::Object> {
        &self.pool
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(ScrollEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(Arc::new(callback) as EventCallback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn initialize(&mut self, count: usize, start_index: usize) -> Result<(), ScrollError> {
        if self.state == LifecycleState::Disposed {
            return Err(ScrollError::Disposed);
        }
        vinfo!(count, start_index, "ScreenScroll::initialize");
        self.release_all();
        self.count = count;
        self.state = LifecycleState::Initialized;
        if count == 0 {
            return Ok(());
        }

        let index = start_index.min(count - 1);
        self.active = self.spawn(index);
        if self.active.is_some() {
            self.emit(ScrollEvent::ContentCalculated);
        }
        Ok(())
    }

    /// Replaces the data set with `count` screens and shows the first one.
    pub fn reinitialize(&mut self, count: usize) -> Result<(), ScrollError> {
        match self.state {
            LifecycleState::Uninitialized => Err(ScrollError::NotInitialized),
            LifecycleState::Disposed => Err(ScrollError::Disposed),
            LifecycleState::Initialized => self.initialize(count, 0),
        }
    }

    pub fn dispose(&mut self) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        vinfo!("ScreenScroll::dispose");
        self.subscribers.clear();
        self.active = None;
        self.pending = None;
        self.pool.dispose(&mut SourceHooks(&mut self.source));
        self.state = LifecycleState::Disposed;
    }

    fn release_all(&mut self) {
        let holders = self.active.take().into_iter().chain(self.pending.take().map(|p| p.next));
        for holder in holders {
            self.pool
                .release(holder.handle, &mut SourceHooks(&mut self.source));
        }
    }

    fn spawn(&mut self, index: usize) -> Option<Holder> {
        let handle = self.pool.acquire(&mut SourceHooks(&mut self.source))?;
        if let Some(object) = self.pool.get_mut(handle) {
            self.source.bind(index, object);
        }
        Some(Holder { index, handle })
    }

    fn emit(&self, event: ScrollEvent) {
        self.subscribers.emit(event);
    }

    fn active_range(&self) -> ScrollRange {
        self.active
            .map(|h| ScrollRange::new(h.index, h.index))
            .unwrap_or_default()
    }

    /// Runs the open callback on the active screen.
    pub fn show(&mut self) -> bool {
        let (Some(active), Some(callbacks)) = (self.active, self.callbacks.as_mut()) else {
            return false;
        };
        match self.pool.get_mut(active.handle) {
            Some(object) => {
                callbacks.on_open(object);
                true
            }
            None => false,
        }
    }

    pub fn scroll_next(&mut self) -> ScreenStep {
        match self.active {
            Some(active) => self.proceed(active.index.checked_add(1), true),
            None => ScreenStep::Unavailable,
        }
    }

    pub fn scroll_back(&mut self) -> ScreenStep {
        match self.active {
            Some(active) => self.proceed(active.index.checked_sub(1), false),
            None => ScreenStep::Unavailable,
        }
    }

    /// Moves to `index`. The direction passed to the callbacks is `index > current`.
    pub fn scroll_to(&mut self, index: usize) -> ScreenStep {
        match self.active {
            Some(active) => self.proceed(Some(index), index > active.index),
            None => ScreenStep::Unavailable,
        }
    }

    fn proceed(&mut self, target: Option<usize>, to_next: bool) -> ScreenStep {
        if self.state != LifecycleState::Initialized {
            return ScreenStep::Unavailable;
        }
        if self.pending.is_some() {
            vdebug!("ScreenScroll: transition pending, request ignored");
            return ScreenStep::Busy;
        }
        let Some(active) = self.active else {
            return ScreenStep::Unavailable;
        };

        let Some(index) = target.filter(|&i| i < self.count) else {
            vdebug!(?target, count = self.count, "ScreenScroll: can't move");
            if let (Some(callbacks), Some(object)) =
                (self.callbacks.as_mut(), self.pool.get_mut(active.handle))
            {
                callbacks.on_cant_move(to_next, object);
            }
            return ScreenStep::CantMove;
        };

        let Some(next) = self.spawn(index) else {
            vwarn!(index, "ScreenScroll: pool exhausted");
            return ScreenStep::Unavailable;
        };
        self.emit(ScrollEvent::ScrollStarted(self.active_range()));

        let transition = match (
            self.callbacks.as_mut(),
            self.pool.get_pair_mut(active.handle, next.handle),
        ) {
            (Some(callbacks), Some((current, incoming))) => {
                callbacks.on_move(to_next, current, incoming)
            }
            _ => Transition::Finished,
        };

        self.pending = Some(PendingMove { next });
        match transition {
            Transition::Finished => {
                self.commit();
                ScreenStep::Moved
            }
            Transition::Running => ScreenStep::Pending,
        }
    }

    fn commit(&mut self) {
        let Some(PendingMove { next }) = self.pending.take() else {
            return;
        };
        if let Some(previous) = self.active.replace(next) {
            self.pool
                .release(previous.handle, &mut SourceHooks(&mut self.source));
        }
        vtrace!(index = next.index, "ScreenScroll: moved");
        let range = self.active_range();
        self.emit(ScrollEvent::ScrollRangeChanged(range));
        self.emit(ScrollEvent::ScrollEnded(range));
    }

    /// Completes a transition that returned [`Transition::Running`].
    pub fn finish_transition(&mut self) -> bool {
        if self.pending.is_none() {
            return false;
        }
        self.commit();
        true
    }

    /// Abandons a running transition: the incoming screen is recycled and the current one stays.
    pub fn cancel_transition(&mut self) -> bool {
        let Some(PendingMove { next }) = self.pending.take() else {
            return false;
        };
        vdebug!(index = next.index, "ScreenScroll: transition cancelled");
        self.pool
            .release(next.handle, &mut SourceHooks(&mut self.source));
        self.emit(ScrollEvent::ScrollEnded(self.active_range()));
        true
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn current_start_index(&self) -> usize {
        self.active.map_or(0, |h| h.index)
    }

    pub fn current_end_index(&self) -> usize {
        self.current_start_index()
    }

    pub fn active_objects(&self) -> usize {
        usize::from(self.active.is_some())
    }

    /// Current and incoming screen.
    pub fn max_visible_objects(&self) -> usize {
        2
    }

    pub fn active_object(&self) -> Option<&S::Object> {
        self.pool.get(self.active?.handle)
    }

    pub fn incoming_object(&self) -> Option<&S::Object> {
        self.pool.get(self.pending?.next.handle)
    }
}

impl<S: ObjectSource, CB> core::fmt::Debug for ScreenScroll<S, CB> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScreenScroll")
            .field("state", &self.state)
            .field("count", &self.count)
            .field("active", &self.active.map(|h| h.index))
            .field("pending", &self.pending.map(|p| p.next.index))
            .finish_non_exhaustive()
    }
}
