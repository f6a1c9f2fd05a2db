use std::collections::VecDeque;

use crate::host::{ObjectSource, SourceHooks};
use crate::offsets::OffsetTable;
use crate::pool::ObjectPool;
use crate::reconcile::{Holder, Materializer, ReconcileStats, reconcile};
use crate::track::Track;
use crate::{
    EventCallback, Extent, LifecycleState, Placeholders, ScrollError, ScrollEvent, ScrollOptions,
    ScrollRange, ScrollSnapshot, ScrollSurface, SubscriptionId, VisibleRange,
};

/// A virtualized list with one pooled element per logical position.
///
/// Only the elements intersecting the viewport are materialized. Two placeholders stand in
/// for everything before and after them, so the total scrollable extent stays exact.
///
/// The host drives it by reporting the viewport size and scroll position; it renders the
/// leading placeholder, then [`Self::holders`] in order, then the trailing placeholder.
pub struct ListScroll<S: ObjectSource> {
    track: Track,
    source: S,
    pool: ObjectPool<S::Object>,
    active: VecDeque<Holder>,
    last_stats: ReconcileStats,
}

struct ListSlots<'a, S: ObjectSource> {
    pool: &'a mut ObjectPool<S::Object>,
    source: &'a mut S,
}

impl<S: ObjectSource> Materializer for ListSlots<'_, S> {
    type Item = Holder;

    fn retire(&mut self, holder: Holder) {
        self.pool.release(holder.handle, &mut SourceHooks(&mut *self.source));
    }

    fn create(&mut self, index: usize) -> Option<Holder> {
        let handle = self.pool.acquire(&mut SourceHooks(&mut *self.source))?;
        if let Some(object) = self.pool.get_mut(handle) {
            self.source.bind(index, object);
        }
        Some(Holder { index, handle })
    }
}

impl<S: ObjectSource> ListScroll<S> {
    pub fn new(options: ScrollOptions, source: S) -> Self {
        let pool = ObjectPool::new(options.max_pool_size);
        Self {
            track: Track::new(options),
            source,
            pool,
            active: VecDeque::new(),
            last_stats: ReconcileStats::default(),
        }
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.track.options
    }

    pub fn state(&self) -> LifecycleState {
        self.track.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn pool(&self) -> &ObjectPool<S::Object> {
        &self.pool
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.track.offsets
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(ScrollEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.track.subscribers.subscribe(std::sync::Arc::new(callback) as EventCallback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.track.subscribers.unsubscribe(id)
    }

    /// Builds the offset table for `count` elements and materializes the range that starts at
    /// `start_index` (clamped).
    ///
    /// Fires `ContentCalculated` when `count > 0`.
    pub fn initialize(&mut self, count: usize, start_index: usize) -> Result<(), ScrollError> {
        self.track.ensure_not_disposed()?;
        self.track.validate_viewport()?;
        self.track.validate_sizes(count)?;
        vinfo!(count, start_index, "ListScroll::initialize");

        self.release_all();
        self.rebuild_offsets(count);
        let prewarm = self
            .track
            .options
            .prewarm
            .unwrap_or_else(|| self.max_visible_objects().min(count));
        self.pool
            .prewarm(prewarm, &mut SourceHooks(&mut self.source));

        self.track.state = LifecycleState::Initialized;
        self.track.reset_motion();
        let start_index = if count == 0 {
            0
        } else {
            if start_index >= count {
                vwarn!(start_index, count, "start index out of range, clamping");
            }
            start_index.min(count - 1)
        };
        self.track.position = self
            .track
            .start_position_for_index(start_index)
            .unwrap_or(0.0);
        self.update_visible_objects();

        if count > 0 {
            self.track.emit(ScrollEvent::ContentCalculated);
        }
        Ok(())
    }

    /// Replaces the data set with `count` elements and scrolls back to the start.
    pub fn reinitialize(&mut self, count: usize) -> Result<(), ScrollError> {
        self.track.ensure_initialized()?;
        self.track.validate_sizes(count)?;
        vdebug!(count, "ListScroll::reinitialize");

        self.release_all();
        self.rebuild_offsets(count);
        self.track.position = 0.0;
        self.track.reset_motion();
        self.update_visible_objects();

        if count > 0 {
            self.track.emit(ScrollEvent::ContentCalculated);
        }
        self.track
            .emit(ScrollEvent::ScrollRangeChanged(self.scroll_range()));
        Ok(())
    }

    /// Releases every instance and stops delivering events. Irreversible.
    pub fn dispose(&mut self) {
        if self.track.state == LifecycleState::Disposed {
            return;
        }
        vinfo!(active = self.active.len(), "ListScroll::dispose");
        self.track.subscribers.clear();
        self.active.clear();
        self.pool.dispose(&mut SourceHooks(&mut self.source));
        self.track.offsets.clear();
        self.track.range = None;
        self.track.placeholders = Placeholders::default();
        self.track.state = LifecycleState::Disposed;
    }

    fn rebuild_offsets(&mut self, count: usize) {
        let options = &self.track.options;
        let size = &options.element_size;
        self.track
            .offsets
            .rebuild(count, |i| size(i), options.spacing, options.padding.start);
    }

    fn release_all(&mut self) {
        let mut slots = ListSlots {
            pool: &mut self.pool,
            source: &mut self.source,
        };
        reconcile(&mut self.active, None, &mut slots);
        self.track.range = None;
        self.track.placeholders = Placeholders::default();
    }

    fn update_visible_objects(&mut self) {
        let range = self.track.compute_range();
        let mut slots = ListSlots {
            pool: &mut self.pool,
            source: &mut self.source,
        };
        self.last_stats = reconcile(&mut self.active, range, &mut slots);
        vtrace!(
            ?range,
            retired = self.last_stats.retired,
            created = self.last_stats.created,
            "ListScroll::update_visible_objects"
        );
        self.track.range = range;
        self.track.update_placeholders();
    }

    /// Sets the absolute scroll position (clamped to the scrollable extent).
    ///
    /// Returns `true` when the visible range changed. An unchanged range costs no pool traffic.
    pub fn set_position(&mut self, position: f32) -> bool {
        if !self.track.is_live() {
            return false;
        }
        self.track.position = self.track.clamp_position(position);
        if self.track.compute_range() == self.track.range {
            self.last_stats = ReconcileStats::default();
            return false;
        }
        self.update_visible_objects();
        self.track
            .emit(ScrollEvent::ScrollRangeChanged(self.scroll_range()));
        true
    }

    /// Sets the position from a normalized host value (`1` = top for vertical lists).
    pub fn set_normalized_position(&mut self, normalized: f32) -> bool {
        let position = self.track.position_from_normalized(normalized);
        self.set_position(position)
    }

    /// Current absolute position along the scroll axis.
    pub fn position(&self) -> f32 {
        self.track.position
    }

    pub fn normalized_position(&self) -> f32 {
        self.track.normalized_position()
    }

    /// Applies a new viewport size. The host calls this after a resize.
    pub fn set_viewport(&mut self, viewport: Extent) -> bool {
        self.track.viewport = viewport;
        if !self.track.is_live() || self.track.validate_viewport().is_err() {
            return false;
        }
        vdebug!(main = viewport.main, cross = viewport.cross, "ListScroll::set_viewport");
        let before = self.track.range;
        self.track.position = self.track.clamp_position(self.track.position);
        self.update_visible_objects();
        let changed = self.track.range != before;
        if changed {
            self.track
                .emit(ScrollEvent::ScrollRangeChanged(self.scroll_range()));
        }
        changed
    }

    /// Fires `ScrollStarted` with the current range.
    pub fn begin_drag(&mut self) {
        if self.track.is_live() {
            self.track
                .emit(ScrollEvent::ScrollStarted(self.scroll_range()));
        }
    }

    /// Feeds the host velocity; fires `ScrollEnded` once when motion comes to rest.
    pub fn update_velocity(&mut self, velocity: f32) {
        if self.track.is_live() && self.track.observe_velocity(velocity) {
            self.track
                .emit(ScrollEvent::ScrollEnded(self.scroll_range()));
        }
    }

    /// Upper bound on simultaneously visible elements, for pool sizing.
    pub fn max_visible_objects(&self) -> usize {
        let step = match self.track.offsets.min_step() {
            s if s > 0.0 => s,
            _ => self.track.options.size_of(0) + self.track.options.spacing,
        };
        if !(step > 0.0) || !(self.track.viewport.main > 0.0) {
            return 0;
        }
        ((self.track.viewport.main / step).ceil() as usize).saturating_add(1)
    }

    pub fn len(&self) -> usize {
        self.track.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track.offsets.is_empty()
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.track.range
    }

    pub fn current_start_index(&self) -> usize {
        self.track.range.map_or(0, |r| r.start_index)
    }

    pub fn current_end_index(&self) -> usize {
        self.track.range.map_or(0, |r| r.end_index)
    }

    fn scroll_range(&self) -> ScrollRange {
        self.track.range.map(ScrollRange::from).unwrap_or_default()
    }

    pub fn active_objects(&self) -> usize {
        self.active.len()
    }

    /// Materialized holders, ascending by index.
    pub fn holders(&self) -> impl ExactSizeIterator<Item = &Holder> + '_ {
        self.active.iter()
    }

    pub fn holder(&self, index: usize) -> Option<Holder> {
        let first = self.active.front()?.index;
        let holder = *self.active.get(index.checked_sub(first)?)?;
        (holder.index == index).then_some(holder)
    }

    /// The materialized object for element `index`, if any.
    pub fn object(&self, index: usize) -> Option<&S::Object> {
        self.pool.get(self.holder(index)?.handle)
    }

    pub fn object_mut(&mut self, index: usize) -> Option<&mut S::Object> {
        let handle = self.holder(index)?.handle;
        self.pool.get_mut(handle)
    }

    /// Visits every materialized object in layout order.
    pub fn for_each_active(&self, mut f: impl FnMut(usize, &S::Object)) {
        for h in &self.active {
            if let Some(object) = self.pool.get(h.handle) {
                f(h.index, object);
            }
        }
    }

    pub fn placeholders(&self) -> Placeholders {
        self.track.placeholders
    }

    /// Pool traffic of the most recent position update.
    pub fn last_reconcile(&self) -> ReconcileStats {
        self.last_stats
    }

    pub fn viewport(&self) -> Extent {
        self.track.viewport
    }

    pub fn content_extent(&self) -> f32 {
        self.track.content_extent()
    }

    pub fn scrollable_extent(&self) -> f32 {
        self.track.scrollable_extent()
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            position: self.track.position,
            start_index: self.current_start_index(),
            count: self.len(),
        }
    }

    /// Restores a snapshot. When the element count changed since capture, the snapshot's
    /// start index is used instead of its raw position.
    pub fn restore(&mut self, snapshot: ScrollSnapshot) -> bool {
        if !self.track.is_live() {
            return false;
        }
        let position = if snapshot.count == self.len() {
            snapshot.position
        } else {
            let index = snapshot.start_index.min(self.len().saturating_sub(1));
            self.track.start_position_for_index(index).unwrap_or(0.0)
        };
        self.set_position(position)
    }
}

impl<S: ObjectSource> ScrollSurface for ListScroll<S> {
    fn len(&self) -> usize {
        self.track.offsets.len()
    }

    fn axis_position(&self) -> f32 {
        self.track.position
    }

    fn scroll_end_position(&self) -> f32 {
        self.track.scroll_end_position()
    }

    fn index_at_position(&self, position: f32) -> Option<usize> {
        self.track.offsets.index_at_position(position)
    }

    fn position_for_index(&self, index: usize) -> Option<f32> {
        self.track.position_for_index(index)
    }

    fn update_axis_position(&mut self, position: f32) {
        self.set_position(position);
    }

    fn update_velocity(&mut self, velocity: f32) {
        ListScroll::update_velocity(self, velocity);
    }

    fn begin_drag(&mut self) {
        ListScroll::begin_drag(self);
    }
}

impl<S: ObjectSource> core::fmt::Debug for ListScroll<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListScroll")
            .field("state", &self.track.state)
            .field("count", &self.track.offsets.len())
            .field("position", &self.track.position)
            .field("range", &self.track.range)
            .field("placeholders", &self.track.placeholders)
            .field("active", &self.active.len())
            .finish_non_exhaustive()
    }
}
