use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::host::{CellLayout, CellSource, ObjectSource, SourceHooks};
use crate::offsets::OffsetTable;
use crate::pool::{ObjectPool, PoolListener};
use crate::reconcile::{Holder, Materializer, ReconcileStats, reconcile};
use crate::track::Track;
use crate::{
    EventCallback, Extent, LifecycleState, Placeholders, ScrollError, ScrollEvent, ScrollOptions,
    ScrollRange, ScrollSnapshot, ScrollSurface, SubscriptionId, VisibleRange,
};

/// A pooled row (vertical grid) or column (horizontal grid) of elements.
#[derive(Debug)]
pub struct ScrollCell<V> {
    visual: V,
    children: Vec<Holder>,
}

impl<V> ScrollCell<V> {
    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    /// Child holders in layout order. The tail cell of a grid may hold fewer than its capacity.
    pub fn children(&self) -> &[Holder] {
        &self.children
    }
}

struct CellHooks<'a, O, C> {
    source: &'a mut C,
    layout: CellLayout,
    _object: PhantomData<fn(&mut O)>,
}

impl<'a, O, C> CellHooks<'a, O, C> {
    fn new(source: &'a mut C, layout: CellLayout) -> Self {
        Self {
            source,
            layout,
            _object: PhantomData,
        }
    }
}

impl<O, C: CellSource<O>> PoolListener<ScrollCell<C::Cell>> for CellHooks<'_, O, C> {
    fn on_create(&mut self) -> ScrollCell<C::Cell> {
        ScrollCell {
            visual: self.source.create_cell(self.layout),
            children: Vec::with_capacity(self.layout.capacity),
        }
    }

    fn on_acquire(&mut self, cell: &mut ScrollCell<C::Cell>) {
        self.source.activate_cell(&mut cell.visual);
    }

    fn on_release(&mut self, cell: &mut ScrollCell<C::Cell>) {
        self.source.deactivate_cell(&mut cell.visual);
    }

    fn on_dispose(&mut self, cell: ScrollCell<C::Cell>) {
        self.source.destroy_cell(cell.visual);
    }
}

struct GridSlots<'a, S: ObjectSource, C: CellSource<S::Object>> {
    objects: &'a mut ObjectPool<S::Object>,
    cells: &'a mut ObjectPool<ScrollCell<C::Cell>>,
    source: &'a mut S,
    cell_source: &'a mut C,
    layout: CellLayout,
    count: usize,
}

impl<S: ObjectSource, C: CellSource<S::Object>> Materializer for GridSlots<'_, S, C> {
    type Item = Holder;

    fn retire(&mut self, holder: Holder) {
        if let Some(cell) = self.cells.get_mut(holder.handle) {
            for child in cell.children.drain(..) {
                self.objects
                    .release(child.handle, &mut SourceHooks(&mut *self.source));
            }
        }
        let mut hooks = CellHooks::<S::Object, C>::new(&mut *self.cell_source, self.layout);
        self.cells.release(holder.handle, &mut hooks);
    }

    fn create(&mut self, index: usize) -> Option<Holder> {
        let mut hooks = CellHooks::<S::Object, C>::new(&mut *self.cell_source, self.layout);
        let handle = self.cells.acquire(&mut hooks)?;
        let cell = self.cells.get_mut(handle)?;

        let first = index * self.layout.capacity;
        let last = (first + self.layout.capacity).min(self.count);
        for element in first..last {
            let Some(child) = self.objects.acquire(&mut SourceHooks(&mut *self.source)) else {
                vwarn!(cell = index, element, "object pool exhausted while filling a cell");
                break;
            };
            if let Some(object) = self.objects.get_mut(child) {
                self.source.bind(element, object);
                self.cell_source.attach(&mut cell.visual, object);
            }
            cell.children.push(Holder {
                index: element,
                handle: child,
            });
        }
        Some(Holder { index, handle })
    }
}

/// A virtualized grid: elements are batched into cells laid out across the scroll axis, and
/// cells are virtualized along it exactly like the elements of a [`crate::ListScroll`].
///
/// Offsets, placeholders and [`ScrollSurface`] indexes are per cell; events report the element
/// range covered by the visible cells.
pub struct GridScroll<S: ObjectSource, C: CellSource<S::Object>> {
    track: Track,
    source: S,
    cell_source: C,
    objects: ObjectPool<S::Object>,
    cells: ObjectPool<ScrollCell<C::Cell>>,
    active: VecDeque<Holder>,
    layout: CellLayout,
    count: usize,
    last_stats: ReconcileStats,
}

impl<S: ObjectSource, C: CellSource<S::Object>> GridScroll<S, C> {
    pub fn new(options: ScrollOptions, source: S, cell_source: C) -> Self {
        let objects = ObjectPool::new(options.max_pool_size);
        let track = Track::new(options);
        let layout = Self::layout_for(
            &track.options,
            Self::compute_capacity(&track),
            track.options.size_of(0),
        );
        Self {
            track,
            source,
            cell_source,
            objects,
            cells: ObjectPool::new(None),
            active: VecDeque::new(),
            layout,
            count: 0,
            last_stats: ReconcileStats::default(),
        }
    }

    fn validate_cross_size(&self) -> Result<(), ScrollError> {
        let cross = self.track.options.cross_size;
        if !(cross.is_finite() && cross > 0.0) {
            return Err(ScrollError::InvalidCrossSize(cross));
        }
        Ok(())
    }

    /// `max(1, floor((viewport_cross - cross_padding) / (cross_size + cell_spacing)))`.
    fn compute_capacity(track: &Track) -> usize {
        let options = &track.options;
        let available = track.viewport.cross - options.padding.cross;
        let fit = available / (options.cross_size + options.cell_spacing);
        if fit.is_finite() && fit >= 1.0 {
            fit.floor() as usize
        } else {
            1
        }
    }

    fn layout_for(options: &ScrollOptions, capacity: usize, main: f32) -> CellLayout {
        let step = options.cross_size + options.cell_spacing;
        let cross = capacity as f32 * step - options.cell_spacing;
        CellLayout {
            capacity,
            size: Extent::new(main, cross),
            spacing: options.cell_spacing,
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

    pub fn cell_source(&self) -> &C {
        &self.cell_source
    }

    pub fn pool(&self) -> &ObjectPool<S::Object> {
        &self.objects
    }

    pub fn cell_pool(&self) -> &ObjectPool<ScrollCell<C::Cell>> {
        &self.cells
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.track.offsets
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(ScrollEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.track.subscribers.subscribe(Arc::new(callback) as EventCallback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.track.subscribers.unsubscribe(id)
    }

    /// Elements laid out per cell.
    pub fn objects_in_cell(&self) -> usize {
        self.layout.capacity
    }

    pub fn cell_layout(&self) -> CellLayout {
        self.layout
    }

    /// Number of cells (`ceil(count / objects_in_cell)`).
    pub fn cell_count(&self) -> usize {
        self.track.offsets.len()
    }

    /// Builds the cell table for `count` elements and materializes the cells around the one
    /// holding element `start_index` (clamped).
    pub fn initialize(&mut self, count: usize, start_index: usize) -> Result<(), ScrollError> {
        self.track.ensure_not_disposed()?;
        self.track.validate_viewport()?;
        self.validate_cross_size()?;
        self.track.validate_sizes(count)?;
        vinfo!(count, start_index, "GridScroll::initialize");

        self.release_all();
        self.count = count;
        self.rebuild_layout();
        let prewarm = self
            .track
            .options
            .prewarm
            .unwrap_or_else(|| self.max_visible_objects().min(count));
        self.objects
            .prewarm(prewarm, &mut SourceHooks(&mut self.source));

        self.track.state = LifecycleState::Initialized;
        self.track.reset_motion();
        let start_cell = start_index.min(count.saturating_sub(1)) / self.layout.capacity;
        self.track.position = self
            .track
            .start_position_for_index(start_cell)
            .unwrap_or(0.0);
        self.update_visible_objects();

        if count > 0 {
            self.track.emit(ScrollEvent::ContentCalculated);
        }
        Ok(())
    }

    pub fn reinitialize(&mut self, count: usize) -> Result<(), ScrollError> {
        self.track.ensure_initialized()?;
        self.track.validate_sizes(count)?;
        vdebug!(count, "GridScroll::reinitialize");

        self.release_all();
        self.count = count;
        self.rebuild_layout();
        self.track.position = 0.0;
        self.track.reset_motion();
        self.update_visible_objects();

        if count > 0 {
            self.track.emit(ScrollEvent::ContentCalculated);
        }
        self.track
            .emit(ScrollEvent::ScrollRangeChanged(self.element_range()));
        Ok(())
    }

    pub fn dispose(&mut self) {
        if self.track.state == LifecycleState::Disposed {
            return;
        }
        vinfo!(cells = self.active.len(), "GridScroll::dispose");
        self.track.subscribers.clear();
        self.active.clear();
        self.objects.dispose(&mut SourceHooks(&mut self.source));
        let mut hooks = CellHooks::<S::Object, C>::new(&mut self.cell_source, self.layout);
        self.cells.dispose(&mut hooks);
        self.track.offsets.clear();
        self.track.range = None;
        self.track.placeholders = Placeholders::default();
        self.track.state = LifecycleState::Disposed;
    }

    /// Recomputes cell capacity and rebuilds the per-cell offset table.
    fn rebuild_layout(&mut self) {
        let capacity = Self::compute_capacity(&self.track);
        let count = self.count;
        let options = &self.track.options;
        let size = &options.element_size;
        self.track.offsets.rebuild(
            count.div_ceil(capacity),
            |c| {
                let first = c * capacity;
                (first..(first + capacity).min(count))
                    .map(|e| size(e))
                    .fold(0f32, f32::max)
            },
            options.spacing,
            options.padding.start,
        );

        let main = self
            .max_cell_extent()
            .unwrap_or_else(|| self.track.options.size_of(0));
        let layout = Self::layout_for(&self.track.options, capacity, main);
        if layout != self.layout {
            vdebug!(capacity, main, "GridScroll: cell layout changed");
            // idle cells were created for the old layout
            let old_layout = self.layout;
            let mut stale = std::mem::replace(&mut self.cells, ObjectPool::new(None));
            let mut hooks = CellHooks::<S::Object, C>::new(&mut self.cell_source, old_layout);
            stale.dispose(&mut hooks);
            self.layout = layout;
        }
    }

    fn max_cell_extent(&self) -> Option<f32> {
        let offsets = &self.track.offsets;
        (0..offsets.len())
            .filter_map(|c| offsets.element_size(c))
            .reduce(f32::max)
    }

    fn slots(&mut self) -> GridSlots<'_, S, C> {
        GridSlots {
            objects: &mut self.objects,
            cells: &mut self.cells,
            source: &mut self.source,
            cell_source: &mut self.cell_source,
            layout: self.layout,
            count: self.count,
        }
    }

    fn release_all(&mut self) {
        let mut active = std::mem::take(&mut self.active);
        reconcile(&mut active, None, &mut self.slots());
        self.active = active;
        self.track.range = None;
        self.track.placeholders = Placeholders::default();
    }

    fn update_visible_objects(&mut self) {
        let range = self.track.compute_range();
        let mut active = std::mem::take(&mut self.active);
        let stats = reconcile(&mut active, range, &mut self.slots());
        self.active = active;
        self.last_stats = stats;
        vtrace!(
            ?range,
            retired = self.last_stats.retired,
            created = self.last_stats.created,
            "GridScroll::update_visible_objects"
        );
        self.track.range = range;
        self.track.update_placeholders();
    }

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
            .emit(ScrollEvent::ScrollRangeChanged(self.element_range()));
        true
    }

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

    /// Applies a new viewport size. A cross-axis change that alters the cell capacity rebuilds
    /// every cell.
    pub fn set_viewport(&mut self, viewport: Extent) -> bool {
        self.track.viewport = viewport;
        if !self.track.is_live() || self.track.validate_viewport().is_err() {
            return false;
        }
        vdebug!(main = viewport.main, cross = viewport.cross, "GridScroll::set_viewport");
        let before = self.element_range();
        if Self::compute_capacity(&self.track) != self.layout.capacity {
            let start_element = self.current_start_index() * self.layout.capacity;
            self.release_all();
            self.rebuild_layout();
            let start_cell = start_element / self.layout.capacity;
            self.track.position = self
                .track
                .start_position_for_index(start_cell)
                .unwrap_or(0.0);
        }
        self.track.position = self.track.clamp_position(self.track.position);
        self.update_visible_objects();
        let changed = self.element_range() != before;
        if changed {
            self.track
                .emit(ScrollEvent::ScrollRangeChanged(self.element_range()));
        }
        changed
    }

    pub fn begin_drag(&mut self) {
        if self.track.is_live() {
            self.track
                .emit(ScrollEvent::ScrollStarted(self.element_range()));
        }
    }

    pub fn update_velocity(&mut self, velocity: f32) {
        if self.track.is_live() && self.track.observe_velocity(velocity) {
            self.track
                .emit(ScrollEvent::ScrollEnded(self.element_range()));
        }
    }

    /// Upper bound on simultaneously visible elements, for pool sizing.
    pub fn max_visible_objects(&self) -> usize {
        let step = match self.track.offsets.min_step() {
            s if s > 0.0 => s,
            _ => self.layout.size.main + self.track.options.spacing,
        };
        if !(step > 0.0) || !(self.track.viewport.main > 0.0) {
            return 0;
        }
        ((self.track.viewport.main / step).ceil() as usize)
            .saturating_add(1)
            .saturating_mul(self.layout.capacity)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Visible cell range.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.track.range
    }

    /// First visible cell.
    pub fn current_start_index(&self) -> usize {
        self.track.range.map_or(0, |r| r.start_index)
    }

    /// Last visible cell.
    pub fn current_end_index(&self) -> usize {
        self.track.range.map_or(0, |r| r.end_index)
    }

    /// Element range covered by the visible cells.
    pub fn element_range(&self) -> ScrollRange {
        let Some(range) = self.track.range else {
            return ScrollRange::default();
        };
        let n = self.layout.capacity;
        let end = ((range.end_index + 1) * n).min(self.count);
        ScrollRange::new(range.start_index * n, end.saturating_sub(1))
    }

    /// Materialized elements across all active cells.
    pub fn active_objects(&self) -> usize {
        self.active
            .iter()
            .filter_map(|h| self.cells.get(h.handle))
            .map(|cell| cell.children.len())
            .sum()
    }

    pub fn active_cells(&self) -> usize {
        self.active.len()
    }

    /// Active cells in layout order, paired with their cell index.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &ScrollCell<C::Cell>)> + '_ {
        self.active
            .iter()
            .filter_map(|h| self.cells.get(h.handle).map(|cell| (h.index, cell)))
    }

    pub fn cell(&self, cell_index: usize) -> Option<&ScrollCell<C::Cell>> {
        let first = self.active.front()?.index;
        let holder = self.active.get(cell_index.checked_sub(first)?)?;
        if holder.index != cell_index {
            return None;
        }
        self.cells.get(holder.handle)
    }

    /// The materialized object for element `index`, if any.
    pub fn object(&self, index: usize) -> Option<&S::Object> {
        let cell = self.cell(index / self.layout.capacity)?;
        let child = cell.children.get(index % self.layout.capacity)?;
        self.objects.get(child.handle)
    }

    pub fn for_each_active(&self, mut f: impl FnMut(usize, &S::Object)) {
        for (_, cell) in self.cells() {
            for child in &cell.children {
                if let Some(object) = self.objects.get(child.handle) {
                    f(child.index, object);
                }
            }
        }
    }

    pub fn placeholders(&self) -> Placeholders {
        self.track.placeholders
    }

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

    /// Captures the position; `start_index` is the first visible element.
    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            position: self.track.position,
            start_index: self.element_range().start_index,
            count: self.count,
        }
    }

    pub fn restore(&mut self, snapshot: ScrollSnapshot) -> bool {
        if !self.track.is_live() {
            return false;
        }
        let position = if snapshot.count == self.count {
            snapshot.position
        } else {
            let element = snapshot.start_index.min(self.count.saturating_sub(1));
            self.track
                .start_position_for_index(element / self.layout.capacity)
                .unwrap_or(0.0)
        };
        self.set_position(position)
    }
}

impl<S: ObjectSource, C: CellSource<S::Object>> ScrollSurface for GridScroll<S, C> {
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
        GridScroll::update_velocity(self, velocity);
    }

    fn begin_drag(&mut self) {
        GridScroll::begin_drag(self);
    }
}

impl<S: ObjectSource, C: CellSource<S::Object>> core::fmt::Debug for GridScroll<S, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridScroll")
            .field("state", &self.track.state)
            .field("count", &self.count)
            .field("layout", &self.layout)
            .field("position", &self.track.position)
            .field("range", &self.track.range)
            .field("placeholders", &self.track.placeholders)
            .field("active_cells", &self.active.len())
            .finish_non_exhaustive()
    }
}
