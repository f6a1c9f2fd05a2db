use std::sync::Arc;

use crate::{Axis, EventCallback, Extent, Padding, ScrollEvent};

/// Per-element size along the scroll axis.
pub type SizeFn = Arc<dyn Fn(usize) -> f32 + Send + Sync>;

/// Configuration shared by [`crate::ListScroll`] and [`crate::GridScroll`].
///
/// Cheap to clone: the size function and callback live in `Arc`s.
pub struct ScrollOptions {
    pub axis: Axis,

    /// Element size along the scroll axis (e.g. row height for vertical lists).
    pub element_size: SizeFn,

    /// Space between consecutive positions along the scroll axis.
    pub spacing: f32,

    pub padding: Padding,

    /// The viewport size. `main` must be positive when initializing.
    pub viewport: Extent,

    /// Upper bound on constructed element instances. `None` means unbounded.
    pub max_pool_size: Option<usize>,

    /// Number of element instances created up front. `None` derives it from
    /// `max_visible_objects()` at initialization.
    pub prewarm: Option<usize>,

    /// Grid only: element size across the scroll axis.
    pub cross_size: f32,

    /// Grid only: spacing between elements inside a cell.
    pub cell_spacing: f32,

    /// Optional subscriber registered on construction.
    pub on_event: Option<EventCallback>,
}

impl Clone for ScrollOptions {
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            element_size: Arc::clone(&self.element_size),
            spacing: self.spacing,
            padding: self.padding,
            viewport: self.viewport,
            max_pool_size: self.max_pool_size,
            prewarm: self.prewarm,
            cross_size: self.cross_size,
            cell_spacing: self.cell_spacing,
            on_event: self.on_event.clone(),
        }
    }
}

impl ScrollOptions {
    /// Creates options for uniformly sized elements.
    pub fn new(element_size: f32) -> Self {
        Self::with_size_fn(move |_| element_size)
    }

    /// Creates options where `element_size(i)` gives each element's size along the scroll axis.
    pub fn with_size_fn(element_size: impl Fn(usize) -> f32 + Send + Sync + 'static) -> Self {
        Self {
            axis: Axis::Vertical,
            element_size: Arc::new(element_size),
            spacing: 0.0,
            padding: Padding::default(),
            viewport: Extent::default(),
            max_pool_size: None,
            prewarm: None,
            cross_size: 0.0,
            cell_spacing: 0.0,
            on_event: None,
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_padding(mut self, start: f32, end: f32) -> Self {
        self.padding.start = start;
        self.padding.end = end;
        self
    }

    pub fn with_cross_padding(mut self, cross: f32) -> Self {
        self.padding.cross = cross;
        self
    }

    pub fn with_viewport(mut self, viewport: Extent) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_max_pool_size(mut self, max_pool_size: Option<usize>) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    pub fn with_prewarm(mut self, prewarm: Option<usize>) -> Self {
        self.prewarm = prewarm;
        self
    }

    /// Sets the grid cell geometry: element size across the scroll axis and spacing inside a
    /// cell.
    pub fn with_cell(mut self, cross_size: f32, cell_spacing: f32) -> Self {
        self.cross_size = cross_size;
        self.cell_spacing = cell_spacing;
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: Option<impl Fn(ScrollEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn size_of(&self, index: usize) -> f32 {
        (self.element_size)(index)
    }
}

impl core::fmt::Debug for ScrollOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollOptions")
            .field("axis", &self.axis)
            .field("spacing", &self.spacing)
            .field("padding", &self.padding)
            .field("viewport", &self.viewport)
            .field("max_pool_size", &self.max_pool_size)
            .field("prewarm", &self.prewarm)
            .field("cross_size", &self.cross_size)
            .field("cell_spacing", &self.cell_spacing)
            .finish_non_exhaustive()
    }
}
