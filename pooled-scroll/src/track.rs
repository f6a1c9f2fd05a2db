use crate::events::Subscribers;
use crate::offsets::OffsetTable;
use crate::{
    Axis, Extent, LifecycleState, Placeholders, ScrollError, ScrollEvent, ScrollOptions,
    VisibleRange,
};

/// Scroll-axis state shared by the list and grid variants: the offset table over logical
/// positions, the viewport, the current position and the materialized range.
#[derive(Clone, Debug)]
pub(crate) struct Track {
    pub(crate) options: ScrollOptions,
    pub(crate) offsets: OffsetTable,
    pub(crate) viewport: Extent,
    pub(crate) position: f32,
    pub(crate) range: Option<VisibleRange>,
    pub(crate) placeholders: Placeholders,
    pub(crate) state: LifecycleState,
    pub(crate) subscribers: Subscribers,
    velocity_armed: bool,
}

impl Track {
    pub(crate) fn new(options: ScrollOptions) -> Self {
        let mut subscribers = Subscribers::default();
        if let Some(cb) = &options.on_event {
            subscribers.subscribe(cb.clone());
        }
        Self {
            viewport: options.viewport,
            options,
            offsets: OffsetTable::new(),
            position: 0.0,
            range: None,
            placeholders: Placeholders::default(),
            state: LifecycleState::Uninitialized,
            subscribers,
            velocity_armed: false,
        }
    }

    pub(crate) fn ensure_not_disposed(&self) -> Result<(), ScrollError> {
        if self.state == LifecycleState::Disposed {
            return Err(ScrollError::Disposed);
        }
        Ok(())
    }

    pub(crate) fn ensure_initialized(&self) -> Result<(), ScrollError> {
        match self.state {
            LifecycleState::Uninitialized => Err(ScrollError::NotInitialized),
            LifecycleState::Initialized => Ok(()),
            LifecycleState::Disposed => Err(ScrollError::Disposed),
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.state == LifecycleState::Initialized
    }

    pub(crate) fn validate_viewport(&self) -> Result<(), ScrollError> {
        let main = self.viewport.main;
        if !(main.is_finite() && main > 0.0) {
            return Err(ScrollError::ZeroViewport(main));
        }
        Ok(())
    }

    /// Validates element sizes for `count` elements.
    pub(crate) fn validate_sizes(&self, count: usize) -> Result<(), ScrollError> {
        for index in 0..count {
            let size = self.options.size_of(index);
            if !(size.is_finite() && size > 0.0) {
                return Err(ScrollError::InvalidElementSize { index, size });
            }
        }
        Ok(())
    }

    /// Full content extent, paddings included.
    pub(crate) fn content_extent(&self) -> f32 {
        let padding = self.options.padding;
        padding.start + self.offsets.total_extent() + padding.end
    }

    pub(crate) fn scrollable_extent(&self) -> f32 {
        (self.content_extent() - self.viewport.main).max(0.0)
    }

    pub(crate) fn clamp_position(&self, position: f32) -> f32 {
        if !position.is_finite() {
            vwarn!(position, "non-finite scroll position, using 0");
            return 0.0;
        }
        position.clamp(0.0, self.scrollable_extent())
    }

    pub(crate) fn scroll_end_position(&self) -> f32 {
        self.position + self.viewport.main
    }

    /// Visible range at the current position; `None` when the table is empty.
    pub(crate) fn compute_range(&self) -> Option<VisibleRange> {
        let start = self.offsets.index_at_position(self.position)?;
        let last = self.offsets.len() - 1;
        let end = self
            .offsets
            .index_at_position_in(self.scroll_end_position(), start, last);
        Some(VisibleRange::new(start, end))
    }

    pub(crate) fn update_placeholders(&mut self) {
        self.placeholders = match self.range {
            Some(r) => Placeholders {
                leading: self.offsets.leading_extent(r.start_index),
                trailing: self.offsets.trailing_extent(r.end_index),
            },
            None => Placeholders::default(),
        };
    }

    pub(crate) fn position_for_index(&self, index: usize) -> Option<f32> {
        self.offsets
            .position_for_index(index, self.viewport.main, self.scrollable_extent())
    }

    pub(crate) fn start_position_for_index(&self, index: usize) -> Option<f32> {
        self.offsets
            .start_position_for_index(index, self.scrollable_extent())
    }

    /// Normalized position in `[0, 1]`, following the host convention where vertical scrolls
    /// report `1` at the top.
    pub(crate) fn normalized_position(&self) -> f32 {
        let scrollable = self.scrollable_extent();
        let t = if scrollable > 0.0 {
            self.position / scrollable
        } else {
            0.0
        };
        match self.options.axis {
            Axis::Vertical => 1.0 - t,
            Axis::Horizontal => t,
        }
    }

    pub(crate) fn position_from_normalized(&self, normalized: f32) -> f32 {
        let t = match self.options.axis {
            Axis::Vertical => 1.0 - normalized,
            Axis::Horizontal => normalized,
        };
        t * self.scrollable_extent()
    }

    /// Tracks the host velocity. Returns `true` exactly once per stop: on the first zero
    /// observation after a non-zero one.
    pub(crate) fn observe_velocity(&mut self, velocity: f32) -> bool {
        if velocity != 0.0 {
            self.velocity_armed = true;
            return false;
        }
        if self.velocity_armed {
            self.velocity_armed = false;
            return true;
        }
        false
    }

    pub(crate) fn reset_motion(&mut self) {
        self.velocity_armed = false;
    }

    pub(crate) fn emit(&self, event: ScrollEvent) {
        self.subscribers.emit(event);
    }
}
