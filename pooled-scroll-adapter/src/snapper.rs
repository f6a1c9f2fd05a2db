use std::sync::Arc;

use pooled_scroll::ScrollSurface;

use crate::{CancelToken, MoveStatus, Mover};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapOptions {
    /// Snapping starts only when `0 < |velocity| <= velocity_threshold`.
    pub velocity_threshold: f32,
    /// Duration of the settle move, in seconds.
    pub snapping_time: f32,
    /// How far past the candidate's position the viewport must be before the snap moves on to
    /// the neighbor in the direction of motion.
    pub min_offset_for_next_step: f32,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            velocity_threshold: 200.0,
            snapping_time: 0.2,
            min_offset_for_next_step: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapEvent {
    BeforeSnapping,
    AfterSnapping,
}

pub type SnapCallback = Arc<dyn Fn(SnapEvent) + Send + Sync>;

/// Settles the scroll on the nearest position after a slow drag release.
///
/// Velocity is signed along the axis: positive means the position is increasing.
#[derive(Clone, Default)]
pub struct Snapper {
    options: SnapOptions,
    on_snap: Option<SnapCallback>,
    dragging: bool,
    snapping: bool,
}

impl Snapper {
    pub fn new(options: SnapOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn with_on_snap(
        mut self,
        on_snap: Option<impl Fn(SnapEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_snap = on_snap.map(|f| Arc::new(f) as _);
        self
    }

    pub fn options(&self) -> SnapOptions {
        self.options
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_snapping(&self) -> bool {
        self.snapping
    }

    fn emit(&self, event: SnapEvent) {
        if let Some(cb) = &self.on_snap {
            cb(event);
        }
    }

    pub fn can_snap(&self, velocity: f32) -> bool {
        !self.dragging
            && !self.snapping
            && velocity != 0.0
            && velocity.abs() <= self.options.velocity_threshold
    }

    /// A drag interrupts any snap in flight: the move is stopped and `AfterSnapping` fires now.
    pub fn begin_drag(&mut self, mover: &mut Mover) {
        self.dragging = true;
        if self.snapping {
            vdebug!("Snapper: drag began mid-snap");
            mover.stop_move();
            self.snapping = false;
            self.emit(SnapEvent::AfterSnapping);
        }
    }

    /// Ends the drag and snaps when the release velocity allows it.
    pub fn end_drag<S: ScrollSurface + ?Sized>(
        &mut self,
        surface: &S,
        mover: &mut Mover,
        velocity: f32,
        cancel: CancelToken,
    ) -> bool {
        self.dragging = false;
        self.snap_to_nearest(surface, mover, velocity, cancel)
    }

    /// Position the scroll would settle on for the given release velocity.
    pub fn target<S: ScrollSurface + ?Sized>(&self, surface: &S, velocity: f32) -> Option<f32> {
        let axis = surface.axis_position();
        let middle = axis + (surface.scroll_end_position() - axis) / 2.0;
        let index = surface.index_at_position(middle)?;
        let position = surface.position_for_index(index)?;

        let min_offset = self.options.min_offset_for_next_step;
        let neighbor = if velocity > 0.0 && axis - min_offset > position {
            index.checked_add(1).filter(|&i| i < surface.len())
        } else if velocity < 0.0 && axis + min_offset < position {
            index.checked_sub(1)
        } else {
            None
        };
        Some(
            neighbor
                .and_then(|i| surface.position_for_index(i))
                .unwrap_or(position),
        )
    }

    /// Starts the settle move if snapping is allowed. Returns whether a snap started.
    pub fn snap_to_nearest<S: ScrollSurface + ?Sized>(
        &mut self,
        surface: &S,
        mover: &mut Mover,
        velocity: f32,
        cancel: CancelToken,
    ) -> bool {
        if !self.can_snap(velocity) {
            return false;
        }
        let Some(position) = self.target(surface, velocity) else {
            return false;
        };
        vtrace!(velocity, position, "Snapper: snapping");
        self.emit(SnapEvent::BeforeSnapping);
        self.snapping = true;
        mover.move_to(surface, position, self.options.snapping_time, cancel);
        true
    }

    /// Feeds the mover's status back; a finished move ends the snap.
    pub fn on_move_status(&mut self, status: MoveStatus) {
        if self.snapping && status.is_finished() {
            self.snapping = false;
            self.emit(SnapEvent::AfterSnapping);
        }
    }
}

impl core::fmt::Debug for Snapper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Snapper")
            .field("options", &self.options)
            .field("dragging", &self.dragging)
            .field("snapping", &self.snapping)
            .finish_non_exhaustive()
    }
}
