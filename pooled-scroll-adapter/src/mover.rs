use pooled_scroll::ScrollSurface;

use crate::{CancelToken, Easing, Tween};

/// Outcome of one [`Mover::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveStatus {
    /// No move in flight.
    Idle,
    /// The position was written; more ticks follow.
    Running,
    /// The target was written exactly; the move is over.
    Completed,
    /// [`Mover::stop_move`] ended the move; nothing was written this tick.
    Stopped,
    /// The move's [`CancelToken`] fired; nothing was written this tick.
    Cancelled,
}

impl MoveStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Stopped | Self::Cancelled)
    }
}

#[derive(Clone, Debug)]
struct Motion {
    tween: Tween,
    elapsed: f32,
    cancel: CancelToken,
}

/// Animates a surface's axis position toward a target, one host frame per [`Mover::tick`].
///
/// Each step first checks the stop flag and the cancel token, then writes the interpolated
/// position and advances the elapsed time. Starting a new move replaces the one in flight.
#[derive(Clone, Debug, Default)]
pub struct Mover {
    easing: Easing,
    motion: Option<Motion>,
    stopped: bool,
}

impl Mover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_easing(easing: Easing) -> Self {
        Self {
            easing,
            ..Self::default()
        }
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Target of the move in flight.
    pub fn target(&self) -> Option<f32> {
        self.motion.as_ref().map(|m| m.tween.to)
    }

    /// Starts moving from the current axis position to `target` over `duration` seconds.
    pub fn move_to<S: ScrollSurface + ?Sized>(
        &mut self,
        surface: &S,
        target: f32,
        duration: f32,
        cancel: CancelToken,
    ) {
        let from = surface.axis_position();
        if let Some(prev) = &self.motion {
            vdebug!(prev_target = prev.tween.to, target, "Mover: replacing in-flight move");
        }
        vtrace!(from, target, duration, "Mover::move_to");
        self.stopped = false;
        self.motion = Some(Motion {
            tween: Tween::new(from, target, duration, self.easing),
            elapsed: 0.0,
            cancel,
        });
    }

    /// Ends the move in flight on the next tick, leaving the position where it is.
    pub fn stop_move(&mut self) {
        if self.motion.is_some() {
            self.stopped = true;
        }
    }

    /// Advances the move by `dt` seconds.
    pub fn tick<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S, dt: f32) -> MoveStatus {
        let Some(motion) = self.motion.as_mut() else {
            return MoveStatus::Idle;
        };
        if self.stopped {
            self.stopped = false;
            self.motion = None;
            return MoveStatus::Stopped;
        }
        if motion.cancel.is_cancelled() {
            vdebug!(target = motion.tween.to, "Mover: cancelled");
            self.motion = None;
            return MoveStatus::Cancelled;
        }
        if motion.tween.is_done(motion.elapsed) {
            surface.update_axis_position(motion.tween.to);
            self.motion = None;
            return MoveStatus::Completed;
        }

        surface.update_axis_position(motion.tween.sample(motion.elapsed));
        if dt.is_finite() && dt > 0.0 {
            motion.elapsed += dt;
        }
        MoveStatus::Running
    }
}
