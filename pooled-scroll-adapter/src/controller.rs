use pooled_scroll::ScrollSurface;

use crate::{
    CancelToken, Easing, MoveStatus, Mover, Navigator, NavigatorOptions, SnapEvent, SnapOptions,
    Snapper,
};

/// A framework-neutral controller that wraps a scroll surface and wires the optional motion
/// capabilities onto it: a [`Mover`] always, a [`Navigator`] and a [`Snapper`] when configured.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` when the user scrolls (wheel, scrollbar)
/// - `begin_drag` / `end_drag` around pointer drags
/// - `tick(dt, velocity)` each frame
///
/// Absent capabilities are inert: navigation without a navigator returns `false`, and drags end
/// without snapping.
#[derive(Debug)]
pub struct Controller<S> {
    surface: S,
    mover: Mover,
    navigator: Option<Navigator>,
    snapper: Option<Snapper>,
    cancel: CancelToken,
}

impl<S: ScrollSurface> Controller<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            mover: Mover::new(),
            navigator: None,
            snapper: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.mover = Mover::with_easing(easing);
        self
    }

    pub fn with_navigator(mut self, options: NavigatorOptions) -> Self {
        self.navigator = Some(Navigator::new(options));
        self
    }

    pub fn with_snapper(
        mut self,
        options: SnapOptions,
        on_snap: Option<impl Fn(SnapEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.snapper = Some(Snapper::new(options).with_on_snap(on_snap));
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn navigator(&self) -> Option<&Navigator> {
        self.navigator.as_ref()
    }

    pub fn snapper(&self) -> Option<&Snapper> {
        self.snapper.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.mover.is_moving()
    }

    /// Token of the moves started from now on. Cancelling it ends the move in flight.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Cancels the move in flight; later moves get a fresh token.
    pub fn cancel_animation(&mut self) {
        self.cancel.cancel();
        self.cancel = CancelToken::new();
    }

    fn fresh_token(&mut self) -> CancelToken {
        if self.cancel.is_cancelled() {
            self.cancel = CancelToken::new();
        }
        self.cancel.clone()
    }

    /// Call this when the user scrolls without dragging. This stops any active move.
    pub fn on_scroll(&mut self, position: f32) {
        self.mover.stop_move();
        self.surface.update_axis_position(position);
    }

    pub fn begin_drag(&mut self) {
        self.surface.begin_drag();
        match self.snapper.as_mut() {
            Some(snapper) => snapper.begin_drag(&mut self.mover),
            None => self.mover.stop_move(),
        }
    }

    /// Ends a drag with the host's release velocity. Returns whether a snap started.
    pub fn end_drag(&mut self, velocity: f32) -> bool {
        let cancel = self.fresh_token();
        match self.snapper.as_mut() {
            Some(snapper) => snapper.end_drag(&self.surface, &mut self.mover, velocity, cancel),
            None => false,
        }
    }

    /// Snaps now if the velocity allows it.
    pub fn snap_to_nearest(&mut self, velocity: f32) -> bool {
        let cancel = self.fresh_token();
        match self.snapper.as_mut() {
            Some(snapper) => {
                snapper.snap_to_nearest(&self.surface, &mut self.mover, velocity, cancel)
            }
            None => false,
        }
    }

    /// Advances the controller by `dt` seconds.
    ///
    /// Forwards the host velocity to the surface, then steps the move in flight. Returns the new
    /// axis position when the move wrote one.
    ///
    /// With a snapper and no move in flight, a scroll coasting below the snap threshold starts
    /// snapping here. The host should stop its own inertia once [`Snapper::is_snapping`] is set.
    pub fn tick(&mut self, dt: f32, velocity: f32) -> Option<f32> {
        self.surface.update_velocity(velocity);
        if !self.mover.is_moving() && self.snapper.is_some() {
            let cancel = self.fresh_token();
            if let Some(snapper) = self.snapper.as_mut() {
                snapper.snap_to_nearest(&self.surface, &mut self.mover, velocity, cancel);
            }
        }
        let status = self.mover.tick(&mut self.surface, dt);
        if let Some(snapper) = self.snapper.as_mut() {
            snapper.on_move_status(status);
        }
        match status {
            MoveStatus::Running | MoveStatus::Completed => Some(self.surface.axis_position()),
            MoveStatus::Idle | MoveStatus::Stopped | MoveStatus::Cancelled => None,
        }
    }

    pub fn scroll_next(&mut self) -> bool {
        let cancel = self.fresh_token();
        match &self.navigator {
            Some(nav) => nav.next(&self.surface, &mut self.mover, cancel),
            None => false,
        }
    }

    pub fn scroll_back(&mut self) -> bool {
        let cancel = self.fresh_token();
        match &self.navigator {
            Some(nav) => nav.back(&self.surface, &mut self.mover, cancel),
            None => false,
        }
    }

    /// Jumps to `index`, animated unless `immediately`.
    pub fn scroll_to(&mut self, index: usize, immediately: bool) -> bool {
        let cancel = self.fresh_token();
        match &self.navigator {
            Some(nav) => nav.to(&mut self.surface, &mut self.mover, index, immediately, cancel),
            None => false,
        }
    }
}
