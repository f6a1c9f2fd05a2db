use pooled_scroll::ScrollSurface;

use crate::{CancelToken, Mover};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigatorOptions {
    /// Positions skipped past the viewport edge per step.
    pub stride: usize,
    /// Duration of a navigation move, in seconds.
    pub moving_time: f32,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            stride: 2,
            moving_time: 0.3,
        }
    }
}

/// Page-wise navigation: computes a target index from the viewport edges and hands the move to
/// a [`Mover`].
#[derive(Clone, Debug, Default)]
pub struct Navigator {
    options: NavigatorOptions,
}

impl Navigator {
    pub fn new(options: NavigatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> NavigatorOptions {
        self.options
    }

    /// Index `stride` past the one at the trailing edge, if it exists.
    pub fn next_index<S: ScrollSurface + ?Sized>(&self, surface: &S) -> Option<usize> {
        let edge = surface.index_at_position(surface.scroll_end_position())?;
        let index = edge.checked_add(self.options.stride)?;
        (index < surface.len()).then_some(index)
    }

    /// Index `stride` before the one at the leading edge, if it exists.
    pub fn back_index<S: ScrollSurface + ?Sized>(&self, surface: &S) -> Option<usize> {
        let edge = surface.index_at_position(surface.axis_position())?;
        edge.checked_sub(self.options.stride)
    }

    /// Starts a move toward [`Self::next_index`]. Returns `false` (and leaves everything as is)
    /// at the end of the content.
    pub fn next<S: ScrollSurface + ?Sized>(
        &self,
        surface: &S,
        mover: &mut Mover,
        cancel: CancelToken,
    ) -> bool {
        match self.next_index(surface) {
            Some(index) => self.move_to_index(surface, mover, index, cancel),
            None => {
                vdebug!("Navigator::next: already at the end");
                false
            }
        }
    }

    pub fn back<S: ScrollSurface + ?Sized>(
        &self,
        surface: &S,
        mover: &mut Mover,
        cancel: CancelToken,
    ) -> bool {
        match self.back_index(surface) {
            Some(index) => self.move_to_index(surface, mover, index, cancel),
            None => {
                vdebug!("Navigator::back: already at the start");
                false
            }
        }
    }

    /// Jumps to `index`: animated through the mover, or applied at once when `immediately`.
    pub fn to<S: ScrollSurface + ?Sized>(
        &self,
        surface: &mut S,
        mover: &mut Mover,
        index: usize,
        immediately: bool,
        cancel: CancelToken,
    ) -> bool {
        if !immediately {
            return self.move_to_index(surface, mover, index, cancel);
        }
        let Some(position) = surface.position_for_index(index) else {
            return false;
        };
        mover.stop_move();
        surface.update_axis_position(position);
        true
    }

    fn move_to_index<S: ScrollSurface + ?Sized>(
        &self,
        surface: &S,
        mover: &mut Mover,
        index: usize,
        cancel: CancelToken,
    ) -> bool {
        let Some(position) = surface.position_for_index(index) else {
            vwarn!(index, len = surface.len(), "Navigator: index out of range");
            return false;
        };
        vtrace!(index, position, "Navigator: moving");
        mover.move_to(surface, position, self.options.moving_time, cancel);
        true
    }
}
