use crate::Extent;
use crate::pool::PoolListener;

/// Host-side factory and binder for the visual instances shown by a scroll.
///
/// The scroll never touches a UI toolkit directly: it asks the source to create instances,
/// rebinds them to logical indexes, and toggles them when they enter or leave the pool.
pub trait ObjectSource {
    type Object;

    /// Instantiates a new visual. It is activated separately before first use.
    fn create(&mut self) -> Self::Object;

    /// Fills `object` with the content of logical element `index`.
    fn bind(&mut self, index: usize, object: &mut Self::Object);

    /// Called when an instance leaves the pool (show it, attach it to the content).
    fn activate(&mut self, _object: &mut Self::Object) {}

    /// Called when an instance returns to the pool (hide it, park it).
    fn deactivate(&mut self, _object: &mut Self::Object) {}

    /// Called once per instance when the scroll is disposed.
    fn destroy(&mut self, _object: Self::Object) {}
}

/// Geometry handed to the host when a grid cell is created.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellLayout {
    /// Number of elements the cell lays out across the scroll axis.
    pub capacity: usize,
    pub size: Extent,
    /// Spacing between children inside the cell.
    pub spacing: f32,
}

/// Host-side factory for the grid's row/column containers.
pub trait CellSource<O> {
    type Cell;

    fn create_cell(&mut self, layout: CellLayout) -> Self::Cell;

    /// Reparents `child` into `cell`, after the children already attached.
    fn attach(&mut self, cell: &mut Self::Cell, child: &mut O);

    fn activate_cell(&mut self, _cell: &mut Self::Cell) {}

    fn deactivate_cell(&mut self, _cell: &mut Self::Cell) {}

    fn destroy_cell(&mut self, _cell: Self::Cell) {}
}

/// Outcome of a screen transition callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transition {
    /// The transition is over; the previous screen can be recycled right away.
    #[default]
    Finished,
    /// The host is still animating; it calls `finish_transition` when done.
    Running,
}

/// Transition hooks of [`crate::ScreenScroll`].
pub trait ScreenCallbacks<O> {
    fn on_open(&mut self, _active: &mut O) {}

    fn on_move(&mut self, _to_next: bool, _active: &mut O, _next: &mut O) -> Transition {
        Transition::Finished
    }

    fn on_cant_move(&mut self, _to_next: bool, _active: &mut O) {}
}

/// Adapts an [`ObjectSource`] to the pool's lifecycle hooks.
pub(crate) struct SourceHooks<'a, S>(pub(crate) &'a mut S);

impl<S: ObjectSource> PoolListener<S::Object> for SourceHooks<'_, S> {
    fn on_create(&mut self) -> S::Object {
        self.0.create()
    }

    fn on_acquire(&mut self, item: &mut S::Object) {
        self.0.activate(item);
    }

    fn on_release(&mut self, item: &mut S::Object) {
        self.0.deactivate(item);
    }

    fn on_dispose(&mut self, item: S::Object) {
        self.0.destroy(item);
    }
}
