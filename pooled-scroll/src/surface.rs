/// Axis queries and position control shared by scrolls that move physically.
///
/// Motion helpers (movers, navigation, snapping) are written against this trait so they work
/// on lists and grids alike. Indexes are logical positions of the offset table: elements for a
/// list, cells for a grid.
pub trait ScrollSurface {
    /// Number of logical positions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current absolute position of the viewport's leading edge.
    fn axis_position(&self) -> f32;

    /// Position of the viewport's trailing edge.
    fn scroll_end_position(&self) -> f32;

    fn index_at_position(&self, position: f32) -> Option<usize>;

    /// Position that centers `index`, clamped to the scrollable extent.
    fn position_for_index(&self, index: usize) -> Option<f32>;

    /// Moves the viewport. Triggers range reconciliation when the visible range changes.
    fn update_axis_position(&mut self, position: f32);

    /// Feeds the host's current scroll velocity along the axis.
    fn update_velocity(&mut self, _velocity: f32) {}

    /// Notifies that the user started dragging.
    fn begin_drag(&mut self) {}
}
