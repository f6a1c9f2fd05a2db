/// A lightweight, serializable snapshot of a scroll's position.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so a host can
/// persist it next to its other saved state and restore the list where the user left it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSnapshot {
    /// Absolute scroll position along the axis.
    pub position: f32,
    /// First materialized logical position when the snapshot was taken.
    pub start_index: usize,
    /// Logical count at capture time; used to detect a changed data set on restore.
    pub count: usize,
}
