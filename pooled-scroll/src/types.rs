#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// A size split along the scroll axis (`main`) and the axis across it (`cross`).
///
/// For a vertical list `main` is the height and `cross` the width.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub main: f32,
    pub cross: f32,
}

impl Extent {
    pub fn new(main: f32, cross: f32) -> Self {
        Self { main, cross }
    }
}

/// Padding around the laid-out content.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    /// Before the first position, along the scroll axis.
    pub start: f32,
    /// After the last position, along the scroll axis.
    pub end: f32,
    /// Total padding across the scroll axis (both sides summed).
    pub cross: f32,
}

/// Inclusive range of logical positions currently materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl VisibleRange {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        debug_assert!(start_index <= end_index);
        Self {
            start_index,
            end_index,
        }
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index <= self.end_index
    }
}

/// Inclusive element range reported to event subscribers.
///
/// For the grid variant this covers every element of the visible cells, not the cell indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl ScrollRange {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }
}

impl From<VisibleRange> for ScrollRange {
    fn from(r: VisibleRange) -> Self {
        Self::new(r.start_index, r.end_index)
    }
}

/// Sizes of the two spacers standing in for content that is not materialized.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholders {
    pub leading: f32,
    pub trailing: f32,
}

impl Placeholders {
    pub fn is_leading_active(&self) -> bool {
        self.leading > 0.0
    }

    pub fn is_trailing_active(&self) -> bool {
        self.trailing > 0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Initialized,
    Disposed,
}
