/// One logical position of the offset table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetEntry {
    /// Step of this position: element size plus the spacing before it (none for index 0).
    pub size: f32,
    /// Cumulative offset of the end of this position, excluding `padding_start`.
    pub offset: f32,
}

/// Cumulative size table over logical positions (elements, or cells for grids).
///
/// `offset[i] = offset[i - 1] + size[i]`, with spacing folded into `size` for every index but the
/// first. Sizes are validated positive by the scroll types, so offsets are strictly increasing.
#[derive(Clone, Debug, Default)]
pub struct OffsetTable {
    entries: Vec<OffsetEntry>,
    spacing: f32,
    padding_start: f32,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(
        count: usize,
        size_fn: impl FnMut(usize) -> f32,
        spacing: f32,
        padding_start: f32,
    ) -> Self {
        let mut table = Self::new();
        table.rebuild(count, size_fn, spacing, padding_start);
        table
    }

    /// Rebuilds the table in place, keeping the allocation.
    pub fn rebuild(
        &mut self,
        count: usize,
        mut size_fn: impl FnMut(usize) -> f32,
        spacing: f32,
        padding_start: f32,
    ) {
        self.entries.clear();
        self.entries.reserve_exact(count);
        self.spacing = spacing;
        self.padding_start = padding_start;

        let mut offset = 0f32;
        for i in 0..count {
            let size = size_fn(i) + if i == 0 { 0.0 } else { spacing };
            offset += size;
            self.entries.push(OffsetEntry { size, offset });
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[OffsetEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<OffsetEntry> {
        self.entries.get(index).copied()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn padding_start(&self) -> f32 {
        self.padding_start
    }

    /// Sum of every position's step (no padding).
    pub fn total_extent(&self) -> f32 {
        self.entries.last().map_or(0.0, |e| e.offset)
    }

    /// Smallest step in the table, or `0.0` when empty.
    pub fn min_step(&self) -> f32 {
        let mut min = f32::INFINITY;
        for (i, e) in self.entries.iter().enumerate() {
            // index 0 carries no spacing; compare on equal footing
            let step = if i == 0 { e.size + self.spacing } else { e.size };
            min = min.min(step);
        }
        if min.is_finite() { min } else { 0.0 }
    }

    /// Extent of every position before `index`.
    pub fn leading_extent(&self, index: usize) -> f32 {
        self.entries
            .get(index)
            .map_or(0.0, |e| e.offset - e.size)
    }

    /// Extent of every position after `index`.
    pub fn trailing_extent(&self, index: usize) -> f32 {
        self.entries
            .get(index)
            .map_or(0.0, |e| self.total_extent() - e.offset)
    }

    /// Size of the element itself, without the spacing folded into its step.
    pub fn element_size(&self, index: usize) -> Option<f32> {
        let e = self.entries.get(index)?;
        Some(if index == 0 { e.size } else { e.size - self.spacing })
    }

    /// Absolute start of the element in content space (includes `padding_start`).
    pub fn element_start(&self, index: usize) -> Option<f32> {
        let e = self.entries.get(index)?;
        let size = self.element_size(index)?;
        Some(self.padding_start + e.offset - size)
    }

    /// Maps a content position to the first position whose end reaches it.
    ///
    /// Returns the smallest index with `offset + padding_start >= position`. Positions past the
    /// end collapse to the last index. `None` only when the table is empty.
    pub fn index_at_position(&self, position: f32) -> Option<usize> {
        let last = self.entries.len().checked_sub(1)?;
        Some(self.index_at_position_in(position, 0, last))
    }

    /// Same as [`Self::index_at_position`], restricted to the inclusive window `[lo, hi]`.
    ///
    /// When the window collapses, the search returns `lo`.
    pub fn index_at_position_in(&self, position: f32, mut lo: usize, mut hi: usize) -> usize {
        let Some(last) = self.entries.len().checked_sub(1) else {
            return lo;
        };
        hi = hi.min(last);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.entries[mid].offset + self.padding_start >= position {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        lo
    }

    /// Scroll position that centers `index` in a viewport of `viewport_extent`, clamped into
    /// `[0, scrollable_extent]`.
    pub fn position_for_index(
        &self,
        index: usize,
        viewport_extent: f32,
        scrollable_extent: f32,
    ) -> Option<f32> {
        let start = self.element_start(index)?;
        let size = self.element_size(index)?;
        let pos = start + size / 2.0 - viewport_extent / 2.0;
        Some(pos.clamp(0.0, scrollable_extent.max(0.0)))
    }

    /// Scroll position that puts `index` at the leading edge, clamped into
    /// `[0, scrollable_extent]`.
    pub fn start_position_for_index(&self, index: usize, scrollable_extent: f32) -> Option<f32> {
        let start = self.element_start(index)?;
        let start = if index == 0 { 0.0 } else { start };
        Some(start.clamp(0.0, scrollable_extent.max(0.0)))
    }
}
