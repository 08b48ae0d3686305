//! Vertical spans and the pillars that hold them.

/// Walkability classification of a span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaId(pub u32);

impl AreaId {
    /// Reserved id for surfaces that cannot be walked on.
    pub const NOT_WALKABLE: Self = Self(0);
    /// Id given to plain walkable ground.
    pub const WALKABLE: Self = Self(63);

    pub fn is_walkable(self) -> bool {
        self != Self::NOT_WALKABLE
    }
}

/// A contiguous run of occupied cells in one column, `min_y..=max_y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelHeightSpan {
    min_y: u32,
    max_y: u32,
    area: AreaId,
}

impl VoxelHeightSpan {
    pub fn new(min_y: u32, max_y: u32, area: AreaId) -> Self {
        debug_assert!(min_y <= max_y, "inverted span {min_y}..={max_y}");
        Self { min_y, max_y, area }
    }

    pub fn min_y(&self) -> u32 {
        self.min_y
    }

    /// Inclusive.
    pub fn max_y(&self) -> u32 {
        self.max_y
    }

    pub fn area(&self) -> AreaId {
        self.area
    }

    pub fn bottom_y(&self) -> u32 {
        self.min_y
    }

    pub fn top_y(&self) -> u32 {
        self.max_y
    }

    /// Number of cells covered, saturating at `u32::MAX`.
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).saturating_add(1)
    }

    /// Number of empty cells between two disjoint spans, `None` if they overlap.
    fn gap_to(&self, other: &Self) -> Option<u32> {
        if other.min_y > self.max_y {
            Some(other.min_y - self.max_y - 1)
        } else if self.min_y > other.max_y {
            Some(self.min_y - other.max_y - 1)
        } else {
            None
        }
    }

    fn mergeable(&self, other: &Self, threshold: u32) -> bool {
        self.gap_to(other).map_or(true, |gap| gap <= threshold)
    }

    /// Union of both ranges. The area follows the top surface: when the tops
    /// are within `threshold` cells of each other the larger id wins.
    fn merged(&self, other: &Self, threshold: u32) -> Self {
        let area = if self.max_y.abs_diff(other.max_y) <= threshold {
            self.area.max(other.area)
        } else if self.max_y > other.max_y {
            self.area
        } else {
            other.area
        };
        Self {
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
            area,
        }
    }
}

/// How a pillar treats a span that touches spans it already holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpanMergePolicy {
    /// Append every span as-is, in insertion order. Spans of one pillar may
    /// overlap and the merge threshold is ignored.
    #[default]
    Append,
    /// Keep spans sorted by `min_y` and pairwise disjoint: a new span absorbs
    /// every span that overlaps it or lies within the merge threshold.
    Merge,
}

/// One (x, z) column of the field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pillar {
    spans: Vec<VoxelHeightSpan>,
}

impl Pillar {
    pub fn spans(&self) -> &[VoxelHeightSpan] {
        &self.spans
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VoxelHeightSpan> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.spans.clear();
    }

    pub(crate) fn insert(&mut self, span: VoxelHeightSpan, policy: SpanMergePolicy, threshold: u32) {
        match policy {
            SpanMergePolicy::Append => self.spans.push(span),
            SpanMergePolicy::Merge => self.merge_insert(span, threshold),
        }
    }

    fn merge_insert(&mut self, mut span: VoxelHeightSpan, threshold: u32) {
        let mut i = 0;
        while i < self.spans.len() {
            let current = self.spans[i];
            if current.mergeable(&span, threshold) {
                span = span.merged(&current, threshold);
                self.spans.remove(i);
            } else if current.min_y > span.max_y {
                break;
            } else {
                i += 1;
            }
        }
        self.spans.insert(i, span);
    }
}

impl<'a> IntoIterator for &'a Pillar {
    type Item = &'a VoxelHeightSpan;
    type IntoIter = std::slice::Iter<'a, VoxelHeightSpan>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(min_y: u32, max_y: u32, area: u32) -> VoxelHeightSpan {
        VoxelHeightSpan::new(min_y, max_y, AreaId(area))
    }

    fn ranges(pillar: &Pillar) -> Vec<(u32, u32)> {
        pillar.iter().map(|s| (s.min_y(), s.max_y())).collect()
    }

    #[test]
    fn span_height_is_inclusive() {
        let s = span(3, 3, 1);
        assert_eq!(s.height(), 1);
        assert_eq!(s.bottom_y(), 3);
        assert_eq!(s.top_y(), 3);
        assert_eq!(span(2, 6, 1).height(), 5);
    }

    #[test]
    fn full_range_height_saturates() {
        assert_eq!(span(0, u32::MAX, 1).height(), u32::MAX);
        assert_eq!(span(1, u32::MAX, 1).height(), u32::MAX);
    }

    #[test]
    fn area_ids_beyond_a_byte_survive_merging() {
        let mut pillar = Pillar::default();
        pillar.insert(span(0, 4, 70_000), SpanMergePolicy::Merge, 1);
        pillar.insert(span(3, 5, 300), SpanMergePolicy::Merge, 1);
        assert_eq!(pillar.spans(), &[span(0, 5, 70_000)]);
    }

    #[test]
    fn append_keeps_overlapping_spans() {
        let mut pillar = Pillar::default();
        pillar.insert(span(0, 4, 1), SpanMergePolicy::Append, 10);
        pillar.insert(span(2, 3, 2), SpanMergePolicy::Append, 10);
        pillar.insert(span(0, 4, 1), SpanMergePolicy::Append, 10);
        assert_eq!(ranges(&pillar), vec![(0, 4), (2, 3), (0, 4)]);
    }

    #[test]
    fn merge_unions_overlapping_spans() {
        let mut pillar = Pillar::default();
        pillar.insert(span(0, 4, 1), SpanMergePolicy::Merge, 0);
        pillar.insert(span(3, 8, 1), SpanMergePolicy::Merge, 0);
        assert_eq!(ranges(&pillar), vec![(0, 8)]);
    }

    #[test]
    fn merge_joins_adjacent_spans_at_zero_threshold() {
        let mut pillar = Pillar::default();
        pillar.insert(span(0, 2, 1), SpanMergePolicy::Merge, 0);
        pillar.insert(span(3, 5, 1), SpanMergePolicy::Merge, 0);
        assert_eq!(ranges(&pillar), vec![(0, 5)]);
    }

    #[test]
    fn merge_respects_gap_threshold() {
        let mut pillar = Pillar::default();
        pillar.insert(span(0, 2, 1), SpanMergePolicy::Merge, 1);
        // Two empty cells (3 and 4) exceed a threshold of 1.
        pillar.insert(span(5, 6, 1), SpanMergePolicy::Merge, 1);
        assert_eq!(ranges(&pillar), vec![(0, 2), (5, 6)]);
        // One empty cell (7) is within it.
        pillar.insert(span(8, 9, 1), SpanMergePolicy::Merge, 1);
        assert_eq!(ranges(&pillar), vec![(0, 2), (5, 9)]);
    }

    #[test]
    fn merge_keeps_spans_sorted() {
        let mut pillar = Pillar::default();
        pillar.insert(span(20, 22, 1), SpanMergePolicy::Merge, 0);
        pillar.insert(span(0, 1, 1), SpanMergePolicy::Merge, 0);
        pillar.insert(span(10, 12, 1), SpanMergePolicy::Merge, 0);
        assert_eq!(ranges(&pillar), vec![(0, 1), (10, 12), (20, 22)]);
    }

    #[test]
    fn merge_bridges_several_spans() {
        let mut pillar = Pillar::default();
        pillar.insert(span(0, 1, 1), SpanMergePolicy::Merge, 0);
        pillar.insert(span(5, 6, 1), SpanMergePolicy::Merge, 0);
        pillar.insert(span(10, 11, 1), SpanMergePolicy::Merge, 0);
        pillar.insert(span(20, 21, 1), SpanMergePolicy::Merge, 0);
        pillar.insert(span(1, 10, 1), SpanMergePolicy::Merge, 0);
        assert_eq!(ranges(&pillar), vec![(0, 11), (20, 21)]);
    }

    #[test]
    fn merged_area_follows_top_surface() {
        let mut pillar = Pillar::default();
        pillar.insert(span(0, 10, 5), SpanMergePolicy::Merge, 1);
        pillar.insert(span(0, 4, 9), SpanMergePolicy::Merge, 1);
        assert_eq!(pillar.spans(), &[span(0, 10, 5)]);

        pillar.insert(span(8, 15, 2), SpanMergePolicy::Merge, 1);
        assert_eq!(pillar.spans(), &[span(0, 15, 2)]);
    }

    #[test]
    fn merged_area_prefers_larger_id_for_close_tops() {
        let mut pillar = Pillar::default();
        pillar.insert(span(0, 10, 0), SpanMergePolicy::Merge, 2);
        pillar.insert(span(4, 9, 7), SpanMergePolicy::Merge, 2);
        assert_eq!(pillar.spans(), &[span(0, 10, 7)]);
    }

    #[test]
    fn not_walkable_sentinel() {
        assert!(!AreaId::NOT_WALKABLE.is_walkable());
        assert!(AreaId::WALKABLE.is_walkable());
        assert!(AreaId(1).is_walkable());
    }
}
