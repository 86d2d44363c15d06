use core::ops::Range;

use crate::types::lerp;
use crate::{AspectRatioCache, Frame, Metrics, Size, Style, Transition};

/// The input of one layout pass, apart from the aspect-ratio cache.
///
/// Every geometry query in a pass reads the same snapshot, so frames computed within one
/// pass are always mutually consistent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSnapshot {
    pub metrics: Metrics,
    pub style: Style,
    pub center: usize,
    pub transition: Transition,
    pub count: usize,
}

impl LayoutSnapshot {
    /// A snapshot resting on `center` with no active transition.
    pub fn steady(metrics: Metrics, style: Style, center: usize, count: usize) -> Self {
        Self {
            metrics,
            style,
            center,
            transition: Transition::at(center),
            count,
        }
    }
}

/// Pure item geometry for a [`LayoutSnapshot`].
///
/// Only the center and transition-target items can be wider than the uniform width, so
/// origins are computed in O(1): at most two widths and four gaps differ from the uniform
/// stride.
#[derive(Clone, Copy, Debug)]
pub struct Geometry<'a> {
    snapshot: LayoutSnapshot,
    ratios: &'a AspectRatioCache,
    /// Cache entries at or above this index are read one slot higher. Used to lay out the
    /// post-removal strip before the cache is reindexed.
    removed: Option<usize>,
}

impl<'a> Geometry<'a> {
    pub fn new(snapshot: LayoutSnapshot, ratios: &'a AspectRatioCache) -> Self {
        Self {
            snapshot,
            ratios,
            removed: None,
        }
    }

    pub(crate) fn after_removal(
        snapshot: LayoutSnapshot,
        ratios: &'a AspectRatioCache,
        removed: usize,
    ) -> Self {
        Self {
            snapshot,
            ratios,
            removed: Some(removed),
        }
    }

    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.snapshot
    }

    pub fn count(&self) -> usize {
        self.snapshot.count
    }

    /// Half the viewport width: the term subtracted from an item's midpoint to center it.
    pub fn offset_adjustment(&self) -> f32 {
        self.snapshot.metrics.viewport_width / 2.0
    }

    /// How far `index` is expanded toward its preferred width, in `[0, 1]`.
    pub fn blend(&self, index: usize) -> f32 {
        if self.snapshot.style == Style::Flow {
            return 0.0;
        }
        let center = self.snapshot.center;
        let Transition { target, progress } = self.snapshot.transition;
        if target == center {
            return if index == center { 1.0 } else { 0.0 };
        }
        if index == center {
            1.0 - progress
        } else if index == target {
            progress
        } else {
            0.0
        }
    }

    pub fn item_size(&self, index: usize) -> Option<Size> {
        let index = self.clamp_index(index)?;
        Some(Size::new(
            self.width_at(index),
            self.snapshot.metrics.item_height,
        ))
    }

    pub fn origin_x(&self, index: usize) -> Option<f32> {
        let index = self.clamp_index(index)?;
        Some(self.origin_at(index))
    }

    pub fn frame(&self, index: usize) -> Option<Frame> {
        let index = self.clamp_index(index)?;
        Some(self.frame_at(index))
    }

    /// Total width of the laid-out items.
    pub fn content_width(&self) -> f32 {
        match self.snapshot.count {
            0 => 0.0,
            n => self.frame_at(n - 1).max_x(),
        }
    }

    /// The content offset that centers `index` in the viewport once it is the resting center
    /// in `style`.
    ///
    /// Strictly increasing in `index` for a fixed style and cache.
    pub fn content_offset_for_item(&self, index: usize, style: Style) -> Option<f32> {
        let index = self.clamp_index(index)?;
        let steady = Self {
            snapshot: LayoutSnapshot {
                style,
                center: index,
                transition: Transition::at(index),
                ..self.snapshot
            },
            ..*self
        };
        Some(steady.frame_at(index).mid_x() - self.offset_adjustment())
    }

    /// Nearest item for a flow-style content offset, clamped to `[0, count - 1]`.
    pub fn index_for_content_offset(&self, offset: f32) -> Option<usize> {
        let last = self.snapshot.count.checked_sub(1)?;
        let metrics = &self.snapshot.metrics;
        let stride = metrics.stride();
        if !(stride > 0.0) {
            return Some(0);
        }
        let position = (offset + self.offset_adjustment() - metrics.uniform_width / 2.0) / stride;
        let index = if position > 0.0 {
            (position + 0.5) as usize
        } else {
            0
        };
        Some(index.min(last))
    }

    pub fn min_content_offset(&self, style: Style) -> Option<f32> {
        self.content_offset_for_item(0, style)
    }

    pub fn max_content_offset(&self, style: Style) -> Option<f32> {
        let last = self.snapshot.count.checked_sub(1)?;
        self.content_offset_for_item(last, style)
    }

    /// The content offset that keeps the transition's focus point centered: the midpoint of
    /// the center item blended toward the midpoint of the target item by `progress`.
    pub fn focus_content_offset(&self) -> Option<f32> {
        let last = self.snapshot.count.checked_sub(1)?;
        let center = self.snapshot.center.min(last);
        let Transition { target, progress } = self.snapshot.transition;
        let target = target.min(last);
        let from = self.frame_at(center).mid_x();
        let to = self.frame_at(target).mid_x();
        let progress = if target == center { 0.0 } else { progress };
        Some(lerp(from, to, progress) - self.offset_adjustment())
    }

    /// The item whose slot (its frame plus its trailing gap) contains `x`, clamped to the
    /// first and last items.
    pub fn index_at_x(&self, x: f32) -> Option<usize> {
        let count = self.snapshot.count;
        count.checked_sub(1)?;
        Some(partition_point(count, |i| self.origin_at(i) <= x).saturating_sub(1))
    }

    /// Indexes intersecting the viewport at `content_offset`, widened by `overscan`.
    pub fn visible_range(&self, content_offset: f32, overscan: usize) -> Range<usize> {
        let count = self.snapshot.count;
        if count == 0 {
            return 0..0;
        }
        let view_end = content_offset + self.snapshot.metrics.viewport_width;
        let start = partition_point(count, |i| self.frame_at(i).max_x() <= content_offset);
        let end = partition_point(count, |i| self.origin_at(i) < view_end).max(start);
        start.saturating_sub(overscan)..end.saturating_add(overscan).min(count)
    }

    /// Iterates over the frames intersecting the viewport without allocations.
    pub fn for_each_visible_frame(
        &self,
        content_offset: f32,
        overscan: usize,
        mut f: impl FnMut(usize, Frame),
    ) {
        for i in self.visible_range(content_offset, overscan) {
            f(i, self.frame_at(i));
        }
    }

    pub(crate) fn frame_at(&self, index: usize) -> Frame {
        let metrics = &self.snapshot.metrics;
        Frame {
            x: self.origin_at(index),
            y: metrics.item_y,
            width: self.width_at(index),
            height: metrics.item_height,
        }
    }

    fn clamp_index(&self, index: usize) -> Option<usize> {
        let last = self.snapshot.count.checked_sub(1)?;
        Some(index.min(last))
    }

    fn aspect_ratio(&self, index: usize) -> Option<f32> {
        let index = match self.removed {
            Some(removed) if index >= removed => index + 1,
            _ => index,
        };
        self.ratios.get(index)
    }

    fn width_at(&self, index: usize) -> f32 {
        let metrics = &self.snapshot.metrics;
        let blend = self.blend(index);
        if blend <= 0.0 {
            return metrics.uniform_width;
        }
        let preferred = metrics.preferred_width(self.aspect_ratio(index));
        lerp(metrics.uniform_width, preferred, blend)
    }

    /// Spacing between `index` and `index + 1`.
    fn gap_after(&self, index: usize) -> f32 {
        let metrics = &self.snapshot.metrics;
        let weight = (self.blend(index) + self.blend(index + 1)).min(1.0);
        lerp(metrics.min_spacing, metrics.max_spacing, weight)
    }

    /// Center and target, the only items that may be wider than uniform.
    fn expanded(&self) -> [Option<usize>; 2] {
        if self.snapshot.style == Style::Flow {
            return [None, None];
        }
        let center = self.snapshot.center;
        let target = self.snapshot.transition.target;
        [Some(center), (target != center).then_some(target)]
    }

    fn origin_at(&self, index: usize) -> f32 {
        let metrics = &self.snapshot.metrics;
        let mut x = index as f32 * metrics.stride();

        let mut seen_gaps = [usize::MAX; 4];
        let mut n = 0;
        for expanded in self.expanded().into_iter().flatten() {
            if expanded < index {
                x += self.width_at(expanded) - metrics.uniform_width;
            }
            for gap in [expanded.checked_sub(1), Some(expanded)].into_iter().flatten() {
                if gap < index && !seen_gaps[..n].contains(&gap) {
                    seen_gaps[n] = gap;
                    n += 1;
                    x += self.gap_after(gap) - metrics.min_spacing;
                }
            }
        }
        x
    }
}

/// First index in `0..count` for which `pred` is false; `pred` must be monotone.
fn partition_point(count: usize, mut pred: impl FnMut(usize) -> bool) -> usize {
    let (mut lo, mut hi) = (0, count);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
