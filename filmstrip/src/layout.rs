use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::aspect::is_valid_ratio;
use crate::geometry::{Geometry, LayoutSnapshot};
use crate::phase::{DeleteOperation, LayoutPhase, RemovalAnimation, RemovalFrame};
use crate::types::clamp_progress;
use crate::{
    AspectRatioCache, Frame, LayoutEvent, LayoutState, Metrics, Size, StripOptions, Style,
    Transition,
};

/// A headless carousel layout for a thumbnail strip.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects or image content.
/// - Your adapter drives it with bounds, measurements, transitions and removals.
/// - Each layout pass reads one [`LayoutSnapshot`] through [`Self::geometry`] and applies
///   the returned frames.
///
/// Semantic notifications are buffered as [`LayoutEvent`]s and drained with
/// [`Self::drain_events`]. The optional `on_change` callback fires whenever a new layout
/// pass is needed.
///
/// For drag handling, animations and pager synchronization, see the `filmstrip-adapter`
/// crate.
#[derive(Clone, Debug)]
pub struct CarouselLayout {
    options: StripOptions,
    bounds: Size,
    metrics: Metrics,
    style: Style,
    center: usize,
    phase: LayoutPhase,
    ratios: AspectRatioCache,
    events: Vec<LayoutEvent>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl CarouselLayout {
    /// Creates a layout from options.
    ///
    /// `options.initial_bounds`, `options.initial_style` and `options.initial_center` are
    /// applied immediately.
    pub fn new(options: StripOptions) -> Self {
        let bounds = options.initial_bounds.unwrap_or_default();
        let metrics = Metrics::resolve(bounds, &options);
        let center = clamp_center(options.initial_center, options.count);
        fdebug!(
            count = options.count,
            center,
            style = ?options.initial_style,
            "CarouselLayout::new"
        );
        Self {
            bounds,
            metrics,
            style: options.initial_style,
            center,
            phase: LayoutPhase::Steady,
            ratios: AspectRatioCache::new(),
            events: Vec::new(),
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &StripOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: StripOptions) {
        let prev_count = self.options.count;
        self.options = options;
        self.metrics = Metrics::resolve(self.bounds, &self.options);
        ftrace!(count = self.options.count, "CarouselLayout::set_options");
        if self.options.count != prev_count {
            self.apply_count_change();
        }
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut StripOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&CarouselLayout) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Resynchronizes the item count after the collection was reloaded wholesale.
    ///
    /// Any active transition or removal is abandoned; cached ratios past the new end are
    /// dropped.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.apply_count_change();
        self.notify();
    }

    fn apply_count_change(&mut self) {
        let count = self.options.count;
        fdebug!(count, "apply_count_change");
        if let LayoutPhase::Transitioning { target, .. } = self.phase {
            self.push_progress(target, 0.0);
        }
        self.phase = LayoutPhase::Steady;
        self.ratios.truncate(count);
        if count > 0 {
            self.commit_center(self.center.min(count - 1));
        } else {
            self.center = 0;
        }
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn center(&self) -> usize {
        self.center
    }

    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    /// The active transition, or the no-op transition at the center.
    pub fn transition(&self) -> Transition {
        self.phase.transition(self.center)
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase.is_transitioning()
    }

    pub fn is_deleting(&self) -> bool {
        self.phase.deletion().is_some()
    }

    pub fn aspect_ratios(&self) -> &AspectRatioCache {
        &self.ratios
    }

    /// The input of the current layout pass.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            metrics: self.metrics,
            style: self.style,
            center: self.center,
            transition: self.transition(),
            count: self.options.count,
        }
    }

    pub fn geometry(&self) -> Geometry<'_> {
        Geometry::new(self.snapshot(), &self.ratios)
    }

    /// Geometry of an arbitrary snapshot over this layout's aspect-ratio cache.
    pub fn geometry_for(&self, snapshot: LayoutSnapshot) -> Geometry<'_> {
        Geometry::new(snapshot, &self.ratios)
    }

    /// Switches the style. Refused (returns `false`) while a removal is in flight.
    pub fn set_style(&mut self, style: Style) -> bool {
        if self.is_deleting() {
            fwarn!(style = ?style, "set_style: refused while a removal is in flight");
            return false;
        }
        if self.style != style {
            ftrace!(style = ?style, "set_style");
            self.style = style;
            self.notify();
        }
        true
    }

    /// Commits `index` (clamped) as the center, dropping any active transition.
    ///
    /// Refused while a removal is in flight or when the strip is empty.
    pub fn set_center(&mut self, index: usize) -> bool {
        if self.is_deleting() {
            fwarn!(index, "set_center: refused while a removal is in flight");
            return false;
        }
        let Some(last) = self.options.count.checked_sub(1) else {
            return false;
        };
        if let LayoutPhase::Transitioning { target, .. } = self.phase {
            self.push_progress(target, 0.0);
        }
        self.phase = LayoutPhase::Steady;
        self.commit_center(index.min(last));
        self.notify();
        true
    }

    /// Opens (or replaces) the transition toward `target`.
    ///
    /// `target` is clamped to the item range and `progress` to `[0, 1]`. A target equal to
    /// the center leaves the layout steady; a progress of `1` commits immediately.
    pub fn begin_transition(&mut self, target: usize, progress: f32) -> bool {
        if self.is_deleting() {
            fwarn!(target, "begin_transition: refused while a removal is in flight");
            return false;
        }
        let Some(last) = self.options.count.checked_sub(1) else {
            return false;
        };
        let target = target.min(last);
        let progress = clamp_progress(progress);

        if let LayoutPhase::Transitioning { target: prev, .. } = self.phase {
            if prev != target {
                self.push_progress(prev, 0.0);
            }
        }
        if target == self.center {
            self.phase = LayoutPhase::Steady;
            self.notify();
            return true;
        }

        ftrace!(center = self.center, target, progress, "begin_transition");
        self.phase = LayoutPhase::Transitioning { target, progress };
        self.push_progress(target, progress);
        if progress >= 1.0 {
            self.commit_transition();
        } else {
            self.notify();
        }
        true
    }

    /// Moves the active transition. Returns `false` when no transition is active.
    pub fn update_transition_progress(&mut self, progress: f32) -> bool {
        let LayoutPhase::Transitioning { target, .. } = self.phase else {
            return false;
        };
        let progress = clamp_progress(progress);
        self.phase = LayoutPhase::Transitioning { target, progress };
        self.push_progress(target, progress);
        if progress >= 1.0 {
            self.commit_transition();
        } else {
            self.notify();
        }
        true
    }

    /// Commits the active transition: its target becomes the center.
    pub fn commit_transition(&mut self) -> bool {
        let LayoutPhase::Transitioning { target, progress } = self.phase else {
            return false;
        };
        if progress < 1.0 {
            self.push_progress(target, 1.0);
        }
        ftrace!(from = self.center, to = target, "commit_transition");
        self.phase = LayoutPhase::Steady;
        self.commit_center(target);
        self.notify();
        true
    }

    /// Abandons the active transition, returning to the committed center.
    pub fn cancel_transition(&mut self) -> bool {
        let LayoutPhase::Transitioning { target, .. } = self.phase else {
            return false;
        };
        ftrace!(center = self.center, target, "cancel_transition");
        self.phase = LayoutPhase::Steady;
        self.push_progress(target, 0.0);
        self.notify();
        true
    }

    /// Commits the active transition when it is at least halfway, cancels it otherwise.
    pub fn commit_or_cancel_transition(&mut self) -> bool {
        match self.phase {
            LayoutPhase::Transitioning { progress, .. } if progress >= 0.5 => {
                self.commit_transition()
            }
            LayoutPhase::Transitioning { .. } => self.cancel_transition(),
            _ => false,
        }
    }

    /// Applies new container bounds. Returns `true` when the metrics were recomputed.
    pub fn notify_bounds_changed(&mut self, bounds: Size) -> bool {
        if self.bounds == bounds {
            return false;
        }
        self.bounds = bounds;
        self.metrics = Metrics::resolve(bounds, &self.options);
        fdebug!(
            width = bounds.width,
            height = bounds.height,
            uniform_width = self.metrics.uniform_width,
            "notify_bounds_changed"
        );
        self.notify();
        true
    }

    /// Records the preferred aspect ratio (`width / height`) reported by an item's content.
    ///
    /// Returns `true` only when a new layout pass is required: the item is the expanded
    /// center in carousel style and its ratio actually changed. Measurements of the center or
    /// target taken mid-transition, and every measurement taken mid-removal, are dropped so a
    /// spurious re-measure cannot make the animation jitter.
    pub fn notify_item_measured(&mut self, index: usize, aspect_ratio: f32) -> bool {
        if index >= self.options.count {
            fwarn!(index, count = self.options.count, "notify_item_measured: out of bounds");
            return false;
        }
        if !is_valid_ratio(aspect_ratio) {
            fwarn!(index, aspect_ratio, "notify_item_measured: invalid ratio");
            return false;
        }
        match self.phase {
            LayoutPhase::Deleting(_) => return false,
            LayoutPhase::Transitioning { target, .. }
                if index == self.center || index == target =>
            {
                return false;
            }
            _ => {}
        }

        let changed = self.ratios.insert(index, aspect_ratio);
        if changed && self.style == Style::Carousel && index == self.center {
            ftrace!(index, aspect_ratio, "notify_item_measured: relayout");
            self.notify();
            return true;
        }
        false
    }

    /// Starts removing the item at `index`.
    ///
    /// Captures the surviving center, then switches to [`LayoutPhase::Deleting`]: geometry
    /// keeps the pre-removal indices and [`Self::removal_frame`] reports where each item
    /// animates to. Call [`Self::finish_removal`] once the animation completes.
    ///
    /// An active transition is cancelled first. A removal that is already in flight is
    /// finalized first, so `index` refers to the strip after that earlier removal.
    pub fn begin_removal(&mut self, index: usize) -> Option<RemovalAnimation> {
        if self.is_deleting() {
            fwarn!(index, "begin_removal: finalizing the in-flight removal first");
            self.finish_removal();
        }
        let count = self.options.count;
        if index >= count {
            fwarn!(index, count, "begin_removal: out of bounds");
            return None;
        }
        if self.is_transitioning() {
            self.cancel_transition();
        }

        let operation = DeleteOperation::resolve(index, self.center, count);
        let from_offset = self.geometry().focus_content_offset().unwrap_or(0.0);
        self.phase = LayoutPhase::Deleting(operation);
        let to_offset = self
            .post_removal_geometry(operation)
            .focus_content_offset()
            .unwrap_or(from_offset);

        fdebug!(
            index,
            center_before = operation.center_before,
            from_offset,
            to_offset,
            "begin_removal"
        );
        self.notify();
        Some(RemovalAnimation {
            operation,
            from_offset,
            to_offset,
        })
    }

    /// Start and end frames of pre-removal `index` for the in-flight removal.
    pub fn removal_frame(&self, index: usize) -> Option<RemovalFrame> {
        let operation = self.phase.deletion()?;
        if index >= self.options.count {
            return None;
        }
        let after = self.post_removal_geometry(operation);
        let from = self.geometry().frame_at(index);
        let to = match operation.new_index(index) {
            Some(new_index) => after.frame_at(new_index),
            None => self.collapsed_frame(operation, &after, from),
        };
        Some(RemovalFrame { index, from, to })
    }

    /// Iterates over the removal frames of every item visible at either end of the animation.
    pub fn for_each_removal_frame(
        &self,
        animation: &RemovalAnimation,
        mut f: impl FnMut(RemovalFrame),
    ) {
        let Some(operation) = self.phase.deletion() else {
            return;
        };
        let overscan = self.options.overscan;
        let before = self.geometry().visible_range(animation.from_offset, overscan);
        let after = self
            .post_removal_geometry(operation)
            .visible_range(animation.to_offset, overscan);

        let old_index = |i: usize| {
            if i >= operation.deleting_index {
                i + 1
            } else {
                i
            }
        };
        let (start, end) = if after.is_empty() {
            (before.start, before.end)
        } else {
            (
                before.start.min(old_index(after.start)),
                before.end.max(old_index(after.end - 1) + 1),
            )
        };
        for i in start..end.min(self.options.count) {
            if let Some(frame) = self.removal_frame(i) {
                f(frame);
            }
        }
    }

    /// Finalizes the in-flight removal: reindexes the aspect-ratio cache, decrements the
    /// count and re-derives the center in the new index space.
    pub fn finish_removal(&mut self) -> bool {
        let Some(operation) = self.phase.deletion() else {
            return false;
        };
        let prev_center = self.center;
        self.ratios.remove_and_shift(operation.deleting_index);
        self.options.count = self.options.count.saturating_sub(1);
        self.phase = LayoutPhase::Steady;
        self.center = clamp_center(operation.center_after(), self.options.count);

        let displayed_changed =
            self.center != prev_center || operation.deleting_index == prev_center;
        if self.options.count > 0 && displayed_changed {
            self.events.push(LayoutEvent::DisplayedIndexChanged { index: self.center });
        }
        fdebug!(
            index = operation.deleting_index,
            center = self.center,
            count = self.options.count,
            "finish_removal"
        );
        self.notify();
        true
    }

    /// Removes the item at `index` without animation.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.begin_removal(index).is_none() {
            return false;
        }
        self.finish_removal()
    }

    fn post_removal_geometry(&self, operation: DeleteOperation) -> Geometry<'_> {
        let count = self.options.count.saturating_sub(1);
        let center = clamp_center(operation.center_after(), count);
        let snapshot = LayoutSnapshot::steady(self.metrics, self.style, center, count);
        Geometry::after_removal(snapshot, &self.ratios, operation.deleting_index)
    }

    /// Final frame of the removed item: zero width, one spacing past its predecessor's
    /// trailing edge. The spacing is the maximum one when the item sat next to the center.
    fn collapsed_frame(
        &self,
        operation: DeleteOperation,
        after: &Geometry<'_>,
        from: Frame,
    ) -> Frame {
        let spacing = if operation.is_adjacent_to_center() {
            self.metrics.max_spacing
        } else {
            self.metrics.min_spacing
        };
        let x = if after.count() == 0 {
            from.x
        } else if let Some(prev) = operation.deleting_index.checked_sub(1) {
            after.frame_at(prev).max_x() + spacing
        } else {
            after.frame_at(0).x - spacing
        };
        Frame {
            x,
            width: 0.0,
            ..from
        }
    }

    pub fn frame(&self, index: usize) -> Option<Frame> {
        self.geometry().frame(index)
    }

    pub fn item_size(&self, index: usize) -> Option<Size> {
        self.geometry().item_size(index)
    }

    pub fn origin_x(&self, index: usize) -> Option<f32> {
        self.geometry().origin_x(index)
    }

    /// The content offset centering `index` in the current style.
    pub fn content_offset_for_item(&self, index: usize) -> Option<f32> {
        self.geometry().content_offset_for_item(index, self.style)
    }

    pub fn content_offset_for_item_in(&self, index: usize, style: Style) -> Option<f32> {
        self.geometry().content_offset_for_item(index, style)
    }

    pub fn index_for_content_offset(&self, offset: f32) -> Option<usize> {
        self.geometry().index_for_content_offset(offset)
    }

    /// The content offset that keeps the current transition visually centered.
    pub fn focus_content_offset(&self) -> Option<f32> {
        self.geometry().focus_content_offset()
    }

    pub fn min_content_offset(&self) -> Option<f32> {
        self.geometry().min_content_offset(self.style)
    }

    pub fn max_content_offset(&self) -> Option<f32> {
        self.geometry().max_content_offset(self.style)
    }

    pub fn content_width(&self) -> f32 {
        self.geometry().content_width()
    }

    pub fn for_each_visible_frame(&self, content_offset: f32, f: impl FnMut(usize, Frame)) {
        self.geometry()
            .for_each_visible_frame(content_offset, self.options.overscan, f);
    }

    /// Collects visible frames into `out` (clears `out` first).
    pub fn collect_visible_frames(&self, content_offset: f32, out: &mut Vec<(usize, Frame)>) {
        out.clear();
        self.for_each_visible_frame(content_offset, |i, frame| out.push((i, frame)));
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Hands every buffered event to `f`, oldest first.
    pub fn drain_events(&mut self, mut f: impl FnMut(LayoutEvent)) {
        for event in self.events.drain(..) {
            f(event);
        }
    }

    /// Drains the buffered events into a `Vec`.
    pub fn take_events(&mut self) -> Vec<LayoutEvent> {
        core::mem::take(&mut self.events)
    }

    /// A serializable snapshot of the browsing position.
    pub fn state(&self) -> LayoutState {
        LayoutState {
            style: self.style,
            center: self.center,
        }
    }

    /// Restores a previously captured browsing position (the center is clamped).
    pub fn restore_state(&mut self, state: LayoutState) {
        self.batch_update(|l| {
            l.set_style(state.style);
            l.set_center(state.center);
        });
    }

    /// Exports the cached aspect ratios (useful for persistence).
    pub fn export_aspect_ratios(&self) -> Vec<(usize, f32)> {
        self.ratios.export()
    }

    /// Replaces the cached aspect ratios. Out-of-range and invalid entries are skipped.
    pub fn import_aspect_ratios(&mut self, entries: impl IntoIterator<Item = (usize, f32)>) {
        self.ratios.clear();
        let count = self.options.count;
        for (index, ratio) in entries {
            if index < count {
                self.ratios.insert(index, ratio);
            }
        }
        fdebug!(entries = self.ratios.len(), "import_aspect_ratios");
        self.notify();
    }

    fn commit_center(&mut self, index: usize) {
        if self.center != index {
            self.center = index;
            self.events.push(LayoutEvent::DisplayedIndexChanged { index });
        }
    }

    fn push_progress(&mut self, index: usize, progress: f32) {
        self.events
            .push(LayoutEvent::TransitionProgressChanged { index, progress });
    }
}

fn clamp_center(center: usize, count: usize) -> usize {
    center.min(count.saturating_sub(1))
}
