use alloc::vec::Vec;

use filmstrip::{
    CarouselLayout, Frame, LayoutEvent, LayoutSnapshot, RemovalAnimation, ScrollDirection,
    Size, StripOptions, Style,
};

use crate::{Easing, Tween, apply_anchor, capture_center_anchor};

/// Animation timing for [`StripController`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerOptions {
    /// Style switches, including the settle back to carousel after a drag.
    pub style_duration_ms: u64,
    /// Tap-to-select and bounce jumps.
    pub select_duration_ms: u64,
    pub removal_duration_ms: u64,
    pub easing: Easing,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            style_duration_ms: 250,
            select_duration_ms: 300,
            removal_duration_ms: 250,
            easing: Easing::EaseInOutCubic,
        }
    }
}

impl ControllerOptions {
    pub fn with_style_duration_ms(mut self, duration_ms: u64) -> Self {
        self.style_duration_ms = duration_ms;
        self
    }

    pub fn with_select_duration_ms(mut self, duration_ms: u64) -> Self {
        self.select_duration_ms = duration_ms;
        self
    }

    pub fn with_removal_duration_ms(mut self, duration_ms: u64) -> Self {
        self.removal_duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// What the user is currently doing with the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    /// Finger down; the strip is in flow style.
    Dragging { center_before: usize },
    /// Released inside the content bounds and decelerating toward a snap target.
    Decelerating {
        center_before: usize,
        /// Flow offset of `center_before`.
        from_offset: f32,
        /// Flow offset of the snap target.
        to_offset: f32,
    },
    /// Released past an end; waiting for the overscroll to reverse.
    BouncePending {
        center_before: usize,
        direction: ScrollDirection,
    },
}

/// Returned by [`StripController::begin_drag`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStart {
    /// The content offset after the switch to flow style.
    pub content_offset: f32,
    /// Add this to the gesture's reference translation so the strip does not jump.
    pub adjustment: f32,
}

/// Returned by [`StripController::end_drag`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEnd {
    /// Let the host decelerate to `offset`, the flow offset of `index`.
    Snap { index: usize, offset: f32 },
    /// The projected offset lies past an end.
    Bounce { direction: ScrollDirection },
    /// No drag was in progress, or the strip is empty.
    Ignored,
}

#[derive(Clone, Copy, Debug)]
enum AnimationKind {
    /// Frames blend from `from` to the layout's current geometry.
    Style { from: LayoutSnapshot },
    Removal(RemovalAnimation),
}

#[derive(Clone, Copy, Debug)]
struct Animation {
    kind: AnimationKind,
    offset: Tween,
    /// Eased progress as of the last tick.
    progress: f32,
}

/// A framework-neutral controller that wraps a [`CarouselLayout`] and runs the strip's
/// interaction state machine: drag, deceleration snap, bounce, tap-to-select, and animated
/// style switches and removals.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - the gesture callbacks (`begin_drag`, `drag_moved`, `end_drag`, `on_scroll`,
///   `end_deceleration`, `on_overscroll_reversed`) as UI events occur
/// - `tick(now_ms)` each frame while [`Self::is_animating`] is true, applying the returned
///   content offset to the real scroll container
/// - `drain_events` once per frame, forwarding the events to whatever mirrors the strip
///
/// Layout events accumulate until drained; [`crate::ScrollCoordinator`] drains them after
/// every call it forwards.
///
/// Frames returned by [`Self::frame`] and [`Self::for_each_visible_frame`] are interpolated
/// while an animation runs.
#[derive(Clone, Debug)]
pub struct StripController {
    layout: CarouselLayout,
    options: ControllerOptions,
    interaction: Interaction,
    animation: Option<Animation>,
    content_offset: f32,
}

impl StripController {
    pub fn new(options: StripOptions) -> Self {
        Self::from_layout(CarouselLayout::new(options))
    }

    pub fn from_layout(layout: CarouselLayout) -> Self {
        let content_offset = layout.focus_content_offset().unwrap_or(0.0);
        Self {
            layout,
            options: ControllerOptions::default(),
            interaction: Interaction::Idle,
            animation: None,
            content_offset,
        }
    }

    pub fn with_controller_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut CarouselLayout {
        &mut self.layout
    }

    pub fn into_layout(self) -> CarouselLayout {
        self.layout
    }

    pub fn controller_options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn set_controller_options(&mut self, options: ControllerOptions) {
        self.options = options;
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// The content offset the strip should currently be scrolled to.
    pub fn content_offset(&self) -> f32 {
        self.content_offset
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether a removal is in flight, animated or not.
    pub fn is_removing(&self) -> bool {
        self.layout.is_deleting()
            || matches!(
                self.animation,
                Some(Animation {
                    kind: AnimationKind::Removal(_),
                    ..
                })
            )
    }

    /// Hands every buffered layout event to `f`, oldest first.
    pub fn drain_events(&mut self, f: impl FnMut(LayoutEvent)) {
        self.layout.drain_events(f);
    }

    pub fn take_events(&mut self) -> Vec<LayoutEvent> {
        self.layout.take_events()
    }

    /// Jumps the running animation (if any) to its end state.
    ///
    /// Style and center are already committed when an animation starts, so only an
    /// in-flight removal needs finalizing.
    pub fn cancel_animation(&mut self) {
        let Some(animation) = self.animation.take() else {
            return;
        };
        self.content_offset = animation.offset.to;
        if let AnimationKind::Removal(_) = animation.kind {
            self.layout.finish_removal();
        }
    }

    /// Starts a drag at `content_offset`, switching a carousel strip to flow style.
    pub fn begin_drag(&mut self, content_offset: f32) -> DragStart {
        self.cancel_animation();
        self.layout.cancel_transition();

        let center_before = self.layout.center();
        let mut adjustment = 0.0;
        if self.layout.style() == Style::Carousel {
            let carousel = self
                .layout
                .content_offset_for_item_in(center_before, Style::Carousel);
            let flow = self
                .layout
                .content_offset_for_item_in(center_before, Style::Flow);
            if let (Some(carousel), Some(flow)) = (carousel, flow) {
                adjustment = flow - carousel;
            }
            self.layout.set_style(Style::Flow);
        }

        self.content_offset = content_offset + adjustment;
        self.interaction = Interaction::Dragging { center_before };
        ftrace!(center_before, adjustment, "begin_drag");
        DragStart {
            content_offset: self.content_offset,
            adjustment,
        }
    }

    /// Tracks the drag. Returns the item nearest the viewport's center.
    pub fn drag_moved(&mut self, content_offset: f32) -> Option<usize> {
        if !matches!(self.interaction, Interaction::Dragging { .. }) {
            return None;
        }
        self.content_offset = content_offset;
        self.layout.index_for_content_offset(content_offset)
    }

    /// Ends the drag given the offset the host's deceleration would come to rest at.
    pub fn end_drag(&mut self, projected_offset: f32) -> DragEnd {
        let Interaction::Dragging { center_before } = self.interaction else {
            fwarn!("end_drag: no drag in progress");
            return DragEnd::Ignored;
        };
        let (Some(min), Some(max)) = (
            self.layout.min_content_offset(),
            self.layout.max_content_offset(),
        ) else {
            self.interaction = Interaction::Idle;
            return DragEnd::Ignored;
        };

        if projected_offset < min || projected_offset > max {
            let direction = if projected_offset < min {
                ScrollDirection::Backward
            } else {
                ScrollDirection::Forward
            };
            fdebug!(projected_offset, direction = ?direction, "end_drag: bounce");
            self.interaction = Interaction::BouncePending {
                center_before,
                direction,
            };
            return DragEnd::Bounce { direction };
        }

        let Some(index) = self.layout.index_for_content_offset(projected_offset) else {
            self.interaction = Interaction::Idle;
            return DragEnd::Ignored;
        };
        let to_offset = self
            .layout
            .content_offset_for_item_in(index, Style::Flow)
            .unwrap_or(projected_offset);
        let from_offset = self
            .layout
            .content_offset_for_item_in(center_before, Style::Flow)
            .unwrap_or(self.content_offset);

        self.layout.begin_transition(index, 0.0);
        self.interaction = Interaction::Decelerating {
            center_before,
            from_offset,
            to_offset,
        };
        fdebug!(center_before, index, to_offset, "end_drag: snap");
        DragEnd::Snap {
            index,
            offset: to_offset,
        }
    }

    /// Reports a scroll position change from the host's scroll view.
    ///
    /// While decelerating, this drives the transition toward the snap target by the share of
    /// the distance already covered.
    pub fn on_scroll(&mut self, content_offset: f32) {
        self.content_offset = content_offset;
        let Interaction::Decelerating {
            from_offset,
            to_offset,
            ..
        } = self.interaction
        else {
            return;
        };
        if !self.layout.is_transitioning() {
            return;
        }
        let span = to_offset - from_offset;
        let progress = if span != 0.0 {
            (content_offset - from_offset) / span
        } else {
            1.0
        };
        self.layout.update_transition_progress(progress);
    }

    /// Deceleration came to rest: commits the snap target and animates back to carousel.
    ///
    /// Returns `false` when there was nothing to settle.
    pub fn end_deceleration(&mut self, now_ms: u64) -> bool {
        let from = self.layout.snapshot();
        match self.interaction {
            Interaction::Idle => return false,
            Interaction::Decelerating { .. } => {
                self.layout.commit_transition();
                fdebug!(center = self.layout.center(), "end_deceleration");
            }
            Interaction::Dragging { .. } | Interaction::BouncePending { .. } => {
                if let Some(index) = self.layout.index_for_content_offset(self.content_offset) {
                    self.layout.set_center(index);
                }
            }
        }
        self.interaction = Interaction::Idle;
        self.layout.set_style(Style::Carousel);
        self.start_style_animation(from, now_ms, self.options.style_duration_ms);
        true
    }

    /// The overscroll of a pending bounce reversed: jumps to the first item (backward) or
    /// the last item (forward) and animates to carousel.
    pub fn on_overscroll_reversed(
        &mut self,
        direction: ScrollDirection,
        now_ms: u64,
    ) -> Option<usize> {
        if !matches!(self.interaction, Interaction::BouncePending { .. }) {
            return None;
        }
        let last = self.layout.count().checked_sub(1)?;
        let index = match direction {
            ScrollDirection::Backward => 0,
            ScrollDirection::Forward => last,
        };
        let from = self.layout.snapshot();
        self.interaction = Interaction::Idle;
        self.layout.set_center(index);
        self.layout.set_style(Style::Carousel);
        fdebug!(index, "on_overscroll_reversed");
        self.start_style_animation(from, now_ms, self.options.select_duration_ms);
        Some(index)
    }

    /// Opens or updates the transition toward `index` and moves the content offset to keep
    /// the focus point centered. Returns the new content offset.
    ///
    /// Ignored while the user controls the strip (dragging, decelerating or bouncing) and
    /// while a removal is in flight. A running style animation is cut short.
    pub fn scroll_to_item(&mut self, index: usize, progress: f32) -> Option<f32> {
        if self.interaction != Interaction::Idle {
            ftrace!(index, "scroll_to_item: ignored during user interaction");
            return None;
        }
        if self.is_removing() {
            return None;
        }
        self.animation = None;
        if !self.layout.begin_transition(index, progress) {
            return None;
        }
        let offset = self.layout.focus_content_offset()?;
        self.content_offset = offset;
        Some(offset)
    }

    /// Settles the active transition on whichever side it is closer to.
    pub fn commit_or_cancel_transition(&mut self) -> Option<f32> {
        if !self.layout.commit_or_cancel_transition() {
            return None;
        }
        let offset = self.layout.focus_content_offset()?;
        self.content_offset = offset;
        Some(offset)
    }

    /// Tap on an item: cancels drag physics and animates to carousel centered on `index`.
    pub fn select_item(&mut self, index: usize, now_ms: u64) -> bool {
        if self.is_removing() || self.layout.count() == 0 {
            return false;
        }
        let from = self.layout.snapshot();
        self.interaction = Interaction::Idle;
        self.layout.set_center(index);
        self.layout.set_style(Style::Carousel);
        fdebug!(index, "select_item");
        self.start_style_animation(from, now_ms, self.options.select_duration_ms);
        true
    }

    pub fn set_center(&mut self, index: usize, animated: bool, now_ms: u64) -> bool {
        if self.is_removing() {
            return false;
        }
        let from = self.layout.snapshot();
        if !self.layout.set_center(index) {
            return false;
        }
        self.apply_change(from, animated, now_ms, self.options.select_duration_ms);
        true
    }

    /// Switches the style. Refused while a removal is in flight.
    pub fn set_style(&mut self, style: Style, animated: bool, now_ms: u64) -> bool {
        if self.is_removing() {
            fwarn!(style = ?style, "set_style: refused while a removal is in flight");
            return false;
        }
        let from = self.layout.snapshot();
        if !self.layout.set_style(style) {
            return false;
        }
        self.apply_change(from, animated, now_ms, self.options.style_duration_ms);
        true
    }

    /// Records a measured aspect ratio. Returns `true` when the layout needs a new pass.
    ///
    /// An idle strip is then re-centered on its focus point. A running style animation keeps
    /// its timing and ends on the new focus point instead.
    pub fn notify_item_measured(&mut self, index: usize, aspect_ratio: f32) -> bool {
        let relayout = self.layout.notify_item_measured(index, aspect_ratio);
        if !relayout {
            return false;
        }
        let Some(focus) = self.layout.focus_content_offset() else {
            return true;
        };
        match &mut self.animation {
            Some(animation) => {
                if let AnimationKind::Style { .. } = animation.kind {
                    ftrace!(index, from = animation.offset.to, to = focus, "retarget animation");
                    animation.offset.to = focus;
                }
            }
            None if self.interaction == Interaction::Idle => self.content_offset = focus,
            None => {}
        }
        true
    }

    /// Removes the item at `index`, animating the collapse unless a style animation is
    /// running or the user is interacting with the strip, in which case the removal is
    /// applied at once.
    ///
    /// A removal that is still animating is finalized first, so `index` refers to the strip
    /// after that earlier removal.
    pub fn notify_item_removed(&mut self, index: usize, now_ms: u64) -> bool {
        if self.is_removing() {
            self.cancel_animation();
        }
        if index >= self.layout.count() {
            fwarn!(index, count = self.layout.count(), "notify_item_removed: out of bounds");
            return false;
        }

        let style_running = self.animation.is_some();
        if style_running || self.interaction != Interaction::Idle {
            fdebug!(index, "notify_item_removed: removing without animation");
            self.animation = None;
            if !self.layout.remove_item(index) {
                return false;
            }
            let center = self.layout.center();
            self.interaction = match self.interaction {
                Interaction::Idle => Interaction::Idle,
                Interaction::Dragging { .. } | Interaction::Decelerating { .. } => {
                    Interaction::Dragging {
                        center_before: center,
                    }
                }
                Interaction::BouncePending { direction, .. } => Interaction::BouncePending {
                    center_before: center,
                    direction,
                },
            };
            if self.interaction == Interaction::Idle {
                if let Some(offset) = self.layout.focus_content_offset() {
                    self.content_offset = offset;
                }
            }
            return true;
        }

        let Some(removal) = self.layout.begin_removal(index) else {
            return false;
        };
        let offset = Tween::new(
            removal.from_offset,
            removal.to_offset,
            now_ms,
            self.options.removal_duration_ms,
            self.options.easing,
        );
        self.animation = Some(Animation {
            kind: AnimationKind::Removal(removal),
            offset,
            progress: 0.0,
        });
        true
    }

    /// Applies new container bounds, keeping the item under the viewport's center in place.
    pub fn notify_bounds_changed(&mut self, bounds: Size) -> bool {
        self.cancel_animation();
        let anchor = capture_center_anchor(&self.layout, self.content_offset);
        if !self.layout.notify_bounds_changed(bounds) {
            return false;
        }
        if let Some(offset) = anchor.and_then(|anchor| apply_anchor(&self.layout, &anchor)) {
            self.content_offset = offset;
        }
        true
    }

    /// Advances the running animation.
    ///
    /// Returns the content offset to apply while animating, `None` when idle. A finished
    /// removal is finalized here.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let mut animation = self.animation?;
        animation.progress = animation.offset.progress(now_ms);
        let offset = animation.offset.sample(now_ms);
        self.content_offset = offset;

        if animation.offset.is_done(now_ms) {
            self.animation = None;
            if let AnimationKind::Removal(_) = animation.kind {
                self.layout.finish_removal();
            }
            ftrace!(offset, "tick: animation finished");
        } else {
            self.animation = Some(animation);
        }
        Some(offset)
    }

    /// The frame of `index` as currently displayed.
    pub fn frame(&self, index: usize) -> Option<Frame> {
        let Some(animation) = &self.animation else {
            return self.layout.frame(index);
        };
        match animation.kind {
            AnimationKind::Style { from } => {
                let start = self.layout.geometry_for(from).frame(index)?;
                let end = self.layout.frame(index)?;
                Some(start.lerp(&end, animation.progress))
            }
            AnimationKind::Removal(_) => {
                let frame = self.layout.removal_frame(index)?;
                Some(frame.from.lerp(&frame.to, animation.progress))
            }
        }
    }

    /// Iterates over the displayed frames around the current content offset.
    ///
    /// While animating, this covers every item visible at either end of the animation.
    pub fn for_each_visible_frame(&self, mut f: impl FnMut(usize, Frame)) {
        let Some(animation) = &self.animation else {
            self.layout.for_each_visible_frame(self.content_offset, f);
            return;
        };
        let t = animation.progress;
        match animation.kind {
            AnimationKind::Style { from } => {
                let overscan = self.layout.options().overscan;
                let before = self
                    .layout
                    .geometry_for(from)
                    .visible_range(animation.offset.from, overscan);
                let after = self
                    .layout
                    .geometry()
                    .visible_range(animation.offset.to, overscan);
                for i in before.start.min(after.start)..before.end.max(after.end) {
                    if let Some(frame) = self.frame(i) {
                        f(i, frame);
                    }
                }
            }
            AnimationKind::Removal(removal) => {
                self.layout.for_each_removal_frame(&removal, |frame| {
                    f(frame.index, frame.from.lerp(&frame.to, t));
                });
            }
        }
    }

    fn apply_change(
        &mut self,
        from: LayoutSnapshot,
        animated: bool,
        now_ms: u64,
        duration_ms: u64,
    ) {
        if animated {
            self.start_style_animation(from, now_ms, duration_ms);
        } else {
            self.animation = None;
            if let Some(offset) = self.layout.focus_content_offset() {
                self.content_offset = offset;
            }
        }
    }

    /// Animates from `from` (and the current content offset) to the layout's current state.
    /// Preempts any running style animation.
    fn start_style_animation(&mut self, from: LayoutSnapshot, now_ms: u64, duration_ms: u64) {
        let from_offset = self.content_offset;
        let to_offset = self.layout.focus_content_offset().unwrap_or(from_offset);
        if from == self.layout.snapshot() && from_offset == to_offset {
            self.animation = None;
            return;
        }
        let offset = Tween::new(from_offset, to_offset, now_ms, duration_ms, self.options.easing);
        self.animation = Some(Animation {
            kind: AnimationKind::Style { from },
            offset,
            progress: 0.0,
        });
    }
}
