use crate::*;

use filmstrip::{CarouselLayout, LayoutEvent, ScrollDirection, Size, StripOptions, Style};
use std::vec::Vec;

// uniform width 100, item height 100, spacing 1..10, viewport 1000
fn options(count: usize, center: usize) -> StripOptions {
    StripOptions::new(count)
        .with_vertical_padding(1.0)
        .with_min_width_ratio(1.0)
        .with_max_width_multiple(3.0)
        .with_spacing(1.0, 10.0)
        .with_initial_center(center)
        .with_initial_bounds(Some(Size::new(1000.0, 102.0)))
}

fn controller(count: usize, center: usize) -> StripController {
    StripController::new(options(count, center))
}

fn assert_close(actual: f32, expected: f32) {
    let delta = actual - expected;
    assert!(
        delta < 1e-3 && delta > -1e-3,
        "expected {expected}, got {actual}"
    );
}

#[derive(Clone, Debug, PartialEq)]
enum PagerCall {
    Show(usize),
    Progress(usize, f32),
    Reload(usize),
}

#[derive(Debug, Default)]
struct RecordingPager {
    calls: Vec<PagerCall>,
}

impl PagerSync for RecordingPager {
    fn show_page(&mut self, index: usize) {
        self.calls.push(PagerCall::Show(index));
    }

    fn set_transition_progress(&mut self, index: usize, progress: f32) {
        self.calls.push(PagerCall::Progress(index, progress));
    }

    fn reload_adjacent_pages(&mut self, index: usize) {
        self.calls.push(PagerCall::Reload(index));
    }
}

fn coordinator(count: usize, center: usize) -> ScrollCoordinator<RecordingPager> {
    ScrollCoordinator::new(controller(count, center), RecordingPager::default())
}

fn take_calls(c: &mut ScrollCoordinator<RecordingPager>) -> Vec<PagerCall> {
    core::mem::take(&mut c.pager_mut().calls)
}

#[test]
fn tween_easings_hit_endpoints() {
    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseOutQuad,
        Easing::EaseInOutCubic,
    ] {
        assert_close(easing.sample(0.0), 0.0);
        assert_close(easing.sample(1.0), 1.0);
    }
    assert_close(Easing::EaseOutQuad.sample(0.5), 0.75);
    assert_close(Easing::EaseInOutCubic.sample(0.5), 0.5);
}

#[test]
fn tween_samples_and_retargets() {
    let mut tween = Tween::new(0.0, 100.0, 1000, 100, Easing::Linear);
    assert_close(tween.sample(900), 0.0);
    assert_close(tween.sample(1050), 50.0);
    assert!(!tween.is_done(1099));
    assert!(tween.is_done(1100));
    assert_close(tween.sample(5000), 100.0);

    tween.retarget(1050, -50.0, 100);
    assert_close(tween.sample(1050), 50.0);
    assert_close(tween.sample(1150), -50.0);
}

#[test]
fn starts_centered_on_the_initial_item() {
    let c = controller(10, 2);
    // origin 211 (two widened gaps), mid 261, minus half the viewport
    assert_close(c.content_offset(), -239.0);
    assert_eq!(c.interaction(), Interaction::Idle);
    assert!(!c.is_animating());
}

#[test]
fn drag_switches_to_flow_and_reports_the_adjustment() {
    let mut c = controller(10, 2);
    let start = c.begin_drag(-239.0);
    assert_eq!(c.layout().style(), Style::Flow);
    assert_close(start.adjustment, -9.0);
    assert_close(start.content_offset, -248.0);
    assert_eq!(c.interaction(), Interaction::Dragging { center_before: 2 });

    assert_eq!(c.drag_moved(-248.0 + 202.0), Some(4));
}

#[test]
fn drag_snaps_then_settles_back_to_carousel() {
    let mut c = controller(10, 2);
    c.begin_drag(-239.0);

    // Flow offset of item 5 is 5 * 101 + 50 - 500 = 55.
    let end = c.end_drag(75.0);
    assert_eq!(
        end,
        DragEnd::Snap {
            index: 5,
            offset: 55.0
        }
    );
    assert!(c.layout().is_transitioning());

    c.on_scroll(-248.0 + 0.5 * (55.0 + 248.0));
    assert_close(c.layout().transition().progress, 0.5);
    assert_eq!(c.layout().center(), 2);

    assert!(c.end_deceleration(1000));
    assert_eq!(c.layout().center(), 5);
    assert_eq!(c.layout().style(), Style::Carousel);
    assert_eq!(c.interaction(), Interaction::Idle);
    assert!(c.is_animating());

    let mut last = c.content_offset();
    for now_ms in [1000, 1050, 1100, 1200, 1250] {
        let offset = c.tick(now_ms).unwrap();
        assert!(offset >= last);
        last = offset;
    }
    assert!(!c.is_animating());
    // Carousel offset of item 5: origin 514, mid 564.
    assert_close(c.content_offset(), 64.0);
    assert_eq!(c.tick(1300), None);

    let events = c.layout_mut().take_events();
    assert_eq!(
        events,
        [
            LayoutEvent::TransitionProgressChanged {
                index: 5,
                progress: 0.0
            },
            LayoutEvent::TransitionProgressChanged {
                index: 5,
                progress: 0.5
            },
            LayoutEvent::TransitionProgressChanged {
                index: 5,
                progress: 1.0
            },
            LayoutEvent::DisplayedIndexChanged { index: 5 },
        ]
    );
}

#[test]
fn snapping_back_to_the_same_item_emits_no_displayed_change() {
    let mut c = controller(10, 2);
    c.begin_drag(-239.0);
    assert_eq!(
        c.end_drag(-240.0),
        DragEnd::Snap {
            index: 2,
            offset: -248.0
        }
    );
    assert!(!c.layout().is_transitioning());
    assert!(c.end_deceleration(0));
    assert_eq!(c.layout().center(), 2);
    assert!(c.layout_mut().take_events().is_empty());
}

#[test]
fn releasing_past_an_end_bounces_to_that_end() {
    let mut c = controller(10, 2);
    c.begin_drag(-239.0);
    assert_eq!(
        c.end_drag(-600.0),
        DragEnd::Bounce {
            direction: ScrollDirection::Backward
        }
    );
    assert!(matches!(
        c.interaction(),
        Interaction::BouncePending { center_before: 2, .. }
    ));

    assert_eq!(c.on_overscroll_reversed(ScrollDirection::Backward, 0), Some(0));
    assert_eq!(c.layout().center(), 0);
    assert_eq!(c.layout().style(), Style::Carousel);
    c.tick(10_000);
    assert_close(c.content_offset(), -450.0);

    c.begin_drag(-450.0);
    assert_eq!(
        c.end_drag(2000.0),
        DragEnd::Bounce {
            direction: ScrollDirection::Forward
        }
    );
    assert_eq!(c.on_overscroll_reversed(ScrollDirection::Forward, 0), Some(9));
    c.tick(10_000);
    // origin 918 (one widened gap before the last item), mid 968
    assert_close(c.content_offset(), 468.0);
}

#[test]
fn overscroll_reversal_without_a_pending_bounce_is_ignored() {
    let mut c = controller(10, 2);
    assert_eq!(c.on_overscroll_reversed(ScrollDirection::Forward, 0), None);
    assert_eq!(c.layout().center(), 2);
}

#[test]
fn end_drag_without_a_drag_is_ignored() {
    let mut c = controller(10, 2);
    assert_eq!(c.end_drag(0.0), DragEnd::Ignored);
    assert!(!c.end_deceleration(0));

    let mut empty = controller(0, 0);
    empty.begin_drag(0.0);
    assert_eq!(empty.end_drag(0.0), DragEnd::Ignored);
}

#[test]
fn scroll_to_item_is_ignored_while_decelerating() {
    let mut c = controller(10, 2);
    c.begin_drag(-239.0);
    c.end_drag(75.0);
    assert_eq!(c.scroll_to_item(3, 0.5), None);
    assert_eq!(c.layout().transition().target, 5);
}

#[test]
fn scroll_to_item_follows_the_focus_point() {
    let mut c = controller(10, 2);
    // Center and target half expanded: mids 256.5 and 366.5.
    let offset = c.scroll_to_item(3, 0.5).unwrap();
    assert_close(offset, -188.5);
    assert_close(c.content_offset(), -188.5);

    let offset = c.scroll_to_item(3, 1.0).unwrap();
    assert_eq!(c.layout().center(), 3);
    assert_close(offset, c.layout().content_offset_for_item(3).unwrap());
}

#[test]
fn select_item_animates_frames_between_layouts() {
    let mut c = controller(10, 2);
    assert!(c.select_item(4, 0));
    assert_eq!(c.layout().center(), 4);
    assert!(c.is_animating());

    // Before the first tick the old layout is shown.
    assert_close(c.frame(3).unwrap().x, 321.0);

    c.tick(150);
    assert_close(c.frame(3).unwrap().x, 312.0);

    c.tick(300);
    assert!(!c.is_animating());
    assert_close(c.frame(3).unwrap().x, 303.0);
    assert_close(
        c.content_offset(),
        c.layout().content_offset_for_item(4).unwrap(),
    );
}

#[test]
fn animated_visible_frames_cover_both_ends() {
    let mut c = controller(50, 2);
    c.select_item(40, 0);
    let mut indexes = Vec::new();
    c.for_each_visible_frame(|i, _| indexes.push(i));
    assert!(indexes.contains(&0));
    assert!(indexes.contains(&40));
    assert!(indexes.windows(2).all(|w| w[0] + 1 == w[1]));

    c.tick(300);
    indexes.clear();
    c.for_each_visible_frame(|i, _| indexes.push(i));
    assert!(!indexes.contains(&0));
    assert!(indexes.contains(&40));
}

#[test]
fn set_center_without_animation_jumps() {
    let mut c = controller(10, 2);
    assert!(c.set_center(7, false, 0));
    assert!(!c.is_animating());
    assert_close(
        c.content_offset(),
        c.layout().content_offset_for_item(7).unwrap(),
    );

    assert!(c.set_style(Style::Flow, true, 0));
    assert!(c.is_animating());
    c.tick(1000);
    assert_close(
        c.content_offset(),
        c.layout().content_offset_for_item(7).unwrap(),
    );
}

#[test]
fn removal_animates_and_finalizes_on_tick() {
    let mut c = controller(10, 2);
    assert!(c.notify_item_removed(4, 0));
    assert!(c.is_removing());
    assert_eq!(c.layout().count(), 10);

    let removed = c.frame(4).unwrap();
    assert_close(removed.x, 422.0);
    assert_close(removed.width, 100.0);
    assert_close(c.frame(5).unwrap().x, 523.0);

    c.tick(125);
    assert_close(c.frame(4).unwrap().width, 50.0);
    assert_close(c.frame(5).unwrap().x, 472.5);

    let mut indexes = Vec::new();
    c.for_each_visible_frame(|i, _| indexes.push(i));
    assert_eq!(indexes.first(), Some(&0));

    c.tick(250);
    assert!(!c.is_removing());
    assert!(!c.is_animating());
    assert_eq!(c.layout().count(), 9);
    assert_close(c.frame(4).unwrap().x, 422.0);
    assert_close(c.content_offset(), -239.0);
}

#[test]
fn removing_the_center_moves_the_display_to_its_successor() {
    let mut c = controller(10, 2);
    assert!(c.notify_item_removed(2, 0));
    c.tick(1000);
    assert_eq!(c.layout().center(), 2);
    assert_eq!(
        c.layout_mut().take_events(),
        [LayoutEvent::DisplayedIndexChanged { index: 2 }]
    );
}

#[test]
fn removal_during_a_style_animation_applies_immediately() {
    let mut c = controller(10, 2);
    c.select_item(4, 0);
    assert!(c.notify_item_removed(0, 10));
    assert!(!c.is_animating());
    assert!(!c.is_removing());
    assert_eq!(c.layout().count(), 9);
    assert_eq!(c.layout().center(), 3);
    assert_close(
        c.content_offset(),
        c.layout().content_offset_for_item(3).unwrap(),
    );
}

#[test]
fn style_changes_are_refused_during_a_removal() {
    let mut c = controller(10, 2);
    c.notify_item_removed(4, 0);
    assert!(!c.set_style(Style::Flow, true, 10));
    assert!(!c.select_item(1, 10));
    assert!(!c.set_center(1, false, 10));
    assert_eq!(c.scroll_to_item(3, 0.5), None);
    assert_eq!(c.layout().style(), Style::Carousel);
}

#[test]
fn second_removal_finalizes_the_first() {
    let mut c = controller(10, 2);
    c.notify_item_removed(9, 0);
    assert!(c.notify_item_removed(8, 10));
    assert_eq!(c.layout().count(), 9);
    c.tick(1000);
    assert_eq!(c.layout().count(), 8);

    assert!(!c.notify_item_removed(8, 2000));
}

#[test]
fn removal_during_a_drag_keeps_the_drag_alive() {
    let mut c = controller(10, 2);
    c.begin_drag(-239.0);
    assert!(c.notify_item_removed(0, 0));
    assert_eq!(c.layout().count(), 9);
    assert_eq!(c.interaction(), Interaction::Dragging { center_before: 1 });
    assert!(c.end_deceleration(0));
    assert_eq!(c.layout().style(), Style::Carousel);
}

#[test]
fn bounds_change_keeps_the_center_centered() {
    let mut c = controller(10, 2);
    assert!(c.notify_bounds_changed(Size::new(600.0, 52.0)));
    // origin 111, mid 136, minus half of 600
    assert_close(c.content_offset(), -164.0);
    assert!(!c.notify_bounds_changed(Size::new(600.0, 52.0)));
}

#[test]
fn measuring_the_center_recenters_an_idle_strip() {
    let mut c = controller(10, 2);
    assert!(c.notify_item_measured(2, 2.0));
    // width 200 from origin 211
    assert_close(c.content_offset(), -189.0);
    assert!(!c.notify_item_measured(2, 2.0));
    assert!(!c.notify_item_measured(5, 2.0));
}

#[test]
fn measuring_the_center_mid_animation_retargets_the_settle() {
    let mut c = controller(10, 2);
    c.select_item(4, 0);
    c.tick(100);
    assert!(c.notify_item_measured(4, 2.0));
    assert!(c.is_animating());

    c.tick(300);
    assert!(!c.is_animating());
    // origin 413, width 200, mid 513
    assert_close(c.content_offset(), 13.0);
    assert_close(
        c.content_offset(),
        c.layout().focus_content_offset().unwrap(),
    );
    assert_close(c.frame(4).unwrap().width, 200.0);
}

#[test]
fn standalone_hosts_drain_events_through_the_controller() {
    let mut c = controller(10, 2);
    c.begin_drag(-239.0);
    c.end_drag(75.0);
    for step in 0..=10 {
        c.on_scroll(-248.0 + step as f32 * 30.0);
    }
    let mut drained = 0;
    c.drain_events(|event| {
        assert!(matches!(
            event,
            LayoutEvent::TransitionProgressChanged { index: 5, .. }
        ));
        drained += 1;
    });
    assert_eq!(drained, 12);
    assert!(!c.layout().has_pending_events());

    c.end_deceleration(0);
    assert_eq!(
        c.take_events().last(),
        Some(&LayoutEvent::DisplayedIndexChanged { index: 5 })
    );
    assert!(c.take_events().is_empty());
}

#[test]
fn anchor_tracks_the_item_under_the_viewport_center() {
    let layout = CarouselLayout::new(options(10, 2));
    let anchor = capture_center_anchor(&layout, -239.0).unwrap();
    assert_eq!(anchor.index, 2);
    assert_close(anchor.fraction, 0.5);
    assert_close(apply_anchor(&layout, &anchor).unwrap(), -239.0);

    let empty = CarouselLayout::new(options(0, 0));
    assert_eq!(capture_center_anchor(&empty, 0.0), None);
}

#[test]
fn needs_pager_reload_only_at_the_ends() {
    assert!(needs_pager_reload(2, 0, 10));
    assert!(needs_pager_reload(0, 1, 10));
    assert!(needs_pager_reload(8, 9, 10));
    assert!(needs_pager_reload(9, 8, 10));
    assert!(!needs_pager_reload(3, 4, 10));
    assert!(!needs_pager_reload(1, 2, 0));
}

#[test]
fn pager_progress_drives_the_strip_without_echo() {
    let mut c = coordinator(10, 2);
    let offset = c.on_pager_progress(ScrollDirection::Forward, 0.5).unwrap();
    assert_close(offset, -188.5);
    assert_eq!(c.strip().layout().transition().target, 3);

    assert!(c.on_pager_settled(3).is_some());
    assert_eq!(c.strip().layout().center(), 3);
    assert_eq!(c.displayed_index(), 3);
    assert!(take_calls(&mut c).is_empty());
}

#[test]
fn pager_progress_past_an_end_is_ignored() {
    let mut c = coordinator(10, 0);
    assert_eq!(c.on_pager_progress(ScrollDirection::Backward, 0.5), None);
    assert!(!c.strip().layout().is_transitioning());

    let mut c = coordinator(10, 9);
    assert_eq!(c.on_pager_progress(ScrollDirection::Forward, 0.5), None);
}

#[test]
fn strip_taps_show_pages_and_reload_near_the_ends() {
    let mut c = coordinator(10, 2);
    c.with_strip(|s| s.select_item(0, 0));
    assert_eq!(
        take_calls(&mut c),
        [PagerCall::Show(0), PagerCall::Reload(0)]
    );

    c.with_strip(|s| s.select_item(1, 0));
    assert_eq!(
        take_calls(&mut c),
        [PagerCall::Show(1), PagerCall::Reload(1)]
    );

    c.with_strip(|s| s.select_item(5, 0));
    assert_eq!(take_calls(&mut c), [PagerCall::Show(5)]);
    assert_eq!(c.displayed_index(), 5);
}

#[test]
fn strip_drag_progress_is_relayed_to_the_pager() {
    let mut c = coordinator(10, 2);
    c.with_strip(|s| {
        s.begin_drag(-239.0);
        s.end_drag(75.0);
    });
    c.with_strip(|s| s.on_scroll(-248.0 + 0.5 * (55.0 + 248.0)));
    c.with_strip(|s| s.end_deceleration(0));
    assert!(c.tick(1000).is_some());

    assert_eq!(
        take_calls(&mut c),
        [
            PagerCall::Progress(5, 0.0),
            PagerCall::Progress(5, 0.5),
            PagerCall::Progress(5, 1.0),
            PagerCall::Show(5),
        ]
    );
}
