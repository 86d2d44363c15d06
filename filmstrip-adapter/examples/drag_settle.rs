use filmstrip::{LayoutEvent, Size, StripOptions};
use filmstrip_adapter::{DragEnd, StripController};

fn main() {
    // Example: a host view driving the strip through a drag, a deceleration snap and the
    // animated settle back to carousel, without holding any UI objects.
    //
    // A host would:
    // - forward gesture and scroll callbacks to the controller
    // - call tick(now_ms) in a frame loop while is_animating()
    // - apply the returned offset to its scroll view and render the frames
    let mut c = StripController::new(
        StripOptions::new(200)
            .with_initial_bounds(Some(Size::new(390.0, 44.0)))
            .with_initial_center(20),
    );

    let start = c.begin_drag(c.content_offset());
    println!("drag start: offset={} adjustment={}", start.content_offset, start.adjustment);

    let mut offset = start.content_offset;
    for _ in 0..10 {
        offset += 12.0;
        c.drag_moved(offset);
    }

    match c.end_drag(offset + 240.0) {
        DragEnd::Snap { index, offset: target } => {
            println!("snap to {index} at {target}");
            let mut now = offset;
            while now < target {
                now = (now + 24.0).min(target);
                c.on_scroll(now);
                println!("  scroll={now:.1} progress={:.2}", c.layout().transition().progress);
            }
        }
        other => println!("no snap: {other:?}"),
    }

    c.end_deceleration(0);
    let mut now_ms = 0u64;
    while let Some(off) = c.tick(now_ms) {
        if now_ms % 64 == 0 {
            println!("t={now_ms} off={off:.1} center_frame={:?}", c.frame(c.layout().center()));
        }
        now_ms += 16;
    }

    c.layout_mut().drain_events(|event| match event {
        LayoutEvent::DisplayedIndexChanged { index } => println!("displayed {index}"),
        LayoutEvent::TransitionProgressChanged { index, progress } => {
            println!("progress {index} {progress:.2}")
        }
    });
}
