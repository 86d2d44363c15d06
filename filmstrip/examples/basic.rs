// Example: lay out a carousel strip, scrub a transition and remove an item.
use filmstrip::{CarouselLayout, Size, StripOptions, Style};

fn main() {
    let mut layout = CarouselLayout::new(
        StripOptions::new(1_000)
            .with_initial_bounds(Some(Size::new(390.0, 44.0)))
            .with_initial_center(10),
    );
    for index in 0..20 {
        layout.notify_item_measured(index, if index % 3 == 0 { 1.5 } else { 0.75 });
    }
    layout.notify_item_measured(10, 1.5);

    let offset = layout.focus_content_offset().unwrap_or(0.0);
    println!("content_width={} offset={offset}", layout.content_width());
    layout.for_each_visible_frame(offset, |i, frame| {
        println!("  {i}: x={:.1} w={:.1}", frame.x, frame.width);
    });

    for step in 0..=4 {
        let progress = step as f32 / 4.0;
        layout.begin_transition(11, progress);
        println!(
            "progress={progress} focus={:?} center={}",
            layout.focus_content_offset(),
            layout.center()
        );
    }

    if let Some(removal) = layout.begin_removal(11) {
        layout.for_each_removal_frame(&removal, |frame| {
            println!(
                "  remove {}: x {:.1} -> {:.1}, w {:.1} -> {:.1}",
                frame.index, frame.from.x, frame.to.x, frame.from.width, frame.to.width
            );
        });
        layout.finish_removal();
    }
    println!("events={:?}", layout.take_events());

    layout.set_style(Style::Flow);
    println!("flow offset for 500={:?}", layout.content_offset_for_item(500));
}
