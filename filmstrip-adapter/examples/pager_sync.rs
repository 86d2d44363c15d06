use filmstrip::{ScrollDirection, Size, StripOptions};
use filmstrip_adapter::{PagerSync, ScrollCoordinator, StripController};

// Example: keep a pager and the strip in lockstep.
#[derive(Debug, Default)]
struct PrintPager;

impl PagerSync for PrintPager {
    fn show_page(&mut self, index: usize) {
        println!("pager: show {index}");
    }

    fn set_transition_progress(&mut self, index: usize, progress: f32) {
        println!("pager: fade toward {index} ({progress:.2})");
    }

    fn reload_adjacent_pages(&mut self, index: usize) {
        println!("pager: reload around {index}");
    }
}

fn main() {
    let strip = StripController::new(
        StripOptions::new(5).with_initial_bounds(Some(Size::new(390.0, 44.0))),
    );
    let mut c = ScrollCoordinator::new(strip, PrintPager);

    // The pager drives the strip; nothing is echoed back.
    for step in 1..=4 {
        let offset = c.on_pager_progress(ScrollDirection::Forward, step as f32 / 4.0);
        println!("strip offset={offset:?}");
    }
    c.on_pager_settled(1);

    // The strip drives the pager.
    c.with_strip(|s| s.select_item(4, 0));
    while c.tick(1_000).is_some() {}
    println!("displayed={}", c.displayed_index());
}
