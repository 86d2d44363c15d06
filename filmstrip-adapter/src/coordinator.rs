use filmstrip::{LayoutEvent, ScrollDirection};

use crate::StripController;

/// The paging view that shows one full-size item at a time next to the strip.
pub trait PagerSync {
    /// Makes `index` the visible page.
    fn show_page(&mut self, index: usize);

    /// Cross-fades toward page `index` by `progress` in `[0, 1]`.
    fn set_transition_progress(&mut self, index: usize, progress: f32);

    /// Rebuilds the cached neighbours of page `index`.
    fn reload_adjacent_pages(&mut self, index: usize);
}

/// Whether moving the displayed page from `previous` to `next` requires the pager to rebuild
/// its neighbours: true when either index sits at an end of a `count`-item strip.
pub fn needs_pager_reload(previous: usize, next: usize, count: usize) -> bool {
    let Some(last) = count.checked_sub(1) else {
        return false;
    };
    let at_end = |index: usize| index == 0 || index == last;
    at_end(next) || at_end(previous)
}

/// Which side started the change being relayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    Strip,
    Pager,
}

/// Keeps a [`StripController`] and a pager in lockstep.
///
/// Pager scroll progress drives the strip's transition; strip outcomes (drags, taps,
/// removals) are relayed to the pager. Changes that came from the pager are never echoed
/// back to it.
#[derive(Debug)]
pub struct ScrollCoordinator<P> {
    strip: StripController,
    pager: P,
    displayed: usize,
}

impl<P: PagerSync> ScrollCoordinator<P> {
    pub fn new(strip: StripController, pager: P) -> Self {
        let displayed = strip.layout().center();
        Self {
            strip,
            pager,
            displayed,
        }
    }

    pub fn strip(&self) -> &StripController {
        &self.strip
    }

    pub fn pager(&self) -> &P {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut P {
        &mut self.pager
    }

    pub fn into_parts(self) -> (StripController, P) {
        (self.strip, self.pager)
    }

    /// The page index last reported as displayed.
    pub fn displayed_index(&self) -> usize {
        self.displayed
    }

    /// The pager scrolled `progress` of the way toward its neighbour in `direction`.
    ///
    /// Ignored past either end. Returns the strip's new content offset.
    pub fn on_pager_progress(&mut self, direction: ScrollDirection, progress: f32) -> Option<f32> {
        let layout = self.strip.layout();
        let target = direction.step(layout.center(), layout.count())?;
        let offset = self.strip.scroll_to_item(target, progress);
        self.relay(Origin::Pager);
        offset
    }

    /// The pager came to rest on `index`.
    pub fn on_pager_settled(&mut self, index: usize) -> Option<f32> {
        let offset = self.strip.scroll_to_item(index, 1.0);
        self.relay(Origin::Pager);
        offset
    }

    /// Runs `f` against the strip, then relays its outcome to the pager.
    ///
    /// Use this for every strip-side input: gestures, taps, removals and ticks.
    pub fn with_strip<R>(&mut self, f: impl FnOnce(&mut StripController) -> R) -> R {
        let result = f(&mut self.strip);
        self.relay(Origin::Strip);
        result
    }

    /// Advances the strip's animation and relays its outcome.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.with_strip(|strip| strip.tick(now_ms))
    }

    fn relay(&mut self, origin: Origin) {
        let events = self.strip.take_events();
        let count = self.strip.layout().count();
        for event in events {
            match event {
                LayoutEvent::TransitionProgressChanged { index, progress } => {
                    if origin == Origin::Strip {
                        self.pager.set_transition_progress(index, progress);
                    }
                }
                LayoutEvent::DisplayedIndexChanged { index } => {
                    let previous = core::mem::replace(&mut self.displayed, index);
                    if origin == Origin::Pager {
                        continue;
                    }
                    ftrace!(previous, index, "relay: show_page");
                    self.pager.show_page(index);
                    if needs_pager_reload(previous, index, count) {
                        self.pager.reload_adjacent_pages(index);
                    }
                }
            }
        }
    }
}
