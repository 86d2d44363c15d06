use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Ratios closer than this are treated as the same measurement.
const RATIO_EPSILON: f32 = 1e-4;

/// Preferred aspect ratios (`width / height`) reported by item content, keyed by index.
///
/// Only [`crate::CarouselLayout`] mutates the cache; the geometry engine reads it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AspectRatioCache {
    ratios: BTreeMap<usize, f32>,
}

impl AspectRatioCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.ratios.get(&index).copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.ratios.contains_key(&index)
    }

    /// Stores a ratio. Returns `true` when the cached value actually changed.
    ///
    /// Non-finite and non-positive ratios are rejected.
    pub fn insert(&mut self, index: usize, ratio: f32) -> bool {
        if !is_valid_ratio(ratio) {
            return false;
        }
        if let Some(prev) = self.ratios.get(&index) {
            let delta = prev - ratio;
            if delta < RATIO_EPSILON && delta > -RATIO_EPSILON {
                return false;
            }
        }
        self.ratios.insert(index, ratio);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<f32> {
        self.ratios.remove(&index)
    }

    pub fn clear(&mut self) {
        self.ratios.clear();
    }

    /// Drops the entry at `index` and shifts every entry above it down by one.
    pub fn remove_and_shift(&mut self, index: usize) {
        let mut above = self.ratios.split_off(&index);
        above.remove(&index);
        self.ratios
            .extend(above.into_iter().map(|(i, ratio)| (i - 1, ratio)));
    }

    /// Drops every entry at or above `count`.
    pub fn truncate(&mut self, count: usize) {
        drop(self.ratios.split_off(&count));
    }

    /// Iterates over the cached ratios in index order without allocations.
    pub fn for_each(&self, mut f: impl FnMut(usize, f32)) {
        for (&index, &ratio) in self.ratios.iter() {
            f(index, ratio);
        }
    }

    /// Exports the cache as a `Vec` (useful for persistence).
    pub fn export(&self) -> Vec<(usize, f32)> {
        let mut out = Vec::with_capacity(self.ratios.len());
        self.for_each(|index, ratio| out.push((index, ratio)));
        out
    }
}

pub(crate) fn is_valid_ratio(ratio: f32) -> bool {
    ratio.is_finite() && ratio > 0.0
}
