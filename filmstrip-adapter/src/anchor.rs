use filmstrip::CarouselLayout;

/// A scroll anchor that preserves the focused position across geometry changes.
///
/// Typical use cases:
/// - container resize/rotation, where every item changes width
/// - re-centering after the expanded item reports a new aspect ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnchor {
    /// The item under the viewport's center.
    pub index: usize,
    /// Where the viewport's center sits within that item, as a fraction of its width.
    ///
    /// `0.5` is the item's midpoint; values past `1.0` fall in the trailing gap.
    pub fraction: f32,
}

/// Captures the item under the viewport's center at `content_offset`.
///
/// Returns `None` when the strip is empty.
pub fn capture_center_anchor(layout: &CarouselLayout, content_offset: f32) -> Option<ScrollAnchor> {
    let geometry = layout.geometry();
    let focus = content_offset + geometry.offset_adjustment();
    let index = geometry.index_at_x(focus)?;
    let frame = geometry.frame(index)?;
    let fraction = if frame.width > 0.0 {
        (focus - frame.x) / frame.width
    } else {
        0.5
    };
    Some(ScrollAnchor { index, fraction })
}

/// Computes the content offset that puts the anchored position back under the viewport's
/// center in the layout's current geometry.
///
/// Returns `None` when the strip is empty; the anchor index is clamped.
pub fn apply_anchor(layout: &CarouselLayout, anchor: &ScrollAnchor) -> Option<f32> {
    let geometry = layout.geometry();
    let frame = geometry.frame(anchor.index)?;
    Some(frame.x + anchor.fraction * frame.width - geometry.offset_adjustment())
}
