use crate::Style;

/// A lightweight, serializable snapshot of the browsing position.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
///
/// This is useful for restoring the strip across sessions without coupling the layout to
/// any specific UI framework. Aspect ratios are persisted separately through
/// [`crate::CarouselLayout::export_aspect_ratios`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutState {
    pub style: Style,
    pub center: usize,
}
