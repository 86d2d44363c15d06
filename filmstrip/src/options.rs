use alloc::sync::Arc;

use crate::layout::CarouselLayout;
use crate::{Size, Style};

/// A callback fired when the layout changes in a way that requires a new layout pass.
pub type OnChangeCallback = Arc<dyn Fn(&CarouselLayout) + Send + Sync>;

/// Configuration for [`crate::CarouselLayout`].
///
/// The geometry fields are resolved against the container bounds into [`crate::Metrics`]
/// every time the bounds change.
#[derive(Clone)]
pub struct StripOptions {
    /// Number of items in the strip.
    pub count: usize,

    /// Space above and below every item. Item height is `bounds.height - 2 * vertical_padding`.
    pub vertical_padding: f32,

    /// Uniform (minimum) item width as a fraction of item height.
    pub min_width_ratio: f32,

    /// Maximum item width as a multiple of the uniform width.
    ///
    /// The resolved maximum is additionally capped just below `3 * uniform + min_spacing` so that
    /// carousel content offsets stay strictly increasing.
    pub max_width_multiple: f32,

    /// Spacing between items that are neither the center nor the transition target.
    pub min_spacing: f32,
    /// Spacing next to the center and transition target items.
    pub max_spacing: f32,

    /// Extra items reported before/after the viewport by visible-frame iteration.
    pub overscan: usize,

    pub initial_style: Style,
    pub initial_center: usize,
    /// The container bounds known at construction time, if any.
    pub initial_bounds: Option<Size>,

    /// Optional callback fired when a new layout pass is required.
    pub on_change: Option<OnChangeCallback>,
}

impl StripOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            vertical_padding: 1.0,
            min_width_ratio: 0.5,
            max_width_multiple: 3.0,
            min_spacing: 1.0,
            max_spacing: 12.0,
            overscan: 1,
            initial_style: Style::Carousel,
            initial_center: 0,
            initial_bounds: None,
            on_change: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_vertical_padding(mut self, vertical_padding: f32) -> Self {
        self.vertical_padding = vertical_padding;
        self
    }

    pub fn with_min_width_ratio(mut self, min_width_ratio: f32) -> Self {
        self.min_width_ratio = min_width_ratio;
        self
    }

    pub fn with_max_width_multiple(mut self, max_width_multiple: f32) -> Self {
        self.max_width_multiple = max_width_multiple;
        self
    }

    pub fn with_spacing(mut self, min_spacing: f32, max_spacing: f32) -> Self {
        self.min_spacing = min_spacing;
        self.max_spacing = max_spacing;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_style(mut self, style: Style) -> Self {
        self.initial_style = style;
        self
    }

    pub fn with_initial_center(mut self, center: usize) -> Self {
        self.initial_center = center;
        self
    }

    pub fn with_initial_bounds(mut self, bounds: Option<Size>) -> Self {
        self.initial_bounds = bounds;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&CarouselLayout) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for StripOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

impl core::fmt::Debug for StripOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StripOptions")
            .field("count", &self.count)
            .field("vertical_padding", &self.vertical_padding)
            .field("min_width_ratio", &self.min_width_ratio)
            .field("max_width_multiple", &self.max_width_multiple)
            .field("min_spacing", &self.min_spacing)
            .field("max_spacing", &self.max_spacing)
            .field("overscan", &self.overscan)
            .field("initial_style", &self.initial_style)
            .field("initial_center", &self.initial_center)
            .field("initial_bounds", &self.initial_bounds)
            .finish_non_exhaustive()
    }
}
