use crate::{Size, StripOptions};

/// Share of the uniform width kept below `3 * uniform + min_spacing` by the maximum width, so
/// neighbouring carousel offsets differ even with zero spacing.
const MAX_WIDTH_MARGIN: f32 = 0.01;

/// Bounds-derived geometry constants.
///
/// Resolved from [`StripOptions`] and the container bounds; every value is finite and
/// non-negative, with `max_width >= uniform_width` and `max_spacing >= min_spacing`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub viewport_width: f32,
    /// Top edge of every item.
    pub item_y: f32,
    pub item_height: f32,
    /// Width of every item in flow style, and of non-expanded items in carousel style.
    pub uniform_width: f32,
    pub max_width: f32,
    pub min_spacing: f32,
    pub max_spacing: f32,
}

impl Metrics {
    pub fn resolve(bounds: Size, options: &StripOptions) -> Self {
        let viewport_width = sanitize(bounds.width);
        let padding = sanitize(options.vertical_padding);
        let item_height = (sanitize(bounds.height) - 2.0 * padding).max(0.0);
        let uniform_width = item_height * sanitize(options.min_width_ratio);
        let min_spacing = sanitize(options.min_spacing);
        let max_spacing = sanitize(options.max_spacing).max(min_spacing);
        let max_width = (uniform_width * sanitize(options.max_width_multiple))
            .max(uniform_width)
            .min((3.0 - MAX_WIDTH_MARGIN) * uniform_width + min_spacing);

        Self {
            viewport_width,
            item_y: padding.min(sanitize(bounds.height)),
            item_height,
            uniform_width,
            max_width,
            min_spacing,
            max_spacing,
        }
    }

    /// Distance between the origins of two neighbouring uniform items.
    pub fn stride(&self) -> f32 {
        self.uniform_width + self.min_spacing
    }

    /// Width an item grows to when fully expanded in carousel style.
    ///
    /// Items without a known aspect ratio stay at the uniform width.
    pub fn preferred_width(&self, aspect_ratio: Option<f32>) -> f32 {
        match aspect_ratio {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => {
                (ratio * self.item_height).clamp(self.uniform_width, self.max_width)
            }
            _ => self.uniform_width,
        }
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
