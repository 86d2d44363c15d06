/// Layout mode of the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    /// Uniform item width and spacing. Used while scrubbing.
    Flow,
    /// The center (and transition target) item grows toward its preferred width.
    #[default]
    Carousel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Index one step away from `index` in this direction, if it exists.
    pub fn step(self, index: usize, count: usize) -> Option<usize> {
        match self {
            Self::Forward => index.checked_add(1).filter(|&i| i < count),
            Self::Backward => index.checked_sub(1).filter(|&i| i < count),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An item rectangle in strip content coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Linear interpolation between two frames (`t = 0` is `self`).
    pub fn lerp(&self, to: &Frame, t: f32) -> Frame {
        Frame {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            width: lerp(self.width, to.width, t),
            height: lerp(self.height, to.height, t),
        }
    }
}

/// An interpolation from the center item toward `target`.
///
/// `progress == 0` is fully at the center, `progress == 1` fully at the target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub target: usize,
    pub progress: f32,
}

impl Transition {
    /// The no-op transition used between interactions.
    pub const fn at(center: usize) -> Self {
        Self {
            target: center,
            progress: 0.0,
        }
    }
}

/// Notifications produced by [`crate::CarouselLayout`], drained with
/// [`crate::CarouselLayout::drain_events`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutEvent {
    /// The committed center item changed (or its content did, after a delete).
    DisplayedIndexChanged { index: usize },
    /// The active transition moved. Pagers use this to cross-fade.
    TransitionProgressChanged { index: usize, progress: f32 },
}

pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

pub(crate) fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}
