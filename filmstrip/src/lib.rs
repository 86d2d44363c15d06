//! A headless carousel layout engine for photo-browser thumbnail strips.
//!
//! For adapter-level utilities (drag snapping, animations, pager sync), see the
//! `filmstrip-adapter` crate.
//!
//! The strip lays out an ordered image collection horizontally in one of two styles:
//! - [`Style::Flow`]: every item has the same width, so offsets map to indexes exactly.
//! - [`Style::Carousel`]: the center item grows toward its content's preferred aspect ratio.
//!
//! A [`Transition`] interpolates between two centers with a progress in `[0, 1]`, and a
//! single-item removal re-flows its neighbours without a jump.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - container bounds
//! - preferred aspect ratios reported by item content
//! - transition progress (from gestures or a synchronized pager)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod aspect;
mod geometry;
mod layout;
mod metrics;
mod options;
mod phase;
mod state;
mod types;


pub use aspect::AspectRatioCache;
pub use geometry::{Geometry, LayoutSnapshot};
pub use layout::CarouselLayout;
pub use metrics::Metrics;
pub use options::{OnChangeCallback, StripOptions};
pub use phase::{DeleteOperation, LayoutPhase, RemovalAnimation, RemovalFrame};
pub use state::LayoutState;
pub use types::{Frame, LayoutEvent, ScrollDirection, Size, Style, Transition};
