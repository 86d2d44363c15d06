//! Adapter utilities for the `filmstrip` crate.
//!
//! The `filmstrip` crate is UI-agnostic and only computes geometry. This crate adds the
//! framework-neutral pieces a host view needs around it:
//!
//! - [`StripController`]: drag, snap, bounce and tap handling plus tween-driven style and
//!   removal animations
//! - [`ScrollCoordinator`]: keeps the strip and a full-size pager in lockstep
//! - Scroll anchoring across bounds changes
//!
//! This crate is intentionally framework-agnostic (no UI toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod coordinator;
mod tween;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchor, apply_anchor, capture_center_anchor};
pub use controller::{ControllerOptions, DragEnd, DragStart, Interaction, StripController};
pub use coordinator::{PagerSync, ScrollCoordinator, needs_pager_reload};
pub use tween::{Easing, Tween};
