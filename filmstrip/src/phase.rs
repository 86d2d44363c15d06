use crate::Transition;

/// The in-flight single-item removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeleteOperation {
    /// Index of the removed item, in the pre-removal index space.
    pub deleting_index: usize,
    /// The center that survives the removal, in the pre-removal index space.
    pub center_before: usize,
}

impl DeleteOperation {
    /// Captures the surviving center before the item at `deleting_index` is removed.
    ///
    /// When the center itself is removed, its right neighbour takes over (or the left one
    /// when the center was the last item).
    pub fn resolve(deleting_index: usize, center: usize, count: usize) -> Self {
        let center_before = if deleting_index == center {
            if center + 1 < count {
                center + 1
            } else {
                center.saturating_sub(1)
            }
        } else {
            center
        };
        Self {
            deleting_index,
            center_before,
        }
    }

    /// The surviving center in the post-removal index space.
    pub fn center_after(&self) -> usize {
        self.new_index(self.center_before)
            .unwrap_or(self.center_before)
    }

    /// Maps a pre-removal index to its post-removal index (`None` for the removed item).
    pub fn new_index(&self, old_index: usize) -> Option<usize> {
        match old_index.cmp(&self.deleting_index) {
            core::cmp::Ordering::Less => Some(old_index),
            core::cmp::Ordering::Equal => None,
            core::cmp::Ordering::Greater => Some(old_index - 1),
        }
    }

    /// Whether the removed item sat next to the surviving center.
    pub fn is_adjacent_to_center(&self) -> bool {
        self.deleting_index.abs_diff(self.center_before) <= 1
    }
}

/// What the layout is doing right now. Exactly one phase is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutPhase {
    /// Fully at the committed center.
    #[default]
    Steady,
    /// Interpolating from the committed center toward `target`.
    Transitioning { target: usize, progress: f32 },
    /// A removal is animating; geometry still uses pre-removal indices.
    Deleting(DeleteOperation),
}

impl LayoutPhase {
    /// The active transition, or the no-op transition at `center`.
    pub fn transition(&self, center: usize) -> Transition {
        match *self {
            Self::Transitioning { target, progress } => Transition { target, progress },
            Self::Steady | Self::Deleting(_) => Transition::at(center),
        }
    }

    pub fn is_steady(&self) -> bool {
        matches!(self, Self::Steady)
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }

    pub fn deletion(&self) -> Option<DeleteOperation> {
        match *self {
            Self::Deleting(op) => Some(op),
            _ => None,
        }
    }
}

/// Start and end offsets of a removal animation, returned by
/// [`crate::CarouselLayout::begin_removal`].
///
/// Per-item frames are read from [`crate::CarouselLayout::removal_frame`] while the removal
/// is in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemovalAnimation {
    pub operation: DeleteOperation,
    pub from_offset: f32,
    pub to_offset: f32,
}

/// Animated frames of one pre-removal index.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemovalFrame {
    /// Index in the pre-removal index space.
    pub index: usize,
    pub from: crate::Frame,
    /// Zero width for the removed item.
    pub to: crate::Frame,
}
