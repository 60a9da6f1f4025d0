//! Input model: the gesture target and the placement state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. Each active variant carries everything needed to compute the
//! next geometry from the pointer alone: the target pair, the pointer at
//! gesture start, and the pixel snapshot taken at that moment. Translating
//! and resizing are separate variants, so both at once cannot be expressed.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::catalog::{BackgroundId, OverlayId};
use crate::gesture::{GestureKind, PixelSnapshot};
use crate::viewport::Point;

/// The overlay a gesture acts on, captured at pointer-down.
///
/// Kept as an id pair rather than a reference: the overlay may be deleted
/// while the gesture is still live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GestureTarget {
    pub background_id: BackgroundId,
    pub overlay_id: OverlayId,
}

impl GestureTarget {
    #[must_use]
    pub fn new(background_id: impl Into<BackgroundId>, overlay_id: impl Into<OverlayId>) -> Self {
        Self { background_id: background_id.into(), overlay_id: overlay_id.into() }
    }
}

/// Context of an in-progress gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    /// Overlay being moved or resized.
    pub target: GestureTarget,
    /// Screen-space pointer position at pointer-down.
    pub start: Point,
    /// Target geometry in pixels at pointer-down.
    pub snapshot: PixelSnapshot,
}

/// Internal state for the placement state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The overlay body was grabbed and is following the pointer.
    Translating(Gesture),
    /// The resize handle was grabbed; width and height follow the pointer.
    Resizing(Gesture),
}

impl InputState {
    /// Start state for a gesture of `kind`.
    #[must_use]
    pub fn begin(kind: GestureKind, gesture: Gesture) -> Self {
        match kind {
            GestureKind::Translate => Self::Translating(gesture),
            GestureKind::Resize => Self::Resizing(gesture),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The active gesture and its kind, if any.
    #[must_use]
    pub fn active(&self) -> Option<(GestureKind, &Gesture)> {
        match self {
            Self::Idle => None,
            Self::Translating(g) => Some((GestureKind::Translate, g)),
            Self::Resizing(g) => Some((GestureKind::Resize, g)),
        }
    }

    /// Target of the active gesture, if any.
    #[must_use]
    pub fn target(&self) -> Option<&GestureTarget> {
        self.active().map(|(_, g)| &g.target)
    }
}
