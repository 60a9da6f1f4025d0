//! Pure gesture math: gesture-start snapshot + pointer position → geometry patch.
//!
//! Nothing here touches the store. Every intermediate geometry of a gesture
//! is a function of the immutable start snapshot and the current pointer, so
//! replaying or coalescing move events always lands on the same result.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_OVERLAY_SIZE_PX;
use crate::geometry::{Dimension, Geometry, GeometryPatch};
use crate::viewport::Point;

/// What a gesture does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    /// Move the top-left corner.
    Translate,
    /// Change width and height from the bottom-right handle.
    Resize,
}

/// Unit-stripped pixel values of a geometry at gesture start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelSnapshot {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
}

impl PixelSnapshot {
    /// Capture the pixel magnitudes of `geometry`.
    ///
    /// A field that has no pixel value (a percentage) counts as `0`, so the
    /// gesture loop never fails on mixed-unit geometry.
    #[must_use]
    pub fn of(geometry: &Geometry) -> Self {
        let px = |d: Dimension| d.as_pixels().unwrap_or(0.0);
        Self {
            width: px(geometry.width),
            height: px(geometry.height),
            top: px(geometry.top),
            left: px(geometry.left),
        }
    }
}

/// Compute the patch for a pointer at `current` in a gesture that began at
/// `start` with `snapshot`. Deltas are measured from gesture start, never
/// from the previous move.
///
/// Output is always in pixels.
#[must_use]
pub fn apply(kind: GestureKind, snapshot: &PixelSnapshot, start: Point, current: Point) -> GeometryPatch {
    let dx = current.x - start.x;
    let dy = current.y - start.y;
    match kind {
        GestureKind::Translate => {
            GeometryPatch::position(Dimension::px(snapshot.top + dy), Dimension::px(snapshot.left + dx))
        }
        GestureKind::Resize => GeometryPatch::size(
            Dimension::px((snapshot.width + dx).max(MIN_OVERLAY_SIZE_PX)),
            Dimension::px((snapshot.height + dy).max(MIN_OVERLAY_SIZE_PX)),
        ),
    }
}
