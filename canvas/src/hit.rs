#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::catalog::{Background, Overlay, OverlayId};
use crate::consts::RESIZE_HANDLE_PX;
use crate::gesture::GestureKind;
use crate::viewport::Point;

/// Which part of an overlay was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle,
}

impl HitPart {
    /// The gesture a pointer-down on this part starts.
    #[must_use]
    pub fn gesture_kind(self) -> GestureKind {
        match self {
            Self::Body => GestureKind::Translate,
            Self::ResizeHandle => GestureKind::Resize,
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub overlay_id: OverlayId,
    pub part: HitPart,
}

/// Axis-aligned box of an overlay in canvas-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Resolve an overlay's geometry against the canvas size. Percentages
    /// are taken of the canvas width (horizontal fields) or height (vertical).
    #[must_use]
    pub fn of(overlay: &Overlay, canvas_width: f64, canvas_height: f64) -> Self {
        let g = &overlay.geometry;
        Self {
            x: g.left.resolve(canvas_width),
            y: g.top.resolve(canvas_height),
            width: g.width.resolve(canvas_width),
            height: g.height.resolve(canvas_height),
        }
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    /// The resize handle square, anchored inside the bottom-right corner.
    /// On overlays smaller than the handle it shrinks to the overlay itself.
    #[must_use]
    pub fn handle(&self) -> Self {
        let width = RESIZE_HANDLE_PX.min(self.width.max(0.0));
        let height = RESIZE_HANDLE_PX.min(self.height.max(0.0));
        Self { x: self.x + self.width - width, y: self.y + self.height - height, width, height }
    }
}

/// Find the overlay under `local_pt` on `background`.
///
/// Later overlays are drawn on top, so they are tested first. Within one
/// overlay the handle wins over the body it sits on.
#[must_use]
pub fn hit_test(local_pt: Point, background: &Background, canvas_width: f64, canvas_height: f64) -> Option<Hit> {
    background.overlays.iter().rev().find_map(|overlay| {
        let bounds = Bounds::of(overlay, canvas_width, canvas_height);
        let part = if bounds.handle().contains(local_pt) {
            HitPart::ResizeHandle
        } else if bounds.contains(local_pt) {
            HitPart::Body
        } else {
            return None;
        };
        Some(Hit { overlay_id: overlay.id.clone(), part })
    })
}
