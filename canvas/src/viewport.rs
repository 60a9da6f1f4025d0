#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

/// A point in either screen or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the fixed-size preview canvas, in screen pixels.
///
/// The host reads it from the DOM each frame (`getBoundingClientRect`).
/// Geometry is positioned relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Whether a screen-space point lies inside the canvas (edges inclusive).
    #[must_use]
    pub fn contains(&self, screen: Point) -> bool {
        screen.x >= self.left
            && screen.x <= self.left + self.width
            && screen.y >= self.top
            && screen.y <= self.top + self.height
    }

    /// Convert a screen-space point to canvas-local coordinates.
    #[must_use]
    pub fn to_local(&self, screen: Point) -> Point {
        Point { x: screen.x - self.left, y: screen.y - self.top }
    }
}
