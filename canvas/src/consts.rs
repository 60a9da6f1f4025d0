//! Shared numeric constants for the canvas crate.

// ── Placement ───────────────────────────────────────────────────

/// Smallest width or height a resize gesture may produce, in pixels.
pub const MIN_OVERLAY_SIZE_PX: f64 = 50.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side of the square resize handle anchored at an overlay's bottom-right corner.
pub const RESIZE_HANDLE_PX: f64 = 24.0;

// ── Cursors ─────────────────────────────────────────────────────

/// Cursor shown while translating an overlay.
pub const CURSOR_MOVE: &str = "move";

/// Cursor shown while resizing an overlay.
pub const CURSOR_RESIZE: &str = "se-resize";

/// Cursor restored when a gesture ends.
pub const CURSOR_DEFAULT: &str = "default";
