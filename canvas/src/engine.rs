use serde::Serialize;

use crate::catalog::CatalogStore;
use crate::consts::{CURSOR_DEFAULT, CURSOR_MOVE, CURSOR_RESIZE};
use crate::geometry::GeometryPatch;
use crate::gesture::{self, GestureKind, PixelSnapshot};
use crate::hit::{self, HitPart};
use crate::input::{Gesture, GestureTarget, InputState};
use crate::viewport::{CanvasRect, Point};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    GestureStarted { target: GestureTarget, kind: GestureKind },
    GeometryUpdated { target: GestureTarget, patch: GeometryPatch },
    GestureEnded { target: GestureTarget },
    SetCursor { cursor: String },
    RenderNeeded,
}

/// Core engine state: the catalog, the gesture state machine, and the
/// preview canvas rectangle.
///
/// Free of browser types so it runs and tests natively; the wasm bridge
/// wraps it.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub catalog: CatalogStore,
    pub input: InputState,
    pub viewport: Option<CanvasRect>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine over an existing catalog.
    #[must_use]
    pub fn with_catalog(catalog: CatalogStore) -> Self {
        Self { catalog, ..Self::default() }
    }

    // --- Viewport ---

    /// Update the preview canvas bounding rectangle (screen pixels).
    pub fn set_viewport(&mut self, rect: CanvasRect) {
        self.viewport = Some(rect);
    }

    // --- Input events ---

    /// Pointer-down somewhere over the preview of `background_id`.
    ///
    /// Hit-tests the background's overlays against the current viewport and
    /// starts a translate or resize gesture on whatever is under the cursor.
    /// Without a viewport there is no way to place the pointer on the
    /// canvas, so nothing happens.
    pub fn on_pointer_down(&mut self, background_id: &str, screen_pt: Point) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let Some(rect) = self.viewport else {
            return Vec::new();
        };
        let Some(background) = self.catalog.background(background_id) else {
            return Vec::new();
        };
        let local = rect.to_local(screen_pt);
        let Some(hit) = hit::hit_test(local, background, rect.width, rect.height) else {
            return Vec::new();
        };
        self.begin_gesture(GestureTarget::new(background_id, hit.overlay_id), hit.part, screen_pt)
    }

    /// Pointer-down on a known overlay part, for hosts that do their own
    /// hit-testing (one DOM element per overlay and per handle).
    ///
    /// Ignored while another gesture is active or when the target does not
    /// exist.
    pub fn begin_gesture(&mut self, target: GestureTarget, part: HitPart, screen_pt: Point) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let Some(overlay) = self.catalog.overlay(&target.background_id, &target.overlay_id) else {
            return Vec::new();
        };

        let kind = part.gesture_kind();
        let snapshot = PixelSnapshot::of(&overlay.geometry);
        self.input = InputState::begin(kind, Gesture { target: target.clone(), start: screen_pt, snapshot });

        let cursor = match kind {
            GestureKind::Translate => CURSOR_MOVE,
            GestureKind::Resize => CURSOR_RESIZE,
        };
        vec![
            Action::GestureStarted { target, kind },
            Action::SetCursor { cursor: cursor.to_owned() },
            Action::RenderNeeded,
        ]
    }

    /// Pointer-move. Recomputes the target geometry from the gesture-start
    /// snapshot and writes it to the catalog.
    ///
    /// Leaving the viewport ends the gesture exactly like pointer-up. A
    /// target that has disappeared is skipped; the gesture stays active until
    /// pointer-up.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        if self.viewport.is_some_and(|rect| !rect.contains(screen_pt)) {
            return self.end_gesture();
        }
        let Some((kind, g)) = self.input.active() else {
            return Vec::new();
        };

        let patch = gesture::apply(kind, &g.snapshot, g.start, screen_pt);
        let target = g.target.clone();
        if !self.catalog.update_overlay_geometry(&target.background_id, &target.overlay_id, &patch) {
            return Vec::new();
        }
        vec![Action::GeometryUpdated { target, patch }, Action::RenderNeeded]
    }

    /// Pointer-up ends the gesture, keeping the last committed geometry.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    /// Pointer left the preview canvas. Commits, same as pointer-up.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    // --- Queries ---

    /// Kind of the active gesture, if any.
    #[must_use]
    pub fn gesture_kind(&self) -> Option<GestureKind> {
        self.input.active().map(|(kind, _)| kind)
    }

    /// Target of the active gesture, if any.
    #[must_use]
    pub fn gesture_target(&self) -> Option<&GestureTarget> {
        self.input.target()
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Translating(g) | InputState::Resizing(g) => vec![
                Action::GestureEnded { target: g.target },
                Action::SetCursor { cursor: CURSOR_DEFAULT.to_owned() },
            ],
        }
    }
}
