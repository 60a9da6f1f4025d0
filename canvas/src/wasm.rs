//! Browser bridge.
//!
//! Two handles cross the `wasm-bindgen` boundary. [`PlacementEngine`] wraps
//! [`EngineCore`] for the admin page: the host wires DOM pointer events to
//! it and applies the returned actions (JSON arrays of
//! [`crate::engine::Action`]) to the preview. [`DesignSession`] wraps a
//! [`SelectionSession`] for the customer page. Catalog values cross the
//! boundary as JSON strings so the host can hand them straight to `fetch`.

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::catalog::{Background, CatalogStore, Category};
use crate::engine::{Action, EngineCore};
use crate::hit::HitPart;
use crate::input::GestureTarget;
use crate::session::SelectionSession;
use crate::viewport::{CanvasRect, Point};

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn actions_json(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(actions).map_err(to_js_error)
}

fn parse_catalog(json: &str) -> Result<CatalogStore, JsValue> {
    let backgrounds: Vec<Background> = serde_json::from_str(json).map_err(to_js_error)?;
    Ok(CatalogStore::with_backgrounds(backgrounds))
}

/// Placement engine handle owned by the admin page.
#[wasm_bindgen]
#[derive(Default)]
pub struct PlacementEngine {
    core: EngineCore,
}

#[wasm_bindgen]
impl PlacementEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog with a JSON array of backgrounds.
    ///
    /// # Errors
    ///
    /// Rejects JSON that does not describe a list of backgrounds.
    pub fn load_catalog(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.catalog = parse_catalog(json)?;
        Ok(())
    }

    /// Current catalog as a JSON array.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn catalog_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&*self.core.catalog.snapshot()).map_err(to_js_error)
    }

    /// Catalog revision; changes whenever the catalog does.
    #[must_use]
    pub fn revision(&self) -> f64 {
        // Revisions stay far below 2^53.
        #[allow(clippy::cast_precision_loss)]
        let revision = self.core.catalog.revision() as f64;
        revision
    }

    pub fn set_viewport(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.core.set_viewport(CanvasRect::new(left, top, width, height));
    }

    /// Read the preview element's bounding rectangle.
    pub fn sync_viewport(&mut self, element: &Element) {
        let rect = element.get_bounding_client_rect();
        self.set_viewport(rect.left(), rect.top(), rect.width(), rect.height());
    }

    /// Pointer-down over a background preview; hit-tests its overlays.
    ///
    /// # Errors
    ///
    /// Fails only if the resulting actions cannot be serialized.
    pub fn pointer_down(&mut self, background_id: &str, x: f64, y: f64) -> Result<String, JsValue> {
        actions_json(&self.core.on_pointer_down(background_id, Point::new(x, y)))
    }

    /// Pointer-down on an overlay body.
    ///
    /// # Errors
    ///
    /// Fails only if the resulting actions cannot be serialized.
    pub fn begin_drag(&mut self, background_id: &str, overlay_id: &str, x: f64, y: f64) -> Result<String, JsValue> {
        let target = GestureTarget::new(background_id, overlay_id);
        actions_json(&self.core.begin_gesture(target, HitPart::Body, Point::new(x, y)))
    }

    /// Pointer-down on an overlay's resize handle.
    ///
    /// # Errors
    ///
    /// Fails only if the resulting actions cannot be serialized.
    pub fn begin_resize(&mut self, background_id: &str, overlay_id: &str, x: f64, y: f64) -> Result<String, JsValue> {
        let target = GestureTarget::new(background_id, overlay_id);
        actions_json(&self.core.begin_gesture(target, HitPart::ResizeHandle, Point::new(x, y)))
    }

    /// # Errors
    ///
    /// Fails only if the resulting actions cannot be serialized.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        actions_json(&self.core.on_pointer_move(Point::new(x, y)))
    }

    /// # Errors
    ///
    /// Fails only if the resulting actions cannot be serialized.
    pub fn pointer_up(&mut self) -> Result<String, JsValue> {
        actions_json(&self.core.on_pointer_up())
    }

    /// # Errors
    ///
    /// Fails only if the resulting actions cannot be serialized.
    pub fn pointer_leave(&mut self) -> Result<String, JsValue> {
        actions_json(&self.core.on_pointer_leave())
    }
}

/// The customer's design choices over a read-only copy of the catalog.
#[wasm_bindgen]
#[derive(Default)]
pub struct DesignSession {
    catalog: CatalogStore,
    session: SelectionSession,
}

#[wasm_bindgen]
impl DesignSession {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog with a JSON array of backgrounds. Selections are
    /// kept; [`Self::validate`] reports any that went stale.
    ///
    /// # Errors
    ///
    /// Rejects JSON that does not describe a list of backgrounds.
    pub fn load_catalog(&mut self, json: &str) -> Result<(), JsValue> {
        self.catalog = parse_catalog(json)?;
        Ok(())
    }

    /// Choose a background; clears every category choice.
    pub fn select_background(&mut self, background_id: &str) {
        self.session.select_background(background_id);
    }

    /// Choose the overlay for `category`, or clear it with `undefined`.
    ///
    /// # Errors
    ///
    /// Fails for an unknown category name.
    pub fn select_category(&mut self, category: &str, overlay_id: Option<String>) -> Result<(), JsValue> {
        let category: Category = category.parse().map_err(to_js_error)?;
        self.session.select_category(category, overlay_id);
        Ok(())
    }

    /// Options for one category on the chosen background, as JSON.
    ///
    /// # Errors
    ///
    /// Fails for an unknown category name.
    pub fn options_json(&self, category: &str) -> Result<String, JsValue> {
        let category: Category = category.parse().map_err(to_js_error)?;
        serde_json::to_string(&self.session.options(&self.catalog.snapshot(), category)).map_err(to_js_error)
    }

    /// Every stocked category with its heading and options, as JSON.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn pickers_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.pickers(&self.catalog.snapshot())).map_err(to_js_error)
    }

    /// Preview layers (`image_ref` + inline `style`), bottom first, as JSON.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn preview_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.preview(&self.catalog.snapshot())).map_err(to_js_error)
    }

    /// Check the design against the loaded catalog before ordering.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency as a message.
    pub fn validate(&self) -> Result<(), JsValue> {
        self.session.validate(&self.catalog.snapshot()).map_err(to_js_error)
    }

    /// The design part of the order form, as JSON.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn order_payload_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.to_order_payload()).map_err(to_js_error)
    }
}
