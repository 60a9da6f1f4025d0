//! Catalog model: backgrounds, their overlays, and the in-memory store.
//!
//! A [`Background`] owns an ordered list of [`Overlay`]s (composition, never
//! shared). The [`CatalogStore`] is the single owner of every background and
//! exposes a small mutation API. Writes are copy-on-write: each effective
//! mutation builds a new top-level collection and swaps it in, so a snapshot
//! handed to a renderer never changes underneath it.
//!
//! Unknown ids are never an error here. Ids reach the store from whatever the
//! surfaces last rendered, so a stale id is expected and is absorbed as a
//! no-op; each mutator reports through its return value whether the store
//! changed.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::{Dimension, Geometry, GeometryPatch};

/// Identifier of a background. Opaque; generated from the current time.
pub type BackgroundId = String;

/// Identifier of an overlay, unique within its owning background.
pub type OverlayId = String;

/// Kind of decorative overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Flower,
    Curtain,
    Light,
    Accessory,
    Chair,
    Sofa,
}

impl Category {
    /// Every category, in the order the customer picker shows them.
    pub const ALL: [Self; 6] = [Self::Flower, Self::Curtain, Self::Light, Self::Accessory, Self::Chair, Self::Sofa];

    /// Wire name (`"flower"`, `"curtain"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flower => "flower",
            Self::Curtain => "curtain",
            Self::Light => "light",
            Self::Accessory => "accessory",
            Self::Chair => "chair",
            Self::Sofa => "sofa",
        }
    }

    /// Heading used by the customer picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Flower => "Flower arrangement",
            Self::Curtain => "Curtain",
            Self::Light => "Lighting",
            Self::Accessory => "Accessory",
            Self::Chair => "Chairs",
            Self::Sofa => "Sofa",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// A decorative image layered on a background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub id: OverlayId,
    /// URI of the image (an upload path or an absolute URL).
    pub image_ref: String,
    pub label: String,
    pub category: Category,
    pub geometry: Geometry,
}

/// A backdrop image and the overlays positioned over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub id: BackgroundId,
    pub image_ref: String,
    pub label: String,
    pub geometry: Geometry,
    /// Draw order: later overlays sit above earlier ones.
    #[serde(default)]
    pub overlays: Vec<Overlay>,
}

impl Background {
    /// Look up one of this background's overlays.
    #[must_use]
    pub fn overlay(&self, id: &str) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    /// Overlays of a single category, in draw order.
    pub fn overlays_in(&self, category: Category) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().filter(move |o| o.category == category)
    }
}

/// Catalog seeded when no external store is attached: one classic arch with
/// a single orange flower arrangement.
#[must_use]
pub fn seed_backgrounds() -> Vec<Background> {
    vec![Background {
        id: "default".into(),
        image_ref: "https://i.ibb.co/yBg7f57g/image3.png".into(),
        label: "Klasik Düğün Arkı".into(),
        geometry: Geometry::full_canvas(),
        overlays: vec![Overlay {
            id: "orange-flowers".into(),
            image_ref: "https://i.ibb.co/5WQFZhpP/image1.png".into(),
            label: "Turuncu Çiçekli Süsleme".into(),
            category: Category::Flower,
            geometry: Geometry::new(
                Dimension::px(260.0),
                Dimension::percent(100.0),
                Dimension::px(-220.0),
                Dimension::px(110.0),
            ),
        }],
    }]
}

/// Authoritative in-memory collection of backgrounds.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    backgrounds: Arc<[Background]>,
    revision: u64,
    last_id: u64,
}

impl CatalogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { backgrounds: Arc::from(Vec::new()), revision: 0, last_id: 0 }
    }

    /// Create a store holding `backgrounds`.
    #[must_use]
    pub fn with_backgrounds(backgrounds: Vec<Background>) -> Self {
        let mut store = Self::new();
        store.load_snapshot(backgrounds);
        store
    }

    /// Replace the whole catalog (hydration from an external store).
    pub fn load_snapshot(&mut self, backgrounds: Vec<Background>) {
        self.replace(backgrounds);
    }

    /// Immutable view of the current catalog. Cheap to clone.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[Background]> {
        Arc::clone(&self.backgrounds)
    }

    /// Counter bumped by every write that changed the catalog.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn background(&self, id: &str) -> Option<&Background> {
        self.backgrounds.iter().find(|b| b.id == id)
    }

    #[must_use]
    pub fn overlay(&self, background_id: &str, overlay_id: &str) -> Option<&Overlay> {
        self.background(background_id)?.overlay(overlay_id)
    }

    /// Number of backgrounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backgrounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backgrounds.is_empty()
    }

    // --- Mutations ---

    /// Append a background covering the full canvas with no overlays.
    pub fn add_background(&mut self, label: &str, image_ref: &str) -> BackgroundId {
        let id = self.next_id();
        let mut next = self.backgrounds.to_vec();
        next.push(Background {
            id: id.clone(),
            image_ref: image_ref.to_owned(),
            label: label.to_owned(),
            geometry: Geometry::full_canvas(),
            overlays: Vec::new(),
        });
        self.replace(next);
        id
    }

    /// Remove a background together with all of its overlays.
    pub fn remove_background(&mut self, id: &str) -> bool {
        if self.background(id).is_none() {
            return false;
        }
        let next = self.backgrounds.iter().filter(|b| b.id != id).cloned().collect();
        self.replace(next);
        true
    }

    /// Append an overlay to a background. Returns `None` without touching the
    /// store when the background does not exist.
    pub fn add_overlay(
        &mut self,
        background_id: &str,
        label: &str,
        image_ref: &str,
        category: Category,
        geometry: Geometry,
    ) -> Option<OverlayId> {
        let index = self.background_index(background_id)?;
        let id = self.next_id();
        let mut next = self.backgrounds.to_vec();
        next[index].overlays.push(Overlay {
            id: id.clone(),
            image_ref: image_ref.to_owned(),
            label: label.to_owned(),
            category,
            geometry,
        });
        self.replace(next);
        Some(id)
    }

    /// Remove one overlay from a background.
    pub fn remove_overlay(&mut self, background_id: &str, overlay_id: &str) -> bool {
        let Some((bg, ov)) = self.overlay_index(background_id, overlay_id) else {
            return false;
        };
        let mut next = self.backgrounds.to_vec();
        next[bg].overlays.remove(ov);
        self.replace(next);
        true
    }

    /// Merge `patch` into an overlay's geometry, leaving absent fields as they
    /// are. Returns `false` if the overlay is missing or nothing changed.
    pub fn update_overlay_geometry(&mut self, background_id: &str, overlay_id: &str, patch: &GeometryPatch) -> bool {
        let Some((bg, ov)) = self.overlay_index(background_id, overlay_id) else {
            return false;
        };
        let mut geometry = self.backgrounds[bg].overlays[ov].geometry;
        if !geometry.apply(patch) {
            return false;
        }
        let mut next = self.backgrounds.to_vec();
        next[bg].overlays[ov].geometry = geometry;
        self.replace(next);
        true
    }

    /// Merge `patch` into a background's own geometry.
    pub fn update_background_geometry(&mut self, background_id: &str, patch: &GeometryPatch) -> bool {
        let Some(bg) = self.background_index(background_id) else {
            return false;
        };
        let mut geometry = self.backgrounds[bg].geometry;
        if !geometry.apply(patch) {
            return false;
        }
        let mut next = self.backgrounds.to_vec();
        next[bg].geometry = geometry;
        self.replace(next);
        true
    }

    // --- Internals ---

    fn replace(&mut self, next: Vec<Background>) {
        self.backgrounds = Arc::from(next);
        self.revision += 1;
    }

    fn background_index(&self, id: &str) -> Option<usize> {
        self.backgrounds.iter().position(|b| b.id == id)
    }

    fn overlay_index(&self, background_id: &str, overlay_id: &str) -> Option<(usize, usize)> {
        let bg = self.background_index(background_id)?;
        let ov = self.backgrounds[bg]
            .overlays
            .iter()
            .position(|o| o.id == overlay_id)?;
        Some((bg, ov))
    }

    /// Millisecond timestamp, bumped past the previous id so two entities
    /// created within the same millisecond still differ.
    fn next_id(&mut self) -> String {
        let now_ms = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let now_ms = u64::try_from(now_ms).unwrap_or(0);
        self.last_id = now_ms.max(self.last_id + 1);
        self.last_id.to_string()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
