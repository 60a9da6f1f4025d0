//! Selection session: the visitor's in-progress design choices.
//!
//! A session records one chosen background and at most one overlay per
//! [`Category`]. Switching background always clears every category choice;
//! selections never outlive the background they were made on.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Background, BackgroundId, Category, OverlayId};

/// Why a session does not describe a valid design.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no background selected")]
    NoBackground,
    #[error("background not found: {0}")]
    UnknownBackground(BackgroundId),
    #[error("{category} selection {overlay_id} is not an overlay of the chosen background")]
    UnknownOverlay { category: Category, overlay_id: OverlayId },
    #[error("{category} selection {overlay_id} is a {actual} overlay")]
    WrongCategory { category: Category, overlay_id: OverlayId, actual: Category },
}

/// Per-visit design choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSession {
    background_id: Option<BackgroundId>,
    selections: BTreeMap<Category, OverlayId>,
}

impl SelectionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a background and drop every category selection, even when the
    /// background is the one already chosen.
    pub fn select_background(&mut self, id: impl Into<BackgroundId>) {
        self.background_id = Some(id.into());
        self.selections.clear();
    }

    /// Choose (or with `None`, clear) the overlay for one category.
    ///
    /// Not checked against the catalog; see [`Self::validate`].
    pub fn select_category(&mut self, category: Category, overlay_id: Option<OverlayId>) {
        match overlay_id {
            Some(id) => {
                self.selections.insert(category, id);
            }
            None => {
                self.selections.remove(&category);
            }
        }
    }

    #[must_use]
    pub fn background_id(&self) -> Option<&str> {
        self.background_id.as_deref()
    }

    #[must_use]
    pub fn selection(&self, category: Category) -> Option<&str> {
        self.selections.get(&category).map(String::as_str)
    }

    /// The chosen background, if it exists in `catalog`.
    #[must_use]
    pub fn chosen_background<'a>(&self, catalog: &'a [Background]) -> Option<&'a Background> {
        let id = self.background_id.as_deref()?;
        catalog.iter().find(|b| b.id == id)
    }

    /// Overlays of `category` on the chosen background, marking the current
    /// pick. Empty when no background is chosen.
    #[must_use]
    pub fn options(&self, catalog: &[Background], category: Category) -> Vec<PickerOption> {
        let Some(background) = self.chosen_background(catalog) else {
            return Vec::new();
        };
        let chosen = self.selection(category);
        background
            .overlays_in(category)
            .map(|o| PickerOption {
                id: o.id.clone(),
                label: o.label.clone(),
                image_ref: o.image_ref.clone(),
                selected: chosen == Some(o.id.as_str()),
            })
            .collect()
    }

    /// One picker section per category that has options, in
    /// [`Category::ALL`] order.
    #[must_use]
    pub fn pickers(&self, catalog: &[Background]) -> Vec<CategoryOptions> {
        Category::ALL
            .into_iter()
            .filter_map(|category| {
                let options = self.options(catalog, category);
                (!options.is_empty()).then(|| CategoryOptions { category, label: category.label(), options })
            })
            .collect()
    }

    /// Images to stack in the preview, bottom first: the background, then
    /// every selected overlay in draw order.
    #[must_use]
    pub fn preview(&self, catalog: &[Background]) -> Vec<PreviewLayer> {
        let Some(background) = self.chosen_background(catalog) else {
            return Vec::new();
        };
        let overlays = background
            .overlays
            .iter()
            .filter(|o| self.selection(o.category) == Some(o.id.as_str()))
            .map(|o| PreviewLayer { image_ref: o.image_ref.clone(), style: o.geometry.to_css() });
        std::iter::once(PreviewLayer { image_ref: background.image_ref.clone(), style: background.geometry.to_css() })
            .chain(overlays)
            .collect()
    }

    /// Check the session against a catalog snapshot: the background must
    /// exist and every selection must be an overlay of that background with
    /// the matching category.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, categories checked in
    /// [`Category::ALL`] order.
    pub fn validate(&self, catalog: &[Background]) -> Result<(), SelectionError> {
        let background_id = self.background_id.as_deref().ok_or(SelectionError::NoBackground)?;
        let background = self
            .chosen_background(catalog)
            .ok_or_else(|| SelectionError::UnknownBackground(background_id.to_owned()))?;

        for (&category, overlay_id) in &self.selections {
            let overlay = background
                .overlay(overlay_id)
                .ok_or_else(|| SelectionError::UnknownOverlay { category, overlay_id: overlay_id.clone() })?;
            if overlay.category != category {
                return Err(SelectionError::WrongCategory {
                    category,
                    overlay_id: overlay_id.clone(),
                    actual: overlay.category,
                });
            }
        }
        Ok(())
    }

    /// Flat payload for the order collaborator. Every category is present,
    /// `None` when nothing was chosen.
    #[must_use]
    pub fn to_order_payload(&self) -> OrderPayload {
        OrderPayload {
            background_id: self.background_id.clone(),
            selections: Category::ALL
                .into_iter()
                .map(|c| (c, self.selections.get(&c).cloned()))
                .collect(),
        }
    }

    /// Rebuild a session from a submitted payload.
    #[must_use]
    pub fn from_order_payload(payload: &OrderPayload) -> Self {
        Self {
            background_id: payload.background_id.clone(),
            selections: payload
                .selections
                .iter()
                .filter_map(|(&c, id)| id.clone().map(|id| (c, id)))
                .collect(),
        }
    }
}

/// Design part of an order: `{ "background_id": .., "flower": .., "curtain": .., .. }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub background_id: Option<BackgroundId>,
    #[serde(flatten)]
    pub selections: BTreeMap<Category, Option<OverlayId>>,
}

impl OrderPayload {
    /// Chosen overlay for `category`, if any.
    #[must_use]
    pub fn selection(&self, category: Category) -> Option<&str> {
        self.selections.get(&category).and_then(|id| id.as_deref())
    }
}

/// One overlay offered in a category picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    pub id: OverlayId,
    pub label: String,
    pub image_ref: String,
    pub selected: bool,
}

/// Picker section for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOptions {
    pub category: Category,
    /// Section heading.
    pub label: &'static str,
    pub options: Vec<PickerOption>,
}

/// One absolutely positioned image of the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLayer {
    pub image_ref: String,
    /// Inline style placing the image relative to the preview origin.
    pub style: String,
}
