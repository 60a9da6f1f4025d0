//! Placement geometry: unit-tagged dimensions and the four-field record.
//!
//! Every placed image (background or overlay) carries a [`Geometry`] made of
//! four [`Dimension`]s. A dimension is either a pixel offset or a percentage
//! of the preview canvas; the two units coexist in the same record. On the
//! wire each dimension travels as a CSS-like string (`"260px"`, `"100%"`,
//! `"0"`), so parsing and formatting live here and nowhere else.
//!
//! [`GeometryPatch`] is the sparse-update counterpart used by the catalog
//! store: only the fields that are present get merged.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error produced when a dimension string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// The string is not a finite number with an optional `px` / `%` suffix.
    #[error("malformed dimension: {0:?}")]
    Malformed(String),
}

/// Unit of a single [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Absolute CSS pixels relative to the canvas origin.
    Pixel,
    /// Percentage of the containing canvas along the same axis.
    Percent,
}

impl Unit {
    /// Suffix written after the magnitude.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Pixel => "px",
            Self::Percent => "%",
        }
    }
}

/// One length field of a [`Geometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub unit: Unit,
    pub magnitude: f64,
}

impl Dimension {
    /// Zero pixels.
    pub const ZERO: Self = Self::px(0.0);

    /// A pixel dimension.
    #[must_use]
    pub const fn px(magnitude: f64) -> Self {
        Self { unit: Unit::Pixel, magnitude }
    }

    /// A percentage dimension.
    #[must_use]
    pub const fn percent(magnitude: f64) -> Self {
        Self { unit: Unit::Percent, magnitude }
    }

    /// Parse a CSS-like length: `"12px"`, `"50%"`, or a bare number (pixels).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Malformed`] when the magnitude is missing,
    /// not a number, or not finite.
    pub fn parse(raw: &str) -> Result<Self, GeometryError> {
        let trimmed = raw.trim();
        let (number, unit) = if let Some(n) = trimmed.strip_suffix("px") {
            (n, Unit::Pixel)
        } else if let Some(n) = trimmed.strip_suffix('%') {
            (n, Unit::Percent)
        } else {
            (trimmed, Unit::Pixel)
        };

        let magnitude = number
            .trim_end()
            .parse::<f64>()
            .map_err(|_| GeometryError::Malformed(raw.to_owned()))?;
        if !magnitude.is_finite() {
            return Err(GeometryError::Malformed(raw.to_owned()));
        }
        Ok(Self { unit, magnitude })
    }

    /// Lenient [`Dimension::parse`]: a malformed value counts as zero pixels.
    #[must_use]
    pub fn parse_or_zero(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(Self::ZERO)
    }

    /// The magnitude if this dimension is in pixels.
    ///
    /// Percentages cannot be turned into pixels without a container size,
    /// so they yield `None`.
    #[must_use]
    pub fn as_pixels(self) -> Option<f64> {
        match self.unit {
            Unit::Pixel => Some(self.magnitude),
            Unit::Percent => None,
        }
    }

    /// Resolve to pixels against a container length along the same axis.
    #[must_use]
    pub fn resolve(self, container: f64) -> f64 {
        match self.unit {
            Unit::Pixel => self.magnitude,
            Unit::Percent => self.magnitude / 100.0 * container,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Adding positive zero folds -0 into 0.
        write!(f, "{}{}", self.magnitude + 0.0, self.unit.suffix())
    }
}

impl FromStr for Dimension {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Stored catalogs may hold values no parser understands (`"auto"`, `""`).
/// Those load as zero pixels instead of rejecting the whole catalog; bare
/// JSON numbers are read as pixels.
impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DimensionVisitor)
    }
}

struct DimensionVisitor;

impl Visitor<'_> for DimensionVisitor {
    type Value = Dimension;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a length such as \"12px\", \"50%\" or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Dimension, E> {
        Ok(Dimension::parse_or_zero(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Dimension, E> {
        Ok(if v.is_finite() { Dimension::px(v) } else { Dimension::ZERO })
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Dimension, E> {
        Ok(Dimension::px(v as f64))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Dimension, E> {
        Ok(Dimension::px(v as f64))
    }
}

/// Placement record: size and offset relative to the canvas top-left corner.
///
/// All four fields are always present; partial geometry only exists as a
/// [`GeometryPatch`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: Dimension,
    pub height: Dimension,
    pub top: Dimension,
    pub left: Dimension,
}

impl Geometry {
    #[must_use]
    pub const fn new(width: Dimension, height: Dimension, top: Dimension, left: Dimension) -> Self {
        Self { width, height, top, left }
    }

    /// Fill the whole canvas: `100%` x `100%` at the origin.
    #[must_use]
    pub const fn full_canvas() -> Self {
        Self::new(Dimension::percent(100.0), Dimension::percent(100.0), Dimension::ZERO, Dimension::ZERO)
    }

    /// Starting placement offered for a freshly registered overlay.
    #[must_use]
    pub const fn default_overlay() -> Self {
        Self::new(Dimension::px(260.0), Dimension::percent(100.0), Dimension::px(-220.0), Dimension::px(110.0))
    }

    /// Merge the present fields of `patch`. Returns `true` if anything changed.
    pub fn apply(&mut self, patch: &GeometryPatch) -> bool {
        let before = *self;
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(t) = patch.top {
            self.top = t;
        }
        if let Some(l) = patch.left {
            self.left = l;
        }
        before != *self
    }

    /// Inline style for absolute positioning inside the preview canvas.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("width:{};height:{};top:{};left:{}", self.width, self.height, self.top, self.left)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::full_canvas()
    }
}

/// Sparse update for a [`Geometry`]. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Dimension>,
}

impl GeometryPatch {
    /// Patch that moves the top-left corner.
    #[must_use]
    pub fn position(top: Dimension, left: Dimension) -> Self {
        Self { top: Some(top), left: Some(left), ..Self::default() }
    }

    /// Patch that changes the size.
    #[must_use]
    pub fn size(width: Dimension, height: Dimension) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }
}
