//! Proportional highlight rectangles for drawing a citation over a
//! rendered page image.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::geometry::{BoundingBox, PageDimensions};
use crate::search::SearchHit;

/// Bounding box expressed as percentages of the page extent.
///
/// `top` is the raw `y0` ratio in page coordinates (measured from the
/// bottom edge); renderers with a top-left origin must flip it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// `RelativeRect` rendered as `"12.3%"` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedRect {
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
}

impl RelativeRect {
    pub fn from_geometry(bbox: &BoundingBox, page: &PageDimensions) -> Self {
        Self {
            left: bbox.x0 / page.width() * 100.0,
            top: bbox.y0 / page.height() * 100.0,
            width: bbox.width() / page.width() * 100.0,
            height: bbox.height() / page.height() * 100.0,
        }
    }

    pub fn formatted(&self) -> FormattedRect {
        FormattedRect {
            left: percent(self.left),
            top: percent(self.top),
            width: percent(self.width),
            height: percent(self.height),
        }
    }
}

fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Technical details shown alongside a highlighted citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightDetails {
    pub page: i64,
    pub bbox: BoundingBox,
    pub relative_position: FormattedRect,
}

impl HighlightDetails {
    pub fn new(page: i64, bbox: BoundingBox, dims: &PageDimensions) -> Self {
        Self {
            page,
            bbox,
            relative_position: RelativeRect::from_geometry(&bbox, dims).formatted(),
        }
    }

    /// Details for a raw hit; fails if its geometry or page cannot be coerced.
    pub fn from_hit(hit: &SearchHit) -> Result<Self> {
        let (bbox, dims) = hit.raw_geometry().resolve()?;
        let page = hit.page.coerce_or(0.0)?.trunc() as i64;
        Ok(Self::new(page, bbox, &dims))
    }
}
