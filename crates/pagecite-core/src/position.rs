//! Citation position classifier
//!
//! Maps a bounding box on a page to a coarse 3×3 location label such as
//! `top-right`, for use in citation text ("Page 5 (top-right)").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geometry::{BoundingBox, PageDimensions, RawCoordinate, RawGeometry};
use crate::{LOWER_BAND_THRESHOLD, UPPER_BAND_THRESHOLD};

/// Vertical third of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalBand {
    Top,
    Middle,
    Bottom,
}

impl VerticalBand {
    /// Band for a relative height, where 0 is the bottom edge of the page.
    pub fn from_relative(ry: f64) -> Self {
        if ry > UPPER_BAND_THRESHOLD {
            Self::Top
        } else if ry < LOWER_BAND_THRESHOLD {
            Self::Bottom
        } else {
            Self::Middle
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Horizontal third of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalBand {
    Left,
    Center,
    Right,
}

impl HorizontalBand {
    /// Band for a relative width, where 0 is the left edge of the page.
    pub fn from_relative(rx: f64) -> Self {
        if rx < LOWER_BAND_THRESHOLD {
            Self::Left
        } else if rx > UPPER_BAND_THRESHOLD {
            Self::Right
        } else {
            Self::Center
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// One of the nine `{vertical}-{horizontal}` page locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionLabel {
    pub vertical: VerticalBand,
    pub horizontal: HorizontalBand,
}

impl PositionLabel {
    pub const ALL: [PositionLabel; 9] = {
        use HorizontalBand::*;
        use VerticalBand::*;
        [
            Self::new(Top, Left),
            Self::new(Top, Center),
            Self::new(Top, Right),
            Self::new(Middle, Left),
            Self::new(Middle, Center),
            Self::new(Middle, Right),
            Self::new(Bottom, Left),
            Self::new(Bottom, Center),
            Self::new(Bottom, Right),
        ]
    };

    pub const fn new(vertical: VerticalBand, horizontal: HorizontalBand) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use HorizontalBand::*;
        use VerticalBand::*;
        match (self.vertical, self.horizontal) {
            (Top, Left) => "top-left",
            (Top, Center) => "top-center",
            (Top, Right) => "top-right",
            (Middle, Left) => "middle-left",
            (Middle, Center) => "middle-center",
            (Middle, Right) => "middle-right",
            (Bottom, Left) => "bottom-left",
            (Bottom, Center) => "bottom-center",
            (Bottom, Right) => "bottom-right",
        }
    }
}

impl Default for PositionLabel {
    fn default() -> Self {
        Self::new(VerticalBand::Middle, HorizontalBand::Center)
    }
}

impl fmt::Display for PositionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown position label: {0}")]
pub struct ParseLabelError(String);

impl FromStr for PositionLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| ParseLabelError(s.to_string()))
    }
}

impl Serialize for PositionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PositionLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Classify an already-validated box on a page.
///
/// Coordinates outside the page are not clamped; they simply land in the
/// outermost band.
pub fn classify(bbox: &BoundingBox, page: &PageDimensions) -> PositionLabel {
    let (cx, cy) = bbox.center();
    let rx = cx / page.width();
    let ry = cy / page.height();

    PositionLabel::new(
        VerticalBand::from_relative(ry),
        HorizontalBand::from_relative(rx),
    )
}

/// Classify raw upstream geometry. Never fails: input that cannot be
/// coerced yields `middle-center`.
pub fn classify_raw(raw: &RawGeometry) -> PositionLabel {
    match raw.resolve() {
        Ok((bbox, page)) => classify(&bbox, &page),
        Err(_) => PositionLabel::default(),
    }
}

/// Total classifier over loosely typed inputs (numbers, numeric text or
/// absent values).
pub fn classify_position(
    x0: impl Into<RawCoordinate>,
    y0: impl Into<RawCoordinate>,
    x1: impl Into<RawCoordinate>,
    y1: impl Into<RawCoordinate>,
    page_width: impl Into<RawCoordinate>,
    page_height: impl Into<RawCoordinate>,
) -> PositionLabel {
    classify_raw(&RawGeometry {
        x0: x0.into(),
        y0: y0.into(),
        x1: x1.into(),
        y1: y1.into(),
        page_width: page_width.into(),
        page_height: page_height.into(),
    })
}
