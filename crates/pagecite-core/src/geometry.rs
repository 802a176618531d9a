//! Page geometry: bounding boxes, page dimensions and raw coordinate coercion
//!
//! Coordinates use the page-description convention: origin at the
//! bottom-left corner, y increasing upward.

use serde::{Deserialize, Serialize};

use crate::{FALLBACK_PAGE_HEIGHT, FALLBACK_PAGE_WIDTH};

/// A coordinate or dimension that could not be turned into a finite number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Not a number: {0:?}")]
    NotNumeric(String),

    #[error("Not finite: {0}")]
    NotFinite(f64),
}

/// Rectangle enclosing a unit of extracted text, in page coordinates.
///
/// `x1 >= x0` and `y1 >= y0` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Geometric center of the box.
    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Signed width (negative for an inverted box).
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Signed height (negative for an inverted box).
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

/// Full page extent, in the same units as the bounding boxes on it.
///
/// Both sides are always positive: every constructor, deserialization
/// included, goes through [`PageDimensions::sanitized`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PageExtent")]
pub struct PageDimensions {
    width: f64,
    height: f64,
}

/// Unchecked wire form of `PageDimensions`.
#[derive(Deserialize)]
struct PageExtent {
    width: f64,
    height: f64,
}

impl From<PageExtent> for PageDimensions {
    fn from(extent: PageExtent) -> Self {
        Self::sanitized(extent.width, extent.height)
    }
}

impl PageDimensions {
    /// Build page dimensions, replacing each non-positive (or NaN) side with
    /// the US Letter fallback so later divisions are always safe.
    pub fn sanitized(width: f64, height: f64) -> Self {
        Self {
            width: positive_or(width, FALLBACK_PAGE_WIDTH),
            height: positive_or(height, FALLBACK_PAGE_HEIGHT),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self {
            width: FALLBACK_PAGE_WIDTH,
            height: FALLBACK_PAGE_HEIGHT,
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 { value } else { fallback }
}

/// A coordinate as delivered by upstream data: absent, numeric or text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl RawCoordinate {
    /// Coerce to a finite number. `Ok(None)` means the value was absent.
    pub fn coerce(&self) -> Result<Option<f64>, GeometryError> {
        let value = match self {
            Self::Missing => return Ok(None),
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| GeometryError::NotNumeric(s.clone()))?,
        };

        if value.is_finite() {
            Ok(Some(value))
        } else {
            Err(GeometryError::NotFinite(value))
        }
    }

    /// Coerce, treating an absent value as `default`.
    pub fn coerce_or(&self, default: f64) -> Result<f64, GeometryError> {
        Ok(self.coerce()?.unwrap_or(default))
    }
}

impl From<f64> for RawCoordinate {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for RawCoordinate {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for RawCoordinate {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for RawCoordinate {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawCoordinate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawCoordinate {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<RawCoordinate>> From<Option<T>> for RawCoordinate {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// The six raw inputs of a classification, before coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGeometry {
    pub x0: RawCoordinate,
    pub y0: RawCoordinate,
    pub x1: RawCoordinate,
    pub y1: RawCoordinate,
    pub page_width: RawCoordinate,
    pub page_height: RawCoordinate,
}

impl RawGeometry {
    /// Coerce the four box coordinates, treating missing ones as 0.
    pub fn bounding_box(&self) -> Result<BoundingBox, GeometryError> {
        Ok(BoundingBox {
            x0: self.x0.coerce_or(0.0)?,
            y0: self.y0.coerce_or(0.0)?,
            x1: self.x1.coerce_or(0.0)?,
            y1: self.y1.coerce_or(0.0)?,
        })
    }

    /// Coerce the page size; missing or non-positive sides fall back to
    /// US Letter.
    pub fn page_dimensions(&self) -> Result<PageDimensions, GeometryError> {
        Ok(PageDimensions::sanitized(
            self.page_width.coerce_or(FALLBACK_PAGE_WIDTH)?,
            self.page_height.coerce_or(FALLBACK_PAGE_HEIGHT)?,
        ))
    }

    /// Coerce all inputs.
    pub fn resolve(&self) -> Result<(BoundingBox, PageDimensions), GeometryError> {
        Ok((self.bounding_box()?, self.page_dimensions()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_size() {
        let bbox = BoundingBox::new(450.0, 700.0, 600.0, 780.0);
        assert_eq!(bbox.center(), (525.0, 740.0));
        assert_eq!(bbox.width(), 150.0);
        assert_eq!(bbox.height(), 80.0);

        let inverted = BoundingBox::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(inverted.width(), -10.0);
        assert_eq!(inverted.center(), (5.0, 5.0));
    }

    #[test]
    fn test_sanitized_page() {
        assert_eq!(
            PageDimensions::sanitized(0.0, -5.0),
            PageDimensions::default()
        );
        let page = PageDimensions::sanitized(f64::NAN, 842.0);
        assert_eq!((page.width(), page.height()), (612.0, 842.0));

        let page = PageDimensions::sanitized(595.0, 842.0);
        assert_eq!((page.width(), page.height()), (595.0, 842.0));
    }

    #[test]
    fn test_deserialized_page_is_sanitized() {
        let page: PageDimensions =
            serde_json::from_str(r#"{"width": 0.0, "height": -10.0}"#).unwrap();
        assert_eq!(page, PageDimensions::default());

        let page: PageDimensions =
            serde_json::from_str(r#"{"width": 595.0, "height": 0}"#).unwrap();
        assert_eq!((page.width(), page.height()), (595.0, 792.0));

        let json = serde_json::to_value(PageDimensions::default()).unwrap();
        assert_eq!(json["width"], 612.0);
        assert_eq!(json["height"], 792.0);
    }

    #[test]
    fn test_coerce() {
        assert_eq!(RawCoordinate::Missing.coerce(), Ok(None));
        assert_eq!(RawCoordinate::from(12.5).coerce(), Ok(Some(12.5)));
        assert_eq!(RawCoordinate::from(" 42.0 ").coerce(), Ok(Some(42.0)));
        assert!(matches!(
            RawCoordinate::from("abc").coerce(),
            Err(GeometryError::NotNumeric(_))
        ));
        assert!(matches!(
            RawCoordinate::from("").coerce(),
            Err(GeometryError::NotNumeric(_))
        ));
        assert!(matches!(
            RawCoordinate::from(f64::INFINITY).coerce(),
            Err(GeometryError::NotFinite(_))
        ));
        assert!(RawCoordinate::from("NaN").coerce().is_err());
    }

    #[test]
    fn test_deserialize_raw() {
        let values: Vec<RawCoordinate> =
            serde_json::from_str(r#"[null, 1.5, 3, "7.25"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                RawCoordinate::Missing,
                RawCoordinate::Number(1.5),
                RawCoordinate::Number(3.0),
                RawCoordinate::Text("7.25".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_defaults() {
        let (bbox, page) = RawGeometry::default().resolve().unwrap();
        assert_eq!(bbox, BoundingBox::default());
        assert_eq!(page, PageDimensions::default());

        let raw = RawGeometry {
            page_width: RawCoordinate::from("0"),
            page_height: RawCoordinate::from(1000.0),
            ..Default::default()
        };
        let (_, page) = raw.resolve().unwrap();
        assert_eq!(page.width(), 612.0);
        assert_eq!(page.height(), 1000.0);
    }
}
