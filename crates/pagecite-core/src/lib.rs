//! pagecite-core: Page position citations for document search results
//!
//! This library turns raw chunk metadata from a hosted document-search
//! service into citations ("Page 5 (top-right)"), highlight geometry,
//! answer-synthesis prompts and CSV exports.

pub mod citation;
pub mod config;
pub mod consts;
pub mod export;
pub mod geometry;
pub mod overlay;
pub mod page;
pub mod position;
pub mod prompt;
pub mod search;

pub use citation::{Citation, format_hit, format_results};
pub use config::Config;
pub use consts::*;
pub use geometry::{BoundingBox, GeometryError, PageDimensions, RawCoordinate, RawGeometry};
pub use overlay::{HighlightDetails, RelativeRect};
pub use position::{PositionLabel, classify, classify_position};
pub use search::{SearchHit, SearchRequest, SearchResponse};

#[derive(Debug, thiserror::Error)]
pub enum PageCiteError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid coordinates for chunk '{chunk_id}': {reason}")]
    InvalidCoordinates { chunk_id: String, reason: String },

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PageCiteError>;
