//! Turn raw search hits into citations with page and position

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, PageDimensions};
use crate::position::{PositionLabel, classify_raw};
use crate::search::SearchHit;
use crate::{PageCiteError, Result};

/// A retrieved passage with its human-readable location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub chunk_id: String,
    pub doc_name: String,
    pub page: i64,
    pub position: PositionLabel,
    pub text: String,
    pub bbox: BoundingBox,
    pub page_dims: PageDimensions,
}

impl Citation {
    /// `"Page N (label)"`
    pub fn location(&self) -> String {
        format!("Page {} ({})", self.page, self.position)
    }

    /// Bounding box as `[x0, y0, x1, y1]` with one decimal place.
    pub fn bbox_display(&self) -> String {
        let coords: Vec<String> = self
            .bbox
            .to_array()
            .iter()
            .map(|v| format!("{v:.1}"))
            .collect();
        format!("[{}]", coords.join(", "))
    }

    /// Text cut to at most `max_chars` characters, with `...` when cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        truncate_chars(&self.text, max_chars)
    }
}

/// Truncate on a char boundary, appending `...` if anything was dropped.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Format a single hit.
///
/// A hit whose box coordinates or page number cannot be coerced is rejected,
/// since its citation would point nowhere. Malformed page dimensions only
/// degrade the label to `middle-center` and the dimensions to US Letter.
pub fn format_hit(hit: &SearchHit) -> Result<Citation> {
    let invalid = |reason: String| PageCiteError::InvalidCoordinates {
        chunk_id: hit.chunk_id_string(),
        reason,
    };

    let raw = hit.raw_geometry();
    let bbox = raw.bounding_box().map_err(|e| invalid(e.to_string()))?;
    let page = hit
        .page
        .coerce_or(0.0)
        .map_err(|e| invalid(e.to_string()))?
        .trunc() as i64;
    let page_dims = raw.page_dimensions().unwrap_or_else(|e| {
        tracing::debug!("Bad page size for chunk {}: {}", hit.chunk_id_string(), e);
        PageDimensions::default()
    });

    Ok(Citation {
        chunk_id: hit.chunk_id_string(),
        doc_name: hit.doc_name(),
        page,
        position: classify_raw(&raw),
        text: hit.text(),
        bbox,
        page_dims,
    })
}

/// Format all hits, skipping (and logging) any that cannot be placed.
pub fn format_results(hits: &[SearchHit]) -> Vec<Citation> {
    hits.iter()
        .filter_map(|hit| match format_hit(hit) {
            Ok(citation) => Some(citation),
            Err(e) => {
                tracing::warn!("Skipping result: {}", e);
                None
            }
        })
        .collect()
}
