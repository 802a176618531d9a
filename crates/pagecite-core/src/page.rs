//! Page browsing: a page's chunks in reading order, and per-document summaries

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;
use crate::position::{PositionLabel, classify_raw};
use crate::search::SearchHit;

/// A chunk shown while browsing a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageChunk {
    pub chunk_id: String,
    pub text: String,
    pub position: PositionLabel,
    pub bbox: BoundingBox,
}

/// Chunks of `doc_name` on `page`, top of the page first, then left to right.
///
/// Rows with malformed geometry are kept and labelled `middle-center`.
pub fn page_content(hits: &[SearchHit], doc_name: &str, page: i64) -> Vec<PageChunk> {
    let mut chunks: Vec<PageChunk> = hits
        .iter()
        .filter(|hit| hit.doc_name() == doc_name && page_number(hit) == Some(page))
        .map(|hit| {
            let raw = hit.raw_geometry();
            let bbox = raw.bounding_box().unwrap_or_default();
            PageChunk {
                chunk_id: hit.chunk_id_string(),
                text: hit.text(),
                position: classify_raw(&raw),
                bbox,
            }
        })
        .collect();

    chunks.sort_by(|a, b| {
        b.bbox
            .y0
            .partial_cmp(&a.bbox.y0)
            .unwrap_or(Ordering::Equal)
            .then(a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal))
    });
    chunks
}

/// Per-document counts over a set of hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub doc_name: String,
    pub total_pages: i64,
    pub total_chunks: usize,
}

/// Group hits by document, sorted by document name. `total_pages` is the
/// highest page number seen.
pub fn summarize_documents(hits: &[SearchHit]) -> Vec<DocumentSummary> {
    let mut docs: BTreeMap<String, DocumentSummary> = BTreeMap::new();

    for hit in hits {
        let doc_name = hit.doc_name();
        let entry = docs
            .entry(doc_name.clone())
            .or_insert_with(|| DocumentSummary {
                doc_name,
                total_pages: 0,
                total_chunks: 0,
            });
        entry.total_chunks += 1;
        if let Some(page) = page_number(hit) {
            entry.total_pages = entry.total_pages.max(page);
        }
    }

    docs.into_values().collect()
}

fn page_number(hit: &SearchHit) -> Option<i64> {
    hit.page.coerce().ok().flatten().map(|p| p.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RawCoordinate;

    fn row(id: &str, doc: &str, page: f64, x0: f64, y0: f64) -> SearchHit {
        SearchHit {
            chunk_id: id.into(),
            doc_name: doc.into(),
            page: page.into(),
            text: format!("text {id}").into(),
            bbox_x0: x0.into(),
            bbox_y0: y0.into(),
            bbox_x1: (x0 + 50.0).into(),
            bbox_y1: (y0 + 20.0).into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_reading_order() {
        let hits = vec![
            row("low", "a.pdf", 1.0, 50.0, 100.0),
            row("high-right", "a.pdf", 1.0, 400.0, 700.0),
            row("high-left", "a.pdf", 1.0, 50.0, 700.0),
            row("other-page", "a.pdf", 2.0, 50.0, 500.0),
            row("other-doc", "b.pdf", 1.0, 50.0, 500.0),
        ];
        let chunks = page_content(&hits, "a.pdf", 1);
        let ids: Vec<&str> = chunks.iter().map(|c| c.chunk_id.as_str()).collect();
        assert_eq!(ids, vec!["high-left", "high-right", "low"]);
        assert_eq!(chunks[0].position.as_str(), "top-left");
        assert_eq!(chunks[2].position.as_str(), "bottom-left");
    }

    #[test]
    fn test_malformed_row_kept_as_middle_center() {
        let mut bad = row("bad", "a.pdf", 3.0, 0.0, 0.0);
        bad.bbox_x0 = RawCoordinate::from("??");
        let chunks = page_content(&[bad], "a.pdf", 3);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].position, PositionLabel::default());
    }

    #[test]
    fn test_numeric_doc_name_matches() {
        let mut hit = row("n", "", 2.0, 0.0, 0.0);
        hit.doc_name = serde_json::Value::from(42_i64);
        let chunks = page_content(&[hit.clone()], "42", 2);
        assert_eq!(chunks.len(), 1);
        assert_eq!(summarize_documents(&[hit])[0].doc_name, "42");
    }

    #[test]
    fn test_summarize_documents() {
        let hits = vec![
            row("1", "b.pdf", 4.0, 0.0, 0.0),
            row("2", "a.pdf", 1.0, 0.0, 0.0),
            row("3", "b.pdf", 9.0, 0.0, 0.0),
        ];
        let summary = summarize_documents(&hits);
        assert_eq!(
            summary,
            vec![
                DocumentSummary {
                    doc_name: "a.pdf".to_string(),
                    total_pages: 1,
                    total_chunks: 1
                },
                DocumentSummary {
                    doc_name: "b.pdf".to_string(),
                    total_pages: 9,
                    total_chunks: 2
                },
            ]
        );
    }
}
