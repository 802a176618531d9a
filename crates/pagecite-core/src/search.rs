//! Payloads exchanged with the hosted search service
//!
//! The service itself is remote; this module only builds request bodies and
//! parses raw responses into hits for formatting.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::geometry::{RawCoordinate, RawGeometry};
use crate::{Config, Result};

/// Columns requested from the search service for every hit.
pub const SEARCH_COLUMNS: &[&str] = &[
    "chunk_id",
    "doc_name",
    "page",
    "text",
    "bbox_x0",
    "bbox_y0",
    "bbox_x1",
    "bbox_y1",
    "page_width",
    "page_height",
];

/// Request body for a hosted search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    /// Name of the hosted search index to query.
    pub service: String,
    pub query: String,
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    pub limit: usize,
}

impl SearchRequest {
    /// Build a request, clamping `limit` to `1..=config.max_search_results`.
    pub fn new(query: impl Into<String>, limit: usize, config: &Config) -> Self {
        Self {
            service: config.search_service.clone(),
            query: query.into(),
            columns: SEARCH_COLUMNS.iter().map(|c| c.to_string()).collect(),
            filter: None,
            limit: limit.clamp(1, config.max_search_results.max(1)),
        }
    }

    /// Restrict results to a single document.
    pub fn with_doc_filter(mut self, doc_name: impl Into<String>) -> Self {
        self.filter = Some(json!({ "@eq": { "doc_name": doc_name.into() } }));
        self
    }
}

/// One raw result row as returned by the search service.
///
/// Every field may be absent, and numeric fields may arrive as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub chunk_id: Value,
    #[serde(default)]
    pub doc_name: Value,
    #[serde(default)]
    pub page: RawCoordinate,
    #[serde(default)]
    pub text: Value,
    #[serde(default)]
    pub bbox_x0: RawCoordinate,
    #[serde(default)]
    pub bbox_y0: RawCoordinate,
    #[serde(default)]
    pub bbox_x1: RawCoordinate,
    #[serde(default)]
    pub bbox_y1: RawCoordinate,
    #[serde(default)]
    pub page_width: RawCoordinate,
    #[serde(default)]
    pub page_height: RawCoordinate,
}

impl SearchHit {
    /// Chunk identifier as text (numbers are stringified, absent is empty).
    pub fn chunk_id_string(&self) -> String {
        value_text(&self.chunk_id)
    }

    pub fn doc_name(&self) -> String {
        value_text(&self.doc_name)
    }

    pub fn text(&self) -> String {
        value_text(&self.text)
    }

    /// The geometry columns of this hit, uncoerced.
    pub fn raw_geometry(&self) -> RawGeometry {
        RawGeometry {
            x0: self.bbox_x0.clone(),
            y0: self.bbox_y0.clone(),
            x1: self.bbox_x1.clone(),
            y1: self.bbox_y1.clone(),
            page_width: self.page_width.clone(),
            page_height: self.page_height.clone(),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parsed search response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

impl SearchResponse {
    /// Parse a raw response body.
    ///
    /// Accepts an object with a `results` array, or a JSON string holding
    /// such an object. Rows that are not objects are skipped.
    pub fn from_json(body: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(body)?;
        if let Value::String(inner) = &value {
            tracing::debug!("Search response was double-encoded");
            value = serde_json::from_str(inner)?;
        }

        let rows = match value {
            Value::Object(mut map) => match map.remove("results") {
                Some(Value::Array(rows)) => rows,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<SearchHit>(row) {
                Ok(hit) => results.push(hit),
                Err(e) => tracing::warn!("Skipping malformed search hit: {}", e),
            }
        }

        Ok(Self { results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_clamps_limit() {
        let config = Config::default();
        assert_eq!(SearchRequest::new("dosing", 50, &config).limit, 20);
        assert_eq!(SearchRequest::new("dosing", 0, &config).limit, 1);
        assert_eq!(SearchRequest::new("dosing", 7, &config).limit, 7);
    }

    #[test]
    fn test_request_json() {
        let request = SearchRequest::new("eligibility", 5, &Config::default())
            .with_doc_filter("protocol_a.pdf");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["service"], "protocol_search");
        assert_eq!(json["query"], "eligibility");
        assert_eq!(json["limit"], 5);
        assert_eq!(json["columns"].as_array().unwrap().len(), 10);
        assert_eq!(json["filter"]["@eq"]["doc_name"], "protocol_a.pdf");

        let unfiltered = SearchRequest::new("eligibility", 5, &Config::default());
        let json = serde_json::to_value(&unfiltered).unwrap();
        assert!(json.get("filter").is_none());
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "results": [
                {"chunk_id": "c1", "doc_name": "a.pdf", "page": "3", "text": "Dose",
                 "bbox_x0": "450", "bbox_y0": 700, "bbox_x1": 600.0, "bbox_y1": "780",
                 "page_width": 612, "page_height": 792, "@scores": {"cosine": 0.8}},
                {"chunk_id": 17}
            ],
            "request_id": "abc"
        }"#;
        let response = SearchResponse::from_json(body).unwrap();

        assert_eq!(response.results.len(), 2);
        let first = &response.results[0];
        assert_eq!(first.chunk_id_string(), "c1");
        assert_eq!(first.page, RawCoordinate::Text("3".to_string()));
        assert_eq!(first.bbox_y0, RawCoordinate::Number(700.0));

        let second = &response.results[1];
        assert_eq!(second.chunk_id_string(), "17");
        assert_eq!(second.doc_name(), "");
        assert_eq!(second.bbox_x0, RawCoordinate::Missing);
    }

    #[test]
    fn test_non_string_text_fields_are_kept() {
        let body = r#"{"results": [
            {"chunk_id": "c1", "doc_name": 42, "text": 7, "page": 1},
            {"chunk_id": "c2", "doc_name": null, "text": ["a", "b"]}
        ]}"#;
        let response = SearchResponse::from_json(body).unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].doc_name(), "42");
        assert_eq!(response.results[0].text(), "7");
        assert_eq!(response.results[1].doc_name(), "");
        assert_eq!(response.results[1].text(), r#"["a","b"]"#);
    }

    #[test]
    fn test_parse_double_encoded() {
        let body = r#""{\"results\": [{\"chunk_id\": \"x\"}]}""#;
        let response = SearchResponse::from_json(body).unwrap();
        assert_eq!(response.results.len(), 1);
    }

    #[test]
    fn test_parse_without_results() {
        assert!(SearchResponse::from_json("{}").unwrap().results.is_empty());
        assert!(SearchResponse::from_json("[]").unwrap().results.is_empty());
        let response = SearchResponse::from_json(r#"{"results": [1, {}]}"#).unwrap();
        assert_eq!(response.results.len(), 1);
        assert!(SearchResponse::from_json("not json").is_err());
    }
}
