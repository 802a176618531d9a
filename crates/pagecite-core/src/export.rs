//! CSV export of formatted results

use std::io;

use crate::Result;
use crate::citation::Citation;

/// CSV header row.
pub const EXPORT_COLUMNS: [&str; 6] = ["Query", "Document", "Page", "Position", "Text", "Chunk_ID"];

/// Write one row per citation, prefixed by the query that produced it.
pub fn write_csv<W: io::Write>(writer: W, query: &str, results: &[Citation]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_COLUMNS)?;

    for result in results {
        let page = result.page.to_string();
        wtr.write_record([
            query,
            result.doc_name.as_str(),
            page.as_str(),
            result.position.as_str(),
            result.text.as_str(),
            result.chunk_id.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Suggested download name: the first 20 characters of the query.
pub fn export_file_name(query: &str) -> String {
    let prefix: String = query.chars().take(20).collect();
    format!("protocol_search_{prefix}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, PageDimensions};
    use crate::position::PositionLabel;

    #[test]
    fn test_write_csv() {
        let results = vec![Citation {
            chunk_id: "c1".to_string(),
            doc_name: "a.pdf".to_string(),
            page: 4,
            position: "bottom-left".parse::<PositionLabel>().unwrap(),
            text: "Dose, \"daily\"".to_string(),
            bbox: BoundingBox::default(),
            page_dims: PageDimensions::default(),
        }];

        let mut out = Vec::new();
        write_csv(&mut out, "dosing", &results).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Query,Document,Page,Position,Text,Chunk_ID\n\
             dosing,a.pdf,4,bottom-left,\"Dose, \"\"daily\"\"\",c1\n"
        );
    }

    #[test]
    fn test_empty_results_write_header_only() {
        let mut out = Vec::new();
        write_csv(&mut out, "q", &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Query,Document,Page,Position,Text,Chunk_ID\n"
        );
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("dose"), "protocol_search_dose.csv");
        assert_eq!(
            export_file_name("what are the inclusion criteria"),
            "protocol_search_what are the inclusi.csv"
        );
    }
}
