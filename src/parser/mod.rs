pub mod cards;
pub mod markup;

use std::path::Path;

use crate::catalog::RawRecord;
use crate::error::SyncError;

/// Extract tool records from catalog markup. Zero records is an error: it
/// almost always means the card markup changed, not that the catalog is empty.
pub fn extract_records(markup: &str, source: &Path) -> Result<Vec<RawRecord>, SyncError> {
    let records = cards::extract_cards(markup);
    if records.is_empty() {
        return Err(SyncError::EmptyExtraction(source.to_path_buf()));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_extraction_is_an_error() {
        let err = extract_records("<html></html>", Path::new("index.html")).unwrap_err();
        assert!(matches!(err, SyncError::EmptyExtraction(p) if p == Path::new("index.html")));
    }

    #[test]
    fn fixture_extracts() {
        let html = std::fs::read_to_string("tests/fixtures/catalog.html").unwrap();
        let records = extract_records(&html, Path::new("catalog.html")).unwrap();
        assert_eq!(records.len(), 4);
    }
}
