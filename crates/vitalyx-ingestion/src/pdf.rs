//! PDF text extraction for uploaded lab reports.

use lopdf::Document;
use vitalyx_common::error::{Result, VitalyxError};

/// Extract the text of every page of an in-memory PDF.
///
/// An unreadable document is an error at this boundary; a readable document
/// with no recognizable markers is not — that case surfaces downstream as a
/// partial (or empty) panel.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| VitalyxError::Extraction(format!("unreadable PDF: {e}")))?;

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Err(VitalyxError::Extraction("PDF has no pages".to_string()));
    }

    let text = doc
        .extract_text(&pages)
        .map_err(|e| VitalyxError::Extraction(format!("text extraction failed: {e}")))?;

    tracing::debug!(pages = pages.len(), chars = text.len(), "PDF text extracted");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_an_extraction_error() {
        let err = extract_text_from_pdf(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, VitalyxError::Extraction(_)));
    }

    #[test]
    fn test_empty_input_is_an_extraction_error() {
        assert!(extract_text_from_pdf(&[]).is_err());
    }
}
