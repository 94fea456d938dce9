//! Plain-text extraction from uploaded PDF byte streams.
//!
//! Extraction sits behind the [`TextExtractor`] trait so the pipeline can
//! be exercised in tests without real PDF bytes. The production
//! implementation, [`PdfExtractor`], hands each stream to `pdf-extract`,
//! which walks the pages in page order.

use crate::error::{Error, Result};
use crate::models::UploadedDocument;

/// Capability interface for turning uploaded documents into one string.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of every document, in input order, joined with
    /// newlines. A single malformed document fails the whole batch —
    /// there is no partial-document recovery.
    fn extract(&self, documents: &[UploadedDocument]) -> Result<String>;
}

/// PDF text extractor backed by the `pdf-extract` crate.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, documents: &[UploadedDocument]) -> Result<String> {
        let mut texts = Vec::with_capacity(documents.len());
        for doc in documents {
            let text = pdf_extract::extract_text_from_mem(&doc.bytes)
                .map_err(|e| Error::DocumentParse(format!("{}: {}", doc.filename, e)))?;
            texts.push(text);
        }
        Ok(texts.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pdf_returns_parse_error() {
        let docs = vec![UploadedDocument::new("bad.pdf", b"not a pdf".to_vec())];
        let err = PdfExtractor.extract(&docs).unwrap_err();
        assert!(matches!(err, Error::DocumentParse(_)));
        assert!(err.to_string().contains("bad.pdf"));
    }

    #[test]
    fn one_bad_document_fails_the_batch() {
        let docs = vec![
            UploadedDocument::new("first.pdf", b"%PDF-garbage".to_vec()),
            UploadedDocument::new("second.pdf", b"also garbage".to_vec()),
        ];
        assert!(PdfExtractor.extract(&docs).is_err());
    }

    #[test]
    fn no_documents_yields_empty_text() {
        assert_eq!(PdfExtractor.extract(&[]).unwrap(), "");
    }
}
