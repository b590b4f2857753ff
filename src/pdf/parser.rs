//! PDF page text extraction
//!
//! Implements `PageTextSource` and `DocumentOpener` on top of MuPDF.
//! MuPDF calls are CPU-bound and run on the blocking thread pool.

use std::sync::Arc;

use async_trait::async_trait;

use crate::document::{DocumentOpener, ExtractionError, PageTextSource, RawDocument, Result};
use crate::mupdf::SafeDocument;

/// Page text access for one PDF
pub struct PdfTextSource {
    doc: Arc<SafeDocument>,
}

impl PdfTextSource {
    /// Open a PDF from raw bytes
    pub fn from_raw(raw: RawDocument) -> Result<Self> {
        let doc = SafeDocument::open(raw)?;
        Ok(Self { doc: Arc::new(doc) })
    }

    fn validate_index(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.doc.page_count() {
            return Err(ExtractionError::PageNotFound(index));
        }
        Ok(())
    }
}

#[async_trait]
impl PageTextSource for PdfTextSource {
    fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    async fn extract_page_text(&self, index: usize) -> Result<String> {
        self.validate_index(index)?;
        let doc = self.doc.clone();

        tokio::task::spawn_blocking(move || {
            doc.with_doc(|mupdf_doc| {
                let page = mupdf_doc
                    .load_page((index - 1) as i32)
                    .map_err(|e| page_error(index, e))?;
                let text = page.to_text().map_err(|e| page_error(index, e))?;
                Ok(flatten_page_text(&text))
            })
        })
        .await
        .map_err(|e| ExtractionError::Task(format!("page {}: {}", index, e)))?
    }
}

fn page_error(page: usize, err: mupdf::Error) -> ExtractionError {
    ExtractionError::Page {
        page,
        reason: err.to_string(),
    }
}

/// Collapse the layout whitespace MuPDF emits (line breaks, column gaps)
/// into single spaces so phrases broken across lines still match.
pub fn flatten_page_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Opens uploads with MuPDF
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfOpener;

#[async_trait]
impl DocumentOpener for MupdfOpener {
    async fn open(&self, document: RawDocument) -> Result<Arc<dyn PageTextSource>> {
        let source = tokio::task::spawn_blocking(move || PdfTextSource::from_raw(document))
            .await
            .map_err(|e| ExtractionError::Task(format!("open: {}", e)))??;

        tracing::debug!(pages = source.page_count(), "Opened PDF");
        Ok(Arc::new(source))
    }
}
