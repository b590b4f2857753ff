//! Thread-safe document wrapper for MuPDF
//!
//! A `mupdf::Document` is tied to the `fz_context` of the thread that opened
//! it and must not cross threads. This wrapper keeps only the raw bytes and
//! opens a fresh document inside each operation, on the calling thread's
//! own context. No MuPDF handle outlives the closure it was opened for, so
//! operations on different threads never share MuPDF state and run in
//! parallel.

use mupdf::Document;

use crate::document::{DocumentFormat, ExtractionError, RawDocument, Result};

/// Shareable handle to one document
pub struct SafeDocument {
    raw: RawDocument,
    format: DocumentFormat,
    /// Cached page count
    page_count: usize,
}

impl SafeDocument {
    /// Validate the bytes and read the page count
    pub fn open(raw: RawDocument) -> Result<Self> {
        let format = raw
            .format()
            .ok_or_else(|| ExtractionError::UnsupportedFormat("not a PDF document".into()))?;

        let doc = Document::from_bytes(raw.bytes(), format.mime())?;
        let page_count = doc.page_count()?;
        let page_count = usize::try_from(page_count)
            .map_err(|_| ExtractionError::Open(format!("invalid page count {}", page_count)))?;

        Ok(Self {
            raw,
            format,
            page_count,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn open_document(&self) -> Result<Document> {
        Document::from_bytes(self.raw.bytes(), self.format.mime()).map_err(Into::into)
    }

    /// Execute a closure with access to a freshly opened document
    ///
    /// ```ignore
    /// let text = safe_doc.with_doc(|doc| {
    ///     let page = doc.load_page(0)?;
    ///     Ok(page.to_text()?)
    /// })?;
    /// ```
    pub fn with_doc<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Document) -> Result<R>,
    {
        let doc = self.open_document()?;
        f(&doc)
    }
}
