//! Document traits
//!
//! Seams to the document-parsing library. The corpus pipeline only ever
//! sees these traits, so tests can drive it with in-memory sources.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::types::RawDocument;

/// Per-page text access for one opened document
#[async_trait]
pub trait PageTextSource: Send + Sync {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Extract plain text from a page (`index` is 1-based)
    async fn extract_page_text(&self, index: usize) -> Result<String>;
}

/// Opens raw bytes into a `PageTextSource`
#[async_trait]
pub trait DocumentOpener: Send + Sync {
    async fn open(&self, document: RawDocument) -> Result<Arc<dyn PageTextSource>>;
}
