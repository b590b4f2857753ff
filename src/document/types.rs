//! Core document types
//!
//! The byte buffer handed over by the upload surface and the per-page text
//! produced from it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
}

impl DocumentFormat {
    /// Detect format from MIME type
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect format from magic bytes
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PDF magic: %PDF
        if bytes.starts_with(b"%PDF") {
            return Some(Self::Pdf);
        }

        None
    }

    /// MIME type handed to the parser
    pub fn mime(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
        }
    }
}

/// One uploaded document as raw bytes.
///
/// Cheap to clone; the buffer is shared and never mutated.
#[derive(Debug, Clone)]
pub struct RawDocument {
    bytes: Arc<Vec<u8>>,
    format: Option<DocumentFormat>,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        let format = DocumentFormat::from_magic_bytes(&bytes);
        Self {
            bytes: Arc::new(bytes),
            format,
        }
    }

    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    /// Format detected from the leading bytes, if recognised
    pub fn format(&self) -> Option<DocumentFormat> {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Text of a single page.
///
/// `index` is 1-based, matching how readers number pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub text: String,
}

impl Page {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}
