//! Document error types
//!
//! Failures on the way from an encoded upload to a corpus. Query matching
//! has no error type: every query maps to a `MatchResult`.

use thiserror::Error;

/// The upload could not be turned into bytes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Nothing was sent
    #[error("Upload is empty")]
    Empty,

    /// `data:` URL without the `,` separating header from payload
    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),

    /// Only base64 payloads are supported
    #[error("Unsupported data URL encoding: {0}")]
    UnsupportedEncoding(String),

    /// Payload is not valid base64
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Text could not be extracted from the document
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Leading bytes do not match a supported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The parser rejected the document as a whole
    #[error("Failed to open document: {0}")]
    Open(String),

    /// Page index outside `1..=page_count`
    #[error("Page not found: {0}")]
    PageNotFound(usize),

    /// The parser failed on one page
    #[error("Failed to extract text from page {page}: {reason}")]
    Page { page: usize, reason: String },

    /// A page did not finish in time
    #[error("Page {page} timed out after {secs} seconds")]
    Timeout { page: usize, secs: u64 },

    /// A page slot was still empty after all pages joined
    #[error("No text produced for page {0}")]
    MissingPage(usize),

    /// A page slot was written twice
    #[error("Page {0} was extracted more than once")]
    DuplicatePage(usize),

    /// Blocking worker panicked or was cancelled
    #[error("Extraction task failed: {0}")]
    Task(String),
}

impl From<mupdf::Error> for ExtractionError {
    fn from(err: mupdf::Error) -> Self {
        ExtractionError::Open(err.to_string())
    }
}

/// Why an upload did not produce a new corpus
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Decoded document exceeds the configured limit
    #[error("Document too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },

    /// A newer upload replaced this one before it finished
    #[error("Upload superseded by a newer upload")]
    Superseded,
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractionError>;
