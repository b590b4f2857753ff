//! PDF format implementation
//!
//! - [`PdfTextSource`]: per-page text extraction via [`SafeDocument`](crate::mupdf::SafeDocument)
//! - [`MupdfOpener`]: the production [`DocumentOpener`](crate::document::DocumentOpener)

mod parser;

#[cfg(test)]
pub(crate) mod testing;

pub use parser::{flatten_page_text, MupdfOpener, PdfTextSource};
