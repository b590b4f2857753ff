//! Document input
//!
//! Everything between an encoded upload and per-page text:
//!
//! ```text
//! data URL ──decode_upload──▶ RawDocument ──DocumentOpener──▶ PageTextSource
//!                                                               │
//!                                              extract_page_text(1..=N)
//! ```
//!
//! The concrete MuPDF-backed opener lives in [`crate::pdf`].

mod decode;
mod error;
mod traits;
mod types;

pub use decode::{decode_upload, DecodedUpload};
pub use error::{DecodeError, ExtractionError, Result, UploadError};
pub use traits::{DocumentOpener, PageTextSource};
pub use types::{DocumentFormat, Page, RawDocument};
