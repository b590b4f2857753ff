//! Low-level MuPDF wrapper
//!
//! MuPDF's `fz_context` is **not** thread-safe. The `mupdf` crate gives
//! every thread its own context; [`SafeDocument`] opens a fresh document per
//! operation on that context, so callers may share it across blocking
//! worker threads without locking.

mod safe;

pub use safe::SafeDocument;
