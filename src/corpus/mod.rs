//! Corpus construction
//!
//! ```text
//! RawDocument ─▶ DocumentOpener ─▶ PageExtractor ─▶ assemble ─▶ CorpusStore
//!                                 (slots 1..=N,      (index order,
//!                                  any completion)    "\n" between pages)
//! ```
//!
//! A corpus is installed only after every page has been extracted, and it
//! replaces the previous one as a whole.

mod assembler;
mod extractor;
mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::{assemble, Corpus, PAGE_SEPARATOR};
pub use extractor::PageExtractor;
pub use store::{BuildTicket, CorpusStore};

use crate::document::{DocumentOpener, RawDocument, Result};

/// Open a document, extract all pages and assemble them.
///
/// No partial corpus is ever returned: any page failure fails the build.
pub async fn build_corpus(
    opener: &dyn DocumentOpener,
    document: RawDocument,
    extractor: &PageExtractor,
) -> Result<Corpus> {
    let source = opener.open(document).await?;
    let pages = extractor.extract(source.as_ref()).await?;
    Ok(assemble(&pages))
}
