//! Concurrent page extraction
//!
//! Pages are requested concurrently and complete in any order. Each result
//! is written into the slot for its page index, so the output order never
//! depends on completion order.

use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::config::ExtractionConfig;
use crate::document::{ExtractionError, Page, PageTextSource, Result};

/// Extracts every page of a document, all or nothing
#[derive(Debug, Clone)]
pub struct PageExtractor {
    max_concurrent: usize,
    page_timeout: Duration,
}

impl PageExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent_pages.max(1),
            page_timeout: config.page_timeout(),
        }
    }

    /// Extract pages `1..=N` and return them in index order.
    ///
    /// The first failing page fails the whole extraction; requests still in
    /// flight are dropped.
    pub async fn extract(&self, source: &dyn PageTextSource) -> Result<Vec<Page>> {
        let page_count = source.page_count();
        if page_count == 0 {
            return Err(ExtractionError::Open("document has no pages".into()));
        }

        tracing::debug!(
            pages = page_count,
            concurrency = self.max_concurrent,
            "Extracting pages"
        );

        let timeout = self.page_timeout;
        let mut slots: Vec<Option<String>> = vec![None; page_count];

        let mut pending = stream::iter(1..=page_count)
            .map(move |index| async move {
                let text = tokio::time::timeout(timeout, source.extract_page_text(index))
                    .await
                    .map_err(|_| ExtractionError::Timeout {
                        page: index,
                        secs: timeout.as_secs(),
                    })??;
                Ok::<_, ExtractionError>((index, text))
            })
            .buffer_unordered(self.max_concurrent);

        while let Some(result) = pending.next().await {
            let (index, text) = result?;
            let slot = index
                .checked_sub(1)
                .and_then(|i| slots.get_mut(i))
                .ok_or(ExtractionError::PageNotFound(index))?;
            if slot.is_some() {
                return Err(ExtractionError::DuplicatePage(index));
            }
            *slot = Some(text);
            tracing::trace!(page = index, "Page extracted");
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.map(|text| Page::new(i + 1, text))
                    .ok_or(ExtractionError::MissingPage(i + 1))
            })
            .collect()
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}
