//! In-memory page sources for tests

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::document::{
    DocumentOpener, ExtractionError, PageTextSource, RawDocument, Result,
};

/// Serves fixed page texts with optional per-page delays and failures,
/// recording the order in which pages completed.
#[derive(Default)]
pub struct ScriptedSource {
    pages: Vec<String>,
    delays_ms: Vec<u64>,
    fail_on: Option<usize>,
    completed: Mutex<Vec<usize>>,
}

impl ScriptedSource {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_delays_ms(mut self, delays: &[u64]) -> Self {
        self.delays_ms = delays.to_vec();
        self
    }

    pub fn failing_on(mut self, page: usize) -> Self {
        self.fail_on = Some(page);
        self
    }

    pub fn completion_order(&self) -> Vec<usize> {
        self.completed.lock().clone()
    }
}

#[async_trait]
impl PageTextSource for ScriptedSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn extract_page_text(&self, index: usize) -> Result<String> {
        if let Some(delay) = self.delays_ms.get(index - 1).copied().filter(|d| *d > 0) {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_on == Some(index) {
            return Err(ExtractionError::Page {
                page: index,
                reason: "scripted failure".into(),
            });
        }
        let text = self
            .pages
            .get(index - 1)
            .cloned()
            .ok_or(ExtractionError::PageNotFound(index))?;
        self.completed.lock().push(index);
        Ok(text)
    }
}

/// Opener that ignores the bytes and serves a script per upload.
///
/// The first byte of the upload selects the script, which lets a test
/// tell concurrent uploads apart.
pub struct ScriptedOpener {
    scripts: Vec<(Vec<&'static str>, Vec<u64>)>,
}

impl ScriptedOpener {
    pub fn new(scripts: Vec<(Vec<&'static str>, Vec<u64>)>) -> Self {
        Self { scripts }
    }
}

#[async_trait]
impl DocumentOpener for ScriptedOpener {
    async fn open(&self, document: RawDocument) -> Result<Arc<dyn PageTextSource>> {
        let pick = document.bytes().first().copied().unwrap_or(0) as usize;
        let (pages, delays) = self
            .scripts
            .get(pick)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(format!("no script {}", pick)))?;
        Ok(Arc::new(ScriptedSource::new(pages).with_delays_ms(delays)))
    }
}
