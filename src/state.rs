//! Application state management

use std::sync::Arc;

use crate::chat::ChatSession;
use crate::config::Config;
use crate::document::DocumentOpener;
use crate::pdf::MupdfOpener;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    session: ChatSession,
}

impl AppState {
    /// Create state backed by MuPDF
    pub fn new(config: Config) -> Self {
        Self::with_opener(config, Arc::new(MupdfOpener))
    }

    /// Create state with a custom document opener
    pub fn with_opener(config: Config, opener: Arc<dyn DocumentOpener>) -> Self {
        let session = ChatSession::new(opener, config.upload.clone(), &config.extraction);
        Self {
            inner: Arc::new(AppStateInner { config, session }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the chat session
    pub fn session(&self) -> &ChatSession {
        &self.inner.session
    }
}
