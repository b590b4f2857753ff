//! Current-corpus holder
//!
//! One writer replaces the whole corpus; readers clone the `Arc` and keep
//! working on the snapshot they got. Builds are ticketed so that a build
//! started before a newer one can never overwrite it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::assembler::Corpus;

/// Proof that a build was started; only the latest ticket may install
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildTicket(u64);

impl BuildTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Holds exactly one corpus at a time
#[derive(Debug, Default)]
pub struct CorpusStore {
    current: RwLock<Arc<Corpus>>,
    latest: AtomicU64,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current corpus
    pub fn current(&self) -> Arc<Corpus> {
        self.current.read().clone()
    }

    /// Start a build; every ticket issued earlier becomes stale
    pub fn begin_build(&self) -> BuildTicket {
        BuildTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the most recent build
    pub fn is_latest(&self, ticket: BuildTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Replace the corpus if `ticket` is still the latest build.
    ///
    /// Returns `false` (and leaves the corpus untouched) for stale tickets.
    pub fn install(&self, ticket: BuildTicket, corpus: Corpus) -> bool {
        let mut current = self.current.write();
        if !self.is_latest(ticket) {
            tracing::warn!(
                generation = ticket.generation(),
                "Discarding corpus from superseded build"
            );
            return false;
        }
        *current = Arc::new(corpus);
        tracing::info!(
            generation = ticket.generation(),
            pages = current.page_count(),
            "Corpus installed"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let store = CorpusStore::new();
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_install_replaces_previous_corpus() {
        let store = CorpusStore::new();

        let first = store.begin_build();
        assert!(store.install(first, Corpus::from("first document")));
        assert_eq!(store.current().text(), "first document");

        let second = store.begin_build();
        assert!(store.install(second, Corpus::from("second document")));
        assert_eq!(store.current().text(), "second document");
    }

    #[test]
    fn test_stale_ticket_cannot_install() {
        let store = CorpusStore::new();
        let old = store.begin_build();
        let new = store.begin_build();

        assert!(!store.is_latest(old));
        assert!(store.install(new, Corpus::from("new")));
        assert!(!store.install(old, Corpus::from("old")));
        assert_eq!(store.current().text(), "new");
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let store = CorpusStore::new();
        let ticket = store.begin_build();
        store.install(ticket, Corpus::from("before"));

        let snapshot = store.current();
        let ticket = store.begin_build();
        store.install(ticket, Corpus::from("after"));

        assert_eq!(snapshot.text(), "before");
        assert_eq!(store.current().text(), "after");
    }
}
