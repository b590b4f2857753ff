//! Chat session
//!
//! Owns the one corpus of the session and the conversation transcript.
//!
//! - Only the latest upload matters: starting a new upload aborts the one
//!   still extracting, and a stale build can never install its corpus.
//! - A failed upload leaves the previous corpus in place and adds an
//!   advisory reply instead of the success confirmation.
//! - Blank queries produce no turn at all.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::task::AbortHandle;

use super::types::{
    render_reply, ChatTurn, Message, UploadSummary, UPLOAD_FAILED_PREFIX, UPLOAD_SUCCESS_REPLY,
};
use crate::config::{ExtractionConfig, UploadConfig};
use crate::corpus::{build_corpus, BuildTicket, Corpus, CorpusStore, PageExtractor};
use crate::document::{
    decode_upload, DocumentOpener, ExtractionError, RawDocument, UploadError,
};
use crate::query::{answer, Query};

/// One user's conversation with one document at a time
#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<ChatSessionInner>,
}

struct ChatSessionInner {
    opener: Arc<dyn DocumentOpener>,
    extractor: PageExtractor,
    upload: UploadConfig,
    corpus: CorpusStore,
    transcript: RwLock<Vec<Message>>,
    /// Extraction currently running, tagged with its build generation
    in_flight: Mutex<Option<(u64, AbortHandle)>>,
}

impl ChatSession {
    pub fn new(
        opener: Arc<dyn DocumentOpener>,
        upload: UploadConfig,
        extraction: &ExtractionConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ChatSessionInner {
                opener,
                extractor: PageExtractor::new(extraction),
                upload,
                corpus: CorpusStore::new(),
                transcript: RwLock::new(Vec::new()),
                in_flight: Mutex::new(None),
            }),
        }
    }

    // ========================================================================
    // Upload
    // ========================================================================

    /// Decode a data URL (or bare base64) and load it as the new document
    pub async fn upload(&self, encoded: &str) -> Result<UploadSummary, UploadError> {
        match decode_upload(encoded) {
            Ok(decoded) => self.upload_bytes(decoded.bytes).await,
            Err(err) => {
                let err = UploadError::from(err);
                self.push_upload_failure(&err);
                Err(err)
            }
        }
    }

    /// Load raw bytes as the new document
    pub async fn upload_bytes(&self, bytes: Vec<u8>) -> Result<UploadSummary, UploadError> {
        let max = self.inner.upload.max_bytes;
        if bytes.len() > max {
            let err = UploadError::TooLarge {
                size: bytes.len(),
                max,
            };
            self.push_upload_failure(&err);
            return Err(err);
        }

        let document = RawDocument::new(bytes);
        let size = document.len();

        // Ticket, spawn and registration happen under one guard so the
        // in-flight entry always belongs to the newest ticket.
        let (ticket, handle) = {
            let mut in_flight = self.inner.in_flight.lock();
            let ticket = self.inner.corpus.begin_build();
            tracing::info!(generation = ticket.generation(), bytes = size, "Upload started");

            let inner = self.inner.clone();
            let handle = tokio::spawn(async move {
                build_corpus(inner.opener.as_ref(), document, &inner.extractor).await
            });

            let previous = in_flight
                .replace((ticket.generation(), handle.abort_handle()))
                .filter(|(generation, _)| *generation < ticket.generation());
            if let Some((generation, stale)) = previous {
                tracing::warn!(generation, "Cancelling superseded upload");
                stale.abort();
            }
            (ticket, handle)
        };

        let outcome = handle.await;
        self.clear_in_flight(ticket);

        let built = match outcome {
            Ok(built) => built,
            Err(join_err) if join_err.is_cancelled() => return Err(UploadError::Superseded),
            Err(join_err) => Err(ExtractionError::Task(join_err.to_string())),
        };

        match built {
            Ok(corpus) => self.finish_upload(ticket, corpus),
            Err(_) if !self.inner.corpus.is_latest(ticket) => Err(UploadError::Superseded),
            Err(err) => {
                tracing::warn!(generation = ticket.generation(), error = %err, "Upload failed");
                let err = UploadError::from(err);
                self.push_upload_failure(&err);
                Err(err)
            }
        }
    }

    fn finish_upload(&self, ticket: BuildTicket, corpus: Corpus) -> Result<UploadSummary, UploadError> {
        let pages = corpus.page_count();
        let characters = corpus.char_count();

        if !self.inner.corpus.install(ticket, corpus) {
            return Err(UploadError::Superseded);
        }

        let message = Message::assistant(UPLOAD_SUCCESS_REPLY);
        self.inner.transcript.write().push(message.clone());

        tracing::info!(
            generation = ticket.generation(),
            pages,
            characters,
            "Upload complete"
        );

        Ok(UploadSummary {
            pages,
            characters,
            message,
        })
    }

    fn clear_in_flight(&self, ticket: BuildTicket) {
        let mut in_flight = self.inner.in_flight.lock();
        if matches!(*in_flight, Some((generation, _)) if generation == ticket.generation()) {
            *in_flight = None;
        }
    }

    fn push_upload_failure(&self, err: &UploadError) {
        let message = Message::assistant(format!("{}{}", UPLOAD_FAILED_PREFIX, err));
        self.inner.transcript.write().push(message);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Answer a query and record the turn.
    ///
    /// Returns `None` for blank input, which leaves the transcript untouched.
    pub fn ask(&self, raw_query: &str) -> Option<ChatTurn> {
        if Query::parse(raw_query).is_none() {
            return None;
        }

        let corpus = self.inner.corpus.current();
        let result = answer(&corpus, raw_query)?;

        let query = Message::user(raw_query.trim());
        let reply = Message::assistant(render_reply(&result));
        {
            let mut transcript = self.inner.transcript.write();
            transcript.push(query.clone());
            transcript.push(reply.clone());
        }

        tracing::debug!(result = result.kind(), "Query answered");

        Some(ChatTurn {
            query,
            reply,
            result,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Snapshot of the current corpus
    pub fn corpus(&self) -> Arc<Corpus> {
        self.inner.corpus.current()
    }

    /// Copy of the transcript, oldest first
    pub fn messages(&self) -> Vec<Message> {
        self.inner.transcript.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::{Author, NO_MATCH_REPLY, UPLOAD_REQUIRED_REPLY};
    use crate::corpus::testing::ScriptedOpener;
    use crate::query::MatchResult;

    fn session(scripts: Vec<(Vec<&'static str>, Vec<u64>)>) -> ChatSession {
        ChatSession::new(
            Arc::new(ScriptedOpener::new(scripts)),
            UploadConfig { max_bytes: 64 },
            &ExtractionConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_ask_before_upload() {
        let session = session(vec![]);

        let turn = session.ask("what is this?").unwrap();

        assert_eq!(turn.result, MatchResult::UploadRequired);
        assert_eq!(turn.reply.text, UPLOAD_REQUIRED_REPLY);
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_query_adds_no_turn() {
        let session = session(vec![]);
        assert!(session.ask("   ").is_none());
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_upload_then_ask() {
        let session = session(vec![(vec!["The quick brown", "fox jumps"], vec![5, 1])]);

        let summary = session.upload_bytes(vec![0]).await.unwrap();
        assert_eq!(summary.pages, 2);
        assert_eq!(summary.characters, "The quick brown\nfox jumps".len());
        assert_eq!(summary.message.text, UPLOAD_SUCCESS_REPLY);

        let turn = session.ask("Quick").unwrap();
        assert_eq!(
            turn.result,
            MatchResult::ExactMatch {
                excerpt: " brown\nfox jumps".into()
            }
        );
        assert_eq!(turn.query.author, Author::User);
        assert_eq!(turn.query.text, "Quick");

        let turn = session.ask("zebra").unwrap();
        assert_eq!(turn.reply.text, NO_MATCH_REPLY);

        let authors: Vec<Author> = session.messages().iter().map(|m| m.author).collect();
        assert_eq!(
            authors,
            vec![
                Author::Assistant,
                Author::User,
                Author::Assistant,
                Author::User,
                Author::Assistant
            ]
        );
    }

    #[tokio::test]
    async fn test_new_upload_replaces_corpus() {
        let session = session(vec![(vec!["first document"], vec![]), (vec!["second one"], vec![])]);

        session.upload_bytes(vec![0]).await.unwrap();
        assert_eq!(session.corpus().text(), "first document");

        session.upload_bytes(vec![1]).await.unwrap();
        assert_eq!(session.corpus().text(), "second one");
        assert_eq!(session.ask("first").unwrap().result, MatchResult::NoMatch);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_previous_corpus() {
        let session = session(vec![(vec!["kept text"], vec![])]);
        session.upload_bytes(vec![0]).await.unwrap();

        // No script 9: the opener rejects the document
        let err = session.upload_bytes(vec![9]).await.unwrap_err();
        assert!(matches!(err, UploadError::Extraction(_)));
        assert_eq!(session.corpus().text(), "kept text");

        let last = session.messages().pop().unwrap();
        assert!(last.text.starts_with(UPLOAD_FAILED_PREFIX));
    }

    #[tokio::test]
    async fn test_decode_failure_is_reported() {
        let session = session(vec![]);
        let err = session.upload("data:application/pdf;base64,%%%").await.unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)));
        assert_eq!(session.messages().len(), 1);
        assert!(session.corpus().is_empty());
    }

    #[tokio::test]
    async fn test_upload_too_large() {
        let session = session(vec![]);
        let err = session.upload_bytes(vec![0; 65]).await.unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { size: 65, max: 64 }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_uploads_never_both_superseded() {
        for round in 0..16 {
            let session = session(vec![
                (vec!["document zero"], vec![50]),
                (vec!["document one", "second page"], vec![50, 50]),
            ]);

            let first = {
                let session = session.clone();
                tokio::spawn(async move { session.upload_bytes(vec![0]).await })
            };
            let second = {
                let session = session.clone();
                tokio::spawn(async move { session.upload_bytes(vec![1]).await })
            };
            let results = [first.await.unwrap(), second.await.unwrap()];

            for result in &results {
                if let Err(err) = result {
                    assert!(matches!(err, UploadError::Superseded), "round {}: {:?}", round, err);
                }
            }
            let installed: Vec<usize> = results
                .iter()
                .filter_map(|r| r.as_ref().ok())
                .map(|summary| summary.pages)
                .collect();
            assert!(!installed.is_empty(), "round {}: both uploads lost", round);
            assert!(installed.contains(&session.corpus().page_count()));
            assert!(session.inner.in_flight.lock().is_none());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_upload_supersedes_in_flight_one() {
        let session = session(vec![
            (vec!["slow old document"], vec![10_000]),
            (vec!["fresh document"], vec![10]),
        ]);

        let slow = {
            let session = session.clone();
            tokio::spawn(async move { session.upload_bytes(vec![0]).await })
        };
        // Let the slow upload start extracting
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;

        session.upload_bytes(vec![1]).await.unwrap();

        let stale = slow.await.unwrap();
        assert!(matches!(stale, Err(UploadError::Superseded)));
        assert_eq!(session.corpus().text(), "fresh document");

        let successes = session
            .messages()
            .iter()
            .filter(|m| m.text == UPLOAD_SUCCESS_REPLY)
            .count();
        assert_eq!(successes, 1);
    }
}
