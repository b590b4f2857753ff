//! Query answering
//!
//! [`answer`] looks for the query in the corpus and returns the text that
//! follows it:
//!
//! 1. **Exact phase** – first case-insensitive occurrence of the whole
//!    query; the excerpt starts right after it.
//! 2. **Word fallback** – otherwise, the first occurrence of each query word
//!    on its own, one excerpt per word that was found, in query order.
//!
//! Excerpts are at most [`EXCERPT_CHARS`] characters and end in
//! [`TRUNCATION_MARKER`] when cut short. Only first occurrences count:
//! there is no enumeration of later matches and no ranking.

mod matcher;
mod snippet;

pub use matcher::{fold_case, QueryMatcher, WORD_EXCERPT_SEPARATOR};
pub use snippet::{SnippetBuilder, EXCERPT_CHARS, TRUNCATION_MARKER};

use serde::Serialize;

use crate::corpus::Corpus;

/// A trimmed, lower-cased, non-empty query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    normalized: String,
}

impl Query {
    /// Normalize user input; `None` for blank input
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = fold_case(raw.trim());
        if normalized.is_empty() {
            return None;
        }
        Some(Self { normalized })
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Whitespace-separated words, in query order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.normalized.split_whitespace()
    }
}

/// Outcome of one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    /// No document has been uploaded yet
    UploadRequired,
    /// The whole query was found
    ExactMatch { excerpt: String },
    /// The whole query was not found, but some of its words were
    WordMatch { excerpt: String },
    /// Neither the query nor any of its words were found
    NoMatch,
}

impl MatchResult {
    /// Variant name as it appears in JSON
    pub fn kind(&self) -> &'static str {
        match self {
            MatchResult::UploadRequired => "upload_required",
            MatchResult::ExactMatch { .. } => "exact_match",
            MatchResult::WordMatch { .. } => "word_match",
            MatchResult::NoMatch => "no_match",
        }
    }

    pub fn excerpt(&self) -> Option<&str> {
        match self {
            MatchResult::ExactMatch { excerpt } | MatchResult::WordMatch { excerpt } => {
                Some(excerpt.as_str())
            }
            MatchResult::UploadRequired | MatchResult::NoMatch => None,
        }
    }
}

/// Answer `raw_query` against `corpus`.
///
/// An empty corpus always yields [`MatchResult::UploadRequired`]. A blank
/// query yields `None`: nothing is matched and no reply should be produced.
pub fn answer(corpus: &Corpus, raw_query: &str) -> Option<MatchResult> {
    if corpus.is_empty() {
        return Some(MatchResult::UploadRequired);
    }
    let query = Query::parse(raw_query)?;
    Some(QueryMatcher::default().run(corpus.text(), &query))
}
