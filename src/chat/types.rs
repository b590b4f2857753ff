//! Transcript types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::MatchResult;

// ============================================================================
// Reply texts
// ============================================================================

pub const UPLOAD_REQUIRED_REPLY: &str = "Please upload a PDF first.";
pub const EXACT_MATCH_PREFIX: &str = "I found a match in the document:\n\n";
pub const WORD_MATCH_PREFIX: &str =
    "I couldn't find that exact phrase, but found related passages:\n\n";
pub const NO_MATCH_REPLY: &str = "I couldn't find anything related to that in the document.";
pub const UPLOAD_SUCCESS_REPLY: &str = "PDF uploaded successfully!";
pub const UPLOAD_FAILED_PREFIX: &str = "I couldn't read that document: ";

/// Render a match result as the assistant's reply
pub fn render_reply(result: &MatchResult) -> String {
    match result {
        MatchResult::UploadRequired => UPLOAD_REQUIRED_REPLY.to_string(),
        MatchResult::ExactMatch { excerpt } => format!("{}{}", EXACT_MATCH_PREFIX, excerpt),
        MatchResult::WordMatch { excerpt } => format!("{}{}", WORD_MATCH_PREFIX, excerpt),
        MatchResult::NoMatch => NO_MATCH_REPLY.to_string(),
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

/// One entry in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub author: Author,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Author::Assistant, text)
    }
}

/// A query and the reply it produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub query: Message,
    pub reply: Message,
    pub result: MatchResult,
}

/// Outcome of a successful upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub pages: usize,
    pub characters: usize,
    pub message: Message,
}
