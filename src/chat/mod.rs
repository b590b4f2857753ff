//! Conversation layer
//!
//! [`ChatSession`] ties the corpus pipeline and the query matcher to a
//! transcript of [`Message`]s.

mod session;
mod types;

pub use session::ChatSession;
pub use types::{
    render_reply, Author, ChatTurn, Message, UploadSummary, EXACT_MATCH_PREFIX, NO_MATCH_REPLY,
    UPLOAD_FAILED_PREFIX, UPLOAD_REQUIRED_REPLY, UPLOAD_SUCCESS_REPLY, WORD_MATCH_PREFIX,
};
