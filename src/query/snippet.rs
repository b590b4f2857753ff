//! Excerpt construction
//!
//! An excerpt is the window of corpus text that follows a match, at most
//! [`EXCERPT_CHARS`] characters long. Windows cut short by the limit end in
//! [`TRUNCATION_MARKER`]; windows that reach the end of the corpus do not,
//! even when exactly [`EXCERPT_CHARS`] characters were left.

/// Maximum excerpt length in characters
pub const EXCERPT_CHARS: usize = 150;

/// Appended when more text existed beyond the window
pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, Copy)]
pub struct SnippetBuilder {
    max_chars: usize,
}

impl SnippetBuilder {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Window of `text` starting at byte offset `start`.
    ///
    /// `start` must lie on a char boundary; offsets past the end yield an
    /// empty excerpt.
    pub fn excerpt(&self, text: &str, start: usize) -> String {
        let rest = text.get(start..).unwrap_or_default();
        match rest.char_indices().nth(self.max_chars) {
            Some((cut, _)) => {
                let mut excerpt = String::with_capacity(cut + TRUNCATION_MARKER.len());
                excerpt.push_str(&rest[..cut]);
                excerpt.push_str(TRUNCATION_MARKER);
                excerpt
            }
            None => rest.to_string(),
        }
    }
}

impl Default for SnippetBuilder {
    fn default() -> Self {
        Self::new(EXCERPT_CHARS)
    }
}
