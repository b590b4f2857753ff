//! Case-insensitive matching
//!
//! Matching runs on a lower-cased copy of the corpus; excerpts are cut from
//! the original text. Lower-casing can change a character's byte length
//! (`'İ'` becomes two chars), so folded offsets are mapped back to original
//! offsets before the excerpt is built.

use super::snippet::SnippetBuilder;
use super::{MatchResult, Query};

/// Separates per-word excerpts in a word match
pub const WORD_EXCERPT_SEPARATOR: &str = "\n\n...";

/// Lower-case a string one char at a time.
///
/// Used for both corpus and query so they fold identically (unlike
/// `str::to_lowercase`, which special-cases word-final sigma).
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Lower-cased text plus the way back to original byte offsets
struct FoldedText {
    folded: String,
    /// `(folded_offset, original_offset)` per folded char, only kept when
    /// folding moved some offsets
    offsets: Option<Vec<(usize, usize)>>,
    original_len: usize,
}

impl FoldedText {
    fn new(original: &str) -> Self {
        let mut folded = String::with_capacity(original.len());
        let mut offsets = Vec::new();
        let mut aligned = true;

        for (orig, c) in original.char_indices() {
            let next = orig + c.len_utf8();
            for (k, lc) in c.to_lowercase().enumerate() {
                // The tail of an expanded char maps past the original char
                offsets.push((folded.len(), if k == 0 { orig } else { next }));
                folded.push(lc);
                aligned &= k == 0 && lc.len_utf8() == c.len_utf8();
            }
        }

        Self {
            folded,
            offsets: (!aligned).then_some(offsets),
            original_len: original.len(),
        }
    }

    /// Original byte offset for a folded byte offset on a char boundary
    fn original_offset(&self, folded_offset: usize) -> usize {
        let Some(offsets) = &self.offsets else {
            return folded_offset;
        };
        if folded_offset >= self.folded.len() {
            return self.original_len;
        }
        match offsets.binary_search_by_key(&folded_offset, |&(f, _)| f) {
            Ok(i) => offsets[i].1,
            Err(i) => offsets.get(i).map_or(self.original_len, |&(_, o)| o),
        }
    }

    /// Original offset right after the first occurrence of `needle`
    fn end_of_first(&self, needle: &str) -> Option<usize> {
        self.folded
            .find(needle)
            .map(|pos| self.original_offset(pos + needle.len()))
    }
}

/// Exact phrase first, then word-by-word fallback.
///
/// Only the first occurrence of the phrase (or of each word) is used; later
/// occurrences are never considered and nothing is ranked.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryMatcher {
    snippets: SnippetBuilder,
}

impl QueryMatcher {
    pub fn new(snippets: SnippetBuilder) -> Self {
        Self { snippets }
    }

    /// Match `query` against non-empty corpus text
    pub fn run(&self, text: &str, query: &Query) -> MatchResult {
        let folded = FoldedText::new(text);

        if let Some(start) = folded.end_of_first(query.normalized()) {
            return MatchResult::ExactMatch {
                excerpt: self.snippets.excerpt(text, start),
            };
        }

        let parts: Vec<String> = query
            .words()
            .filter_map(|word| folded.end_of_first(word))
            .map(|start| self.snippets.excerpt(text, start))
            .collect();

        if parts.is_empty() {
            MatchResult::NoMatch
        } else {
            MatchResult::WordMatch {
                excerpt: parts.join(WORD_EXCERPT_SEPARATOR),
            }
        }
    }
}
