//! Corpus assembly

use serde::Serialize;

use crate::document::Page;

/// Separator between consecutive pages
pub const PAGE_SEPARATOR: &str = "\n";

/// Full text of the current document, pages in index order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Corpus {
    text: String,
    page_count: usize,
}

impl Corpus {
    /// The corpus before any document was uploaded
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Length in characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// No document loaded. A loaded document whose pages carry no text is
    /// not empty: queries against it simply find nothing.
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }
}

impl From<&str> for Corpus {
    /// Single-page corpus, mostly useful in tests
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            page_count: usize::from(!text.is_empty()),
        }
    }
}

/// Join page texts in the order given, separated by [`PAGE_SEPARATOR`].
///
/// `pages` must already be sorted by index; the extractor guarantees this.
pub fn assemble(pages: &[Page]) -> Corpus {
    debug_assert!(pages.windows(2).all(|w| w[0].index < w[1].index));

    let capacity = pages.iter().map(|p| p.text.len() + PAGE_SEPARATOR.len()).sum();
    let mut text = String::with_capacity(capacity);
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            text.push_str(PAGE_SEPARATOR);
        }
        text.push_str(&page.text);
    }

    Corpus {
        text,
        page_count: pages.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_joins_with_newline() {
        let pages = vec![Page::new(1, "first"), Page::new(2, "second"), Page::new(3, "third")];
        let corpus = assemble(&pages);
        assert_eq!(corpus.text(), "first\nsecond\nthird");
        assert_eq!(corpus.page_count(), 3);
    }

    #[test]
    fn test_assemble_single_page_has_no_separator() {
        let corpus = assemble(&[Page::new(1, "only")]);
        assert_eq!(corpus.text(), "only");
    }

    #[test]
    fn test_assemble_keeps_blank_pages() {
        let pages = vec![Page::new(1, "a"), Page::new(2, ""), Page::new(3, "c")];
        assert_eq!(assemble(&pages).text(), "a\n\nc");
    }

    #[test]
    fn test_assemble_no_pages() {
        let corpus = assemble(&[]);
        assert!(corpus.is_empty());
        assert_eq!(corpus.page_count(), 0);
    }

    #[test]
    fn test_textless_document_is_not_empty() {
        let corpus = assemble(&[Page::new(1, ""), Page::new(2, "")]);
        assert_eq!(corpus.text(), "\n");
        assert!(!corpus.is_empty());
        assert!(Corpus::from("").is_empty());
    }

    #[test]
    fn test_char_count_is_unicode_aware() {
        let corpus = Corpus::from("naïve café");
        assert_eq!(corpus.char_count(), 10);
        assert!(corpus.text().len() > 10);
    }
}
