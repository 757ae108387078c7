use unicode_segmentation::UnicodeSegmentation;

/// A word with its byte offset in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordToken<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl WordToken<'_> {
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Returns the words of `text` in order, skipping punctuation-only and
/// whitespace segments. Contractions like `it's` stay together as a
/// single token.
pub fn word_tokens(text: &str) -> Vec<WordToken<'_>> {
    text.split_word_bound_indices()
        .filter(|(_, w)| w.chars().any(|c| c.is_alphanumeric()))
        .map(|(offset, text)| WordToken { text, offset })
        .collect()
}

/// True when the word starts with an uppercase letter.
pub fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}

/// True when the word carries an uppercase letter after its first
/// character, as in `McFarlane`, `O'Brien` or `iPhone`.
pub fn has_internal_capital(word: &str) -> bool {
    word.chars().skip(1).any(|c| c.is_uppercase())
}
