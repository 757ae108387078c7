//! Suppression guards that keep known-good text from being flagged.
//!
//! Guards are computed once per sentence, before any rule runs. Each guard
//! protects a byte span from one rule category: contractions from agreement
//! rules, probable proper names from spelling rules, and deliberate ellipses
//! or dashes from punctuation rules.

use once_cell::sync::Lazy;
use prooflint_rules::{CategoryId, MatchSpan};
use prooflint_text::{has_internal_capital, is_capitalized, word_tokens};
use regex::Regex;

static CONTRACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+['’](?:s|re|ve|ll|d|m|t)\b").expect("invalid contraction pattern"));

static IDIOMATIC_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.{3,}|…|—|–").expect("invalid punctuation pattern"));

/// Titles that mark the following capitalized word as a name.
const NAME_TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "capt", "sgt", "lt", "col", "gen", "rev", "sen", "gov",
    "rep",
];

/// Why a span is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// An apostrophe contraction such as "it's" or "they're".
    Contraction,
    /// A word that looks like a proper name.
    ProperName,
    /// An ellipsis or dash used deliberately.
    IdiomaticPunctuation,
}

impl GuardKind {
    /// Returns true if this guard suppresses matches from `category`.
    pub fn shields(self, category: CategoryId) -> bool {
        match self {
            GuardKind::Contraction => category == CategoryId::Agreement,
            GuardKind::ProperName => category == CategoryId::Spelling,
            GuardKind::IdiomaticPunctuation => category == CategoryId::Punctuation,
        }
    }
}

/// A protected byte span within a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardSpan {
    pub span: MatchSpan,
    pub kind: GuardKind,
}

/// Computes every guard span for a sentence.
pub fn guard_spans(sentence: &str) -> Vec<GuardSpan> {
    let mut guards = Vec::new();

    for found in CONTRACTION_RE.find_iter(sentence) {
        guards.push(GuardSpan {
            span: MatchSpan::new(found.start(), found.end()),
            kind: GuardKind::Contraction,
        });
    }

    for found in IDIOMATIC_PUNCT_RE.find_iter(sentence) {
        guards.push(GuardSpan {
            span: MatchSpan::new(found.start(), found.end()),
            kind: GuardKind::IdiomaticPunctuation,
        });
    }

    let words = word_tokens(sentence);
    for (i, word) in words.iter().enumerate() {
        if !proper_name_at(&words, i) {
            continue;
        }
        guards.push(GuardSpan {
            span: MatchSpan::new(word.offset, word.end()),
            kind: GuardKind::ProperName,
        });
    }

    guards
}

/// Heuristic test for whether the word at `index` is part of a proper name.
///
/// Three signals, any of which suffices: a name title immediately before a
/// capitalized word, two adjacent capitalized words, or an internal capital
/// as in "McFarlane".
fn proper_name_at(words: &[prooflint_text::WordToken<'_>], index: usize) -> bool {
    let word = &words[index];

    if has_internal_capital(word.text) {
        return true;
    }

    if !is_capitalized(word.text) {
        return false;
    }

    if index > 0 && NAME_TITLES.contains(&words[index - 1].text.to_lowercase().as_str()) {
        return true;
    }

    let follows_capital = index > 0 && is_capitalized(words[index - 1].text);
    let precedes_capital = words
        .get(index + 1)
        .is_some_and(|next| is_capitalized(next.text));
    follows_capital || precedes_capital
}
