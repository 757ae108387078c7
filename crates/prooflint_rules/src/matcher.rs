use prooflint_text::word_tokens;
use regex::Regex;

/// A matched byte range within a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &MatchSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Finds occurrences of one problem pattern in a sentence.
pub trait Matcher: Send + Sync {
    fn find_matches(&self, text: &str) -> Vec<MatchSpan>;

    /// Expands a replacement template for a span this matcher produced.
    /// The default returns the template verbatim; matchers with capture
    /// groups substitute them here.
    fn expand(&self, matched: &str, template: &str) -> String {
        let _ = matched;
        template.to_string()
    }
}

/// Case-insensitive whole-word phrase matcher.
pub struct PhraseMatcher {
    regex: Regex,
}

impl PhraseMatcher {
    pub fn new(phrase: &str) -> Self {
        let parts: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
        let pattern = format!(r"(?i)\b{}\b", parts.join(r"\s+"));
        Self {
            regex: Regex::new(&pattern).expect("invalid phrase pattern"),
        }
    }
}

impl Matcher for PhraseMatcher {
    fn find_matches(&self, text: &str) -> Vec<MatchSpan> {
        self.regex
            .find_iter(text)
            .map(|m| MatchSpan::new(m.start(), m.end()))
            .collect()
    }
}

/// Regular-expression matcher. Callers spell out `(?i)` themselves when
/// the pattern is case-insensitive.
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> Self {
        Self {
            regex: Regex::new(pattern).expect("invalid rule pattern"),
        }
    }
}

impl Matcher for RegexMatcher {
    fn find_matches(&self, text: &str) -> Vec<MatchSpan> {
        self.regex
            .find_iter(text)
            .map(|m| MatchSpan::new(m.start(), m.end()))
            .collect()
    }

    fn expand(&self, matched: &str, template: &str) -> String {
        self.regex.replace(matched, template).into_owned()
    }
}

/// Doubled words that are ordinary English and must not be flagged.
const LEGITIMATE_DOUBLES: &[&str] = &["had", "that", "so", "very", "no", "long"];

/// Flags an immediately repeated word, as in "the the dog". The words
/// must be separated by whitespace only; "No, no" stays untouched.
pub struct RepeatedWordMatcher;

impl Matcher for RepeatedWordMatcher {
    fn find_matches(&self, text: &str) -> Vec<MatchSpan> {
        let words = word_tokens(text);
        let mut spans = Vec::new();
        for pair in words.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if !a.text.eq_ignore_ascii_case(b.text) {
                continue;
            }
            if !a.text.chars().any(|c| c.is_alphabetic()) {
                continue;
            }
            if LEGITIMATE_DOUBLES.contains(&a.text.to_lowercase().as_str()) {
                continue;
            }
            let gap = &text[a.end()..b.offset];
            if !gap.chars().all(|c| c.is_whitespace()) || gap.is_empty() {
                continue;
            }
            spans.push(MatchSpan::new(a.offset, b.end()));
        }
        spans
    }

    /// The fix for a doubled word is the word once.
    fn expand(&self, matched: &str, _template: &str) -> String {
        matched
            .split_whitespace()
            .next()
            .unwrap_or(matched)
            .to_string()
    }
}

/// Flags a trigger construction when its grammatical counterpart is
/// missing from the sentence, as in "not only" without "but".
pub struct CounterpartMatcher {
    trigger: Regex,
    counterpart: Regex,
}

impl CounterpartMatcher {
    pub fn new(trigger: &str, counterpart: &str) -> Self {
        Self {
            trigger: Regex::new(trigger).expect("invalid trigger pattern"),
            counterpart: Regex::new(counterpart).expect("invalid counterpart pattern"),
        }
    }
}

impl Matcher for CounterpartMatcher {
    fn find_matches(&self, text: &str) -> Vec<MatchSpan> {
        if self.counterpart.is_match(text) {
            return Vec::new();
        }
        self.trigger
            .find_iter(text)
            .map(|m| MatchSpan::new(m.start(), m.end()))
            .collect()
    }
}

/// Flags a sentence with an odd number of straight double quotes. The
/// span runs from the last unpaired quote to the end of the sentence.
pub struct UnbalancedQuoteMatcher;

impl Matcher for UnbalancedQuoteMatcher {
    fn find_matches(&self, text: &str) -> Vec<MatchSpan> {
        let quotes: Vec<usize> = text
            .char_indices()
            .filter(|(_, c)| *c == '"')
            .map(|(i, _)| i)
            .collect();
        if quotes.len() % 2 == 0 {
            return Vec::new();
        }
        match quotes.last() {
            Some(&last) => vec![MatchSpan::new(last, text.len())],
            None => Vec::new(),
        }
    }
}
