use crate::matcher::{MatchSpan, Matcher};

/// What a rule proposes to do about a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixAction {
    /// Replace the matched span. The template may carry capture
    /// references for regex matchers; the result inherits the original
    /// span's capitalization shape.
    Replace(String),
    /// Delete the matched span.
    Remove,
    /// Advisory only, no mechanical rewrite.
    Hint(String),
}

impl FixAction {
    pub fn replace(template: impl Into<String>) -> Self {
        Self::Replace(template.into())
    }

    pub fn hint(text: impl Into<String>) -> Self {
        Self::Hint(text.into())
    }

    /// The user-facing suggestion for a concrete match.
    pub fn suggestion_text(&self, matcher: &dyn Matcher, matched: &str) -> String {
        match self {
            FixAction::Replace(template) => {
                inherit_case(matched, &matcher.expand(matched, template))
            }
            FixAction::Remove => format!("Remove \"{matched}\""),
            FixAction::Hint(text) => text.clone(),
        }
    }

    /// The sentence with the fix applied, when the fix is mechanical.
    pub fn corrected_sentence(
        &self,
        matcher: &dyn Matcher,
        sentence: &str,
        span: MatchSpan,
    ) -> Option<String> {
        let before = &sentence[..span.start];
        let after = &sentence[span.end..];
        match self {
            FixAction::Replace(template) => {
                let matched = &sentence[span.start..span.end];
                let replacement = inherit_case(matched, &matcher.expand(matched, template));
                Some(format!("{before}{replacement}{after}"))
            }
            FixAction::Remove => {
                let after = if before.ends_with(' ') || before.is_empty() {
                    after.strip_prefix(' ').unwrap_or(after)
                } else {
                    after
                };
                Some(format!("{before}{after}"))
            }
            FixAction::Hint(_) => None,
        }
    }
}

/// Applies the capitalization shape of `matched` to `replacement`:
/// ALLCAPS stays ALLCAPS, Title case stays Title case.
pub fn inherit_case(matched: &str, replacement: &str) -> String {
    let alpha: Vec<char> = matched.chars().filter(|c| c.is_alphabetic()).collect();
    if alpha.len() > 1 && alpha.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }
    if alpha.first().is_some_and(|c| c.is_uppercase()) {
        let mut out = String::with_capacity(replacement.len());
        let mut done = false;
        for c in replacement.chars() {
            if !done && c.is_alphabetic() {
                out.extend(c.to_uppercase());
                done = true;
            } else {
                out.push(c);
            }
        }
        return out;
    }
    replacement.to_string()
}
