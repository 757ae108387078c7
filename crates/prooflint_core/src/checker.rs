//! The pattern rule engine.
//!
//! Checks one sentence at a time against the enabled rule categories.
//! Guards from [`crate::suppression`] run first, then each category's
//! matches are de-overlapped with longest-match-wins before findings are
//! built.

use std::sync::Arc;

use prooflint_rules::{CategoryId, MatchSpan, RuleSet};
use prooflint_text::LineUnit;
use tracing::trace;

use crate::finding::{Finding, FindingSource, LineRange};
use crate::suppression::guard_spans;

/// Checks sentences against the pattern rule tables.
pub struct LineChecker {
    rules: Arc<RuleSet>,
    enabled: Vec<CategoryId>,
}

impl LineChecker {
    /// Creates a checker over `rules` for the requested categories.
    ///
    /// An empty request enables the safe baseline, never every category.
    pub fn new(rules: Arc<RuleSet>, requested: &[CategoryId]) -> Self {
        let enabled = RuleSet::resolve_enabled(requested);
        Self { rules, enabled }
    }

    /// The categories this checker runs, in request order.
    pub fn enabled(&self) -> &[CategoryId] {
        &self.enabled
    }

    /// Checks every sentence of a line.
    pub fn check_line(&self, line: &LineUnit) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (sentence_index, sentence) in line.sentences.iter().enumerate() {
            findings.extend(self.check_sentence(line, sentence_index, sentence));
        }
        findings
    }

    /// Checks a single sentence.
    ///
    /// Findings come out in rule-table order: categories in table order,
    /// then match position, then pattern order within the category.
    pub fn check_sentence(
        &self,
        line: &LineUnit,
        sentence_index: usize,
        sentence: &str,
    ) -> Vec<Finding> {
        let guards = guard_spans(sentence);
        let mut findings = Vec::new();

        for category in self.rules.categories() {
            if !self.enabled.contains(&category.id) {
                continue;
            }

            let mut matches: Vec<(usize, MatchSpan)> = Vec::new();
            for (entry_index, entry) in category.entries.iter().enumerate() {
                for span in entry.matcher.find_matches(sentence) {
                    let guarded = guards
                        .iter()
                        .any(|g| g.kind.shields(category.id) && g.span.overlaps(&span));
                    if guarded {
                        trace!(
                            rule = entry.name,
                            line = line.line_number,
                            "match suppressed by guard"
                        );
                        continue;
                    }
                    matches.push((entry_index, span));
                }
            }

            for (entry_index, span) in de_overlap(matches) {
                let entry = &category.entries[entry_index];
                let matched = &sentence[span.start..span.end];
                findings.push(Finding {
                    line_number: line.line_number,
                    line_range: line_range_for(line, sentence_index),
                    sentence_index,
                    original_text: sentence.to_string(),
                    category: category.id,
                    problem: format!("{}: \"{}\"", entry.problem, matched),
                    suggestion: entry.fix.suggestion_text(entry.matcher.as_ref(), matched),
                    corrected_sentence: entry.fix.corrected_sentence(
                        entry.matcher.as_ref(),
                        sentence,
                        span,
                    ),
                    confidence: category.confidence_of(entry),
                    source: FindingSource::Pattern,
                });
            }
        }

        findings
    }
}

/// Resolves overlapping matches within one category.
///
/// The longest match wins; ties go to the earlier start, then the earlier
/// pattern in the table. Survivors come back in position order.
fn de_overlap(mut matches: Vec<(usize, MatchSpan)>) -> Vec<(usize, MatchSpan)> {
    matches.sort_by(|a, b| {
        b.1.len()
            .cmp(&a.1.len())
            .then(a.1.start.cmp(&b.1.start))
            .then(a.0.cmp(&b.0))
    });

    let mut kept: Vec<(usize, MatchSpan)> = Vec::new();
    for (entry_index, span) in matches {
        if kept.iter().all(|(_, taken)| !taken.overlaps(&span)) {
            kept.push((entry_index, span));
        }
    }

    kept.sort_by(|a, b| a.1.start.cmp(&b.1.start).then(a.0.cmp(&b.0)));
    kept
}

/// The line span a finding covers.
///
/// Only the first sentence of a line can be a stitched continuation, so
/// later sentences always sit on a single line.
fn line_range_for(line: &LineUnit, sentence_index: usize) -> LineRange {
    if sentence_index == 0
        && let Some(start) = line.continuation_from
    {
        return LineRange::spanning(start, line.line_number);
    }
    LineRange::single(line.line_number)
}
