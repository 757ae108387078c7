//! Result assembly.
//!
//! Merges pattern findings with any enhancement replacements, restores
//! document order, and computes the report summary.

use std::collections::BTreeMap;

use prooflint_rules::CategoryId;
use prooflint_text::DocumentUnit;
use serde::Serialize;
use tracing::debug;

use crate::enhance::EnhancedFix;
use crate::finding::{Finding, FindingSource};
use crate::scheduler::SkippedSentence;

/// Counts and notes for a finished analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Findings that survived filtering.
    pub total_issues: usize,

    /// Issue counts per category, in rule-table order.
    pub categories: BTreeMap<CategoryId, usize>,

    /// Physical lines in the document.
    pub lines_total: usize,

    /// Sentences whose checks did not complete.
    pub skipped_sentences: usize,

    /// Notes about degraded behavior, such as an exhausted budget.
    pub warnings: Vec<String>,
}

/// The complete result of analyzing one document.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Name the document was analyzed under.
    pub filename: String,

    /// Findings in document order: line, then sentence, then rule-table
    /// order within the sentence.
    pub issues: Vec<Finding>,

    /// Counts and warnings.
    pub summary: Summary,
}

/// Builds the final report.
///
/// Issues come out in reading order by design: line, then sentence, then
/// the checker's rule-table order within a sentence. Findings are never
/// grouped by category; the per-category view is the summary's count map.
///
/// `replacements` indices refer to positions in `findings`; each one
/// rewrites that finding in place and marks it as enhanced. Indices out
/// of range are ignored.
pub fn assemble(
    document: &DocumentUnit,
    mut findings: Vec<Finding>,
    replacements: Vec<(usize, EnhancedFix)>,
    skipped: &[SkippedSentence],
    warnings: Vec<String>,
) -> AnalysisReport {
    let replaced = replacements.len();
    for (index, fix) in replacements {
        let Some(finding) = findings.get_mut(index) else {
            debug!(index, "enhancement index out of range");
            continue;
        };
        finding.problem = fix.problem;
        finding.suggestion = fix.suggestion;
        if fix.corrected_sentence.is_some() {
            finding.corrected_sentence = fix.corrected_sentence;
        }
        finding.source = FindingSource::Llm;
    }
    if replaced > 0 {
        debug!(replaced, "applied enhancements");
    }

    // Stable sort: within a sentence the checker's rule-table order holds.
    findings.sort_by(|a, b| {
        (a.line_number, a.sentence_index).cmp(&(b.line_number, b.sentence_index))
    });

    let mut categories: BTreeMap<CategoryId, usize> = BTreeMap::new();
    for finding in &findings {
        *categories.entry(finding.category).or_insert(0) += 1;
    }

    let summary = Summary {
        total_issues: findings.len(),
        categories,
        lines_total: document.metadata.total_lines,
        skipped_sentences: skipped.len(),
        warnings,
    };

    AnalysisReport {
        filename: document.filename.clone(),
        issues: findings,
        summary,
    }
}
