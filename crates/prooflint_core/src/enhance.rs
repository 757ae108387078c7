//! The enhancement seam.
//!
//! An enhancer rewrites the wording of existing findings, it never adds
//! new ones. The language-model implementation lives in `prooflint_llm`;
//! the core only defines the contract.

use async_trait::async_trait;
use prooflint_text::DocumentUnit;

use crate::finding::Finding;

/// Replacement wording for one finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedFix {
    /// Improved explanation of the problem.
    pub problem: String,

    /// Improved suggestion.
    pub suggestion: String,

    /// Full corrected sentence, when the enhancer produced one.
    pub corrected_sentence: Option<String>,
}

/// What an enhancement pass produced.
#[derive(Debug, Default)]
pub struct EnhanceOutcome {
    /// Replacements keyed by index into the findings slice that was
    /// passed to [`FindingEnhancer::enhance`].
    pub replacements: Vec<(usize, EnhancedFix)>,

    /// Human-readable notes about degraded behavior, surfaced in the
    /// report summary.
    pub warnings: Vec<String>,
}

/// Rewrites findings with better explanations and corrections.
///
/// Enhancement is best effort: implementations report trouble through
/// [`EnhanceOutcome::warnings`] rather than failing the analysis.
#[async_trait]
pub trait FindingEnhancer: Send + Sync {
    async fn enhance(&self, document: &DocumentUnit, findings: &[Finding]) -> EnhanceOutcome;
}
