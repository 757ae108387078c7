//! The analysis pipeline.

use std::sync::Arc;

use prooflint_rules::RuleSet;
use prooflint_text::Segmenter;
use tracing::{debug, info};

use crate::assembler::{AnalysisReport, assemble};
use crate::checker::LineChecker;
use crate::config::CheckConfig;
use crate::enhance::FindingEnhancer;
use crate::error::CheckError;
use crate::filter::filter_by_confidence;
use crate::progress::{NullProgress, ProgressReporter, ProgressSink, Stage};
use crate::scheduler::{ChunkScheduler, SentenceCheck};

/// The document analysis engine.
///
/// Orchestrates segmentation, scheduled checking, confidence filtering,
/// optional enhancement, and assembly.
pub struct DocumentAnalyzer {
    /// Analyzer configuration.
    config: CheckConfig,
    /// Pattern rule checker shared across worker tasks.
    checker: Arc<LineChecker>,
    /// Bounded-concurrency scheduler.
    scheduler: ChunkScheduler,
    /// Optional per-sentence external check.
    external: Option<Arc<dyn SentenceCheck>>,
    /// Optional finding enhancer, consulted when `llm.enabled` is set.
    enhancer: Option<Arc<dyn FindingEnhancer>>,
}

impl DocumentAnalyzer {
    /// Creates a new analyzer with the given configuration.
    pub fn new(config: CheckConfig) -> Result<Self, CheckError> {
        config.validate()?;

        let checker = Arc::new(LineChecker::new(RuleSet::builtin(), &config.categories));
        let scheduler = ChunkScheduler::new(
            config.concurrency,
            config.sentence_timeout(),
            config.external_check_timeout(),
        );

        Ok(Self {
            config,
            checker,
            scheduler,
            external: None,
            enhancer: None,
        })
    }

    /// Adds an external per-sentence check.
    pub fn with_external_check(mut self, check: Arc<dyn SentenceCheck>) -> Self {
        self.external = Some(check);
        self
    }

    /// Adds a finding enhancer. It only runs when `llm.enabled` is set.
    pub fn with_enhancer(mut self, enhancer: Arc<dyn FindingEnhancer>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    /// The configuration this analyzer runs with.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Analyzes a document without progress reporting.
    pub async fn analyze(&self, filename: &str, text: &str) -> Result<AnalysisReport, CheckError> {
        self.analyze_with_progress(filename, text, Arc::new(NullProgress))
            .await
    }

    /// Analyzes a document, reporting progress to `sink`.
    pub async fn analyze_with_progress(
        &self,
        filename: &str,
        text: &str,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<AnalysisReport, CheckError> {
        // Segment into line-faithful sentences
        let document = Segmenter::segment(filename, text)?;
        let progress = Arc::new(ProgressReporter::new(sink, document.metadata.total_lines));
        progress.stage(Stage::Segmenting);
        info!(
            file = filename,
            lines = document.metadata.total_lines,
            sentences = document.metadata.total_sentences,
            "analyzing document"
        );

        // Run the scheduled checks
        let outcome = self
            .scheduler
            .check(
                &document.lines,
                Arc::clone(&self.checker),
                self.external.clone(),
                Arc::clone(&progress),
            )
            .await;

        // Filter on confidence
        let findings = filter_by_confidence(outcome.findings, self.config.confidence_threshold);

        // Enhance what remains
        let mut warnings = Vec::new();
        let replacements = match (&self.enhancer, self.config.llm.enabled) {
            (Some(enhancer), true) => {
                progress.stage(Stage::Enhancing);
                let result = enhancer.enhance(&document, &findings).await;
                warnings.extend(result.warnings);
                result.replacements
            }
            (None, true) => {
                debug!("enhancement enabled but no enhancer installed");
                Vec::new()
            }
            _ => Vec::new(),
        };

        // Assemble the report
        progress.stage(Stage::Assembling);
        let report = assemble(&document, findings, replacements, &outcome.skipped, warnings);
        info!(
            file = filename,
            issues = report.summary.total_issues,
            skipped = report.summary.skipped_sentences,
            "analysis complete"
        );
        Ok(report)
    }
}
