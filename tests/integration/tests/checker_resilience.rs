//! Scheduler resilience tests.
//!
//! Exercises the bounded-concurrency scheduler through the analyzer with
//! external checks that are slow, stuck, failing, or panicking, and
//! asserts that damage stays confined to the sentence that caused it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use prooflint_core::{
    CategoryId, CheckConfig, CheckError, DocumentAnalyzer, Finding, FindingSource, LineRange,
    SentenceCheck,
};

/// Records how many checks run at once.
struct ConcurrencyProbe {
    current: AtomicUsize,
    peak: AtomicUsize,
}

#[async_trait]
impl SentenceCheck for ConcurrencyProbe {
    async fn check_sentence(
        &self,
        _line_number: u32,
        _sentence_index: usize,
        _sentence: &str,
    ) -> Result<Vec<Finding>, CheckError> {
        let running = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.current.fetch_sub(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

/// Hangs forever on one line, succeeds instantly everywhere else.
struct StuckOnLine(u32);

#[async_trait]
impl SentenceCheck for StuckOnLine {
    async fn check_sentence(
        &self,
        line_number: u32,
        _sentence_index: usize,
        _sentence: &str,
    ) -> Result<Vec<Finding>, CheckError> {
        if line_number == self.0 {
            std::future::pending::<()>().await;
        }
        Ok(Vec::new())
    }
}

/// Fails on one line, succeeds instantly everywhere else.
struct FailsOnLine(u32);

#[async_trait]
impl SentenceCheck for FailsOnLine {
    async fn check_sentence(
        &self,
        line_number: u32,
        _sentence_index: usize,
        _sentence: &str,
    ) -> Result<Vec<Finding>, CheckError> {
        if line_number == self.0 {
            return Err(CheckError::External("backend offline".to_string()));
        }
        Ok(Vec::new())
    }
}

/// Panics on one line.
struct PanicsOnLine(u32);

#[async_trait]
impl SentenceCheck for PanicsOnLine {
    async fn check_sentence(
        &self,
        line_number: u32,
        _sentence_index: usize,
        _sentence: &str,
    ) -> Result<Vec<Finding>, CheckError> {
        if line_number == self.0 {
            panic!("check blew up");
        }
        Ok(Vec::new())
    }
}

/// Flags every sentence it sees.
struct FlagsEverything;

#[async_trait]
impl SentenceCheck for FlagsEverything {
    async fn check_sentence(
        &self,
        line_number: u32,
        sentence_index: usize,
        sentence: &str,
    ) -> Result<Vec<Finding>, CheckError> {
        Ok(vec![Finding {
            line_number,
            line_range: LineRange::single(line_number),
            sentence_index,
            original_text: sentence.to_string(),
            category: CategoryId::AwkwardPhrasing,
            problem: "Flat phrasing".to_string(),
            suggestion: "Vary the sentence rhythm".to_string(),
            corrected_sentence: None,
            confidence: 0.9,
            source: FindingSource::Pattern,
        }])
    }
}

#[tokio::test]
async fn test_concurrency_stays_within_the_configured_bound() {
    let probe = Arc::new(ConcurrencyProbe {
        current: AtomicUsize::new(0),
        peak: AtomicUsize::new(0),
    });
    let config = CheckConfig {
        concurrency: 3,
        ..CheckConfig::default()
    };
    let engine = DocumentAnalyzer::new(config)
        .unwrap()
        .with_external_check(Arc::clone(&probe) as Arc<dyn SentenceCheck>);

    let text = "The morning train arrived at seven.\n".repeat(16);
    let report = engine.analyze("commute.txt", &text).await.unwrap();

    assert_eq!(report.summary.lines_total, 16);
    assert_eq!(report.summary.skipped_sentences, 0);
    let peak = probe.peak.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak concurrency was {peak}");
    assert!(peak >= 2, "lines never overlapped");
}

#[tokio::test(start_paused = true)]
async fn test_stuck_external_check_keeps_pattern_findings() {
    let config = CheckConfig {
        sentence_timeout_secs: 10,
        external_check_timeout_secs: 5,
        ..CheckConfig::default()
    };
    let engine = DocumentAnalyzer::new(config)
        .unwrap()
        .with_external_check(Arc::new(StuckOnLine(2)));

    let started = tokio::time::Instant::now();
    let text = "He could of won.\nIt could of been worse.\nShe should of known.\n";
    let report = engine.analyze("draft.txt", text).await.unwrap();
    let elapsed = started.elapsed();

    // The external timeout fires; the sentence's own findings survive.
    assert_eq!(report.summary.total_issues, 3);
    assert_eq!(report.summary.skipped_sentences, 1);
    let lines: Vec<u32> = report.issues.iter().map(|f| f.line_number).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert!(elapsed >= Duration::from_secs(5));
    assert!(elapsed < Duration::from_secs(10), "sentence timeout fired instead");
}

#[tokio::test(start_paused = true)]
async fn test_sentence_timeout_drops_that_sentence_only() {
    let config = CheckConfig {
        sentence_timeout_secs: 2,
        external_check_timeout_secs: 30,
        ..CheckConfig::default()
    };
    let engine = DocumentAnalyzer::new(config)
        .unwrap()
        .with_external_check(Arc::new(StuckOnLine(2)));

    let text = "He could of won.\nIt could of been worse.\nShe should of known.\n";
    let report = engine.analyze("draft.txt", text).await.unwrap();

    // The sentence timeout fires first and takes the findings with it.
    assert_eq!(report.summary.total_issues, 2);
    assert_eq!(report.summary.skipped_sentences, 1);
    let lines: Vec<u32> = report.issues.iter().map(|f| f.line_number).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[tokio::test]
async fn test_failing_external_check_keeps_pattern_findings() {
    let engine = DocumentAnalyzer::new(CheckConfig::default())
        .unwrap()
        .with_external_check(Arc::new(FailsOnLine(2)));

    let text = "He could of won.\nIt could of been worse.\nShe should of known.\n";
    let report = engine.analyze("draft.txt", text).await.unwrap();

    assert_eq!(report.summary.total_issues, 3);
    assert_eq!(report.summary.skipped_sentences, 1);
}

#[tokio::test]
async fn test_panicking_check_only_skips_its_line() {
    let engine = DocumentAnalyzer::new(CheckConfig::default())
        .unwrap()
        .with_external_check(Arc::new(PanicsOnLine(2)));

    let text = "He could of won.\nIt could of been worse.\nShe should of known.\n";
    let report = engine.analyze("draft.txt", text).await.unwrap();

    assert_eq!(report.summary.skipped_sentences, 1);
    let lines: Vec<u32> = report.issues.iter().map(|f| f.line_number).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[tokio::test]
async fn test_external_findings_merge_into_the_report() {
    let engine = DocumentAnalyzer::new(CheckConfig::default())
        .unwrap()
        .with_external_check(Arc::new(FlagsEverything));

    let report = engine
        .analyze("clean.txt", "The cat slept on the mat.\n")
        .await
        .unwrap();

    assert_eq!(report.summary.total_issues, 1);
    assert_eq!(report.issues[0].problem, "Flat phrasing");
    assert_eq!(report.issues[0].category, CategoryId::AwkwardPhrasing);
}
