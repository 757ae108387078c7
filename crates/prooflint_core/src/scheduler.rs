//! Bounded-concurrency scheduling of per-line checks.
//!
//! Each line is an independent unit of work. A semaphore caps how many
//! lines run at once, a per-sentence timeout bounds each unit, and a
//! panic inside a check demotes to a skipped sentence instead of ending
//! the run. Results are reassembled in document order afterwards.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::FutureExt;
use prooflint_text::LineUnit;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::checker::LineChecker;
use crate::error::CheckError;
use crate::finding::Finding;
use crate::progress::ProgressReporter;

/// An additional per-sentence check that runs beside the pattern rules.
///
/// Implementations may call out of process. Each call runs under its own
/// timeout, and a failure only skips the sentence it was checking.
#[async_trait]
pub trait SentenceCheck: Send + Sync {
    async fn check_sentence(
        &self,
        line_number: u32,
        sentence_index: usize,
        sentence: &str,
    ) -> Result<Vec<Finding>, CheckError>;
}

/// Why a sentence's checks did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The whole sentence check exceeded the sentence timeout.
    Timeout,
    /// The external check exceeded its own timeout.
    ExternalTimeout,
    /// The external check returned an error.
    ExternalError,
    /// The check panicked.
    Panic,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::Timeout => "timed out",
            SkipReason::ExternalTimeout => "external check timed out",
            SkipReason::ExternalError => "external check failed",
            SkipReason::Panic => "check panicked",
        };
        write!(f, "{text}")
    }
}

/// A sentence whose checks did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedSentence {
    pub line_number: u32,
    pub sentence_index: usize,
    pub reason: SkipReason,
}

/// Lifecycle of a scheduled chunk of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    Pending,
    Running,
    Completed,
    CompletedWithSkips,
}

/// Everything the scheduler produced for a chunk.
#[derive(Debug)]
pub struct ChunkOutcome {
    /// Findings sorted by line, then sentence.
    pub findings: Vec<Finding>,

    /// Skipped sentences sorted the same way.
    pub skipped: Vec<SkippedSentence>,

    /// Terminal state, [`ChunkState::Completed`] only when nothing was
    /// skipped.
    pub state: ChunkState,
}

/// Schedules per-line checks with bounded concurrency.
pub struct ChunkScheduler {
    concurrency: usize,
    sentence_timeout: Duration,
    external_timeout: Duration,
}

impl ChunkScheduler {
    pub fn new(
        concurrency: usize,
        sentence_timeout: Duration,
        external_timeout: Duration,
    ) -> Self {
        Self {
            concurrency: concurrency.max(1),
            sentence_timeout,
            external_timeout,
        }
    }

    /// Checks every line, at most `concurrency` lines in flight at once.
    ///
    /// Timeout rules: when a sentence's whole check exceeds the sentence
    /// timeout, its findings are lost and the sentence is skipped. When
    /// only the external check times out or fails, the pattern findings
    /// for that sentence are kept and the skip is still recorded.
    pub async fn check(
        &self,
        lines: &[LineUnit],
        checker: Arc<LineChecker>,
        external: Option<Arc<dyn SentenceCheck>>,
        progress: Arc<ProgressReporter>,
    ) -> ChunkOutcome {
        let mut state = ChunkState::Pending;
        debug!(
            lines = lines.len(),
            concurrency = self.concurrency,
            ?state,
            "chunk scheduled"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks: JoinSet<LineResult> = JoinSet::new();
        state = ChunkState::Running;
        debug!(?state, "chunk started");

        for (index, line) in lines.iter().enumerate() {
            if line.sentences.is_empty() {
                progress.line_done(0);
                continue;
            }
            // The semaphore is never closed, so acquire cannot fail.
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };
            let line = line.clone();
            let checker = Arc::clone(&checker);
            let external = external.clone();
            let progress = Arc::clone(&progress);
            let sentence_timeout = self.sentence_timeout;
            let external_timeout = self.external_timeout;
            tasks.spawn(async move {
                let _permit = permit;
                let line_number = line.line_number;
                let sentence_count = line.sentences.len();
                let work = check_line(
                    line,
                    index,
                    checker,
                    external,
                    sentence_timeout,
                    external_timeout,
                );
                match AssertUnwindSafe(work).catch_unwind().await {
                    Ok(result) => {
                        progress.line_done(result.findings.len());
                        result
                    }
                    Err(_) => {
                        warn!(line = line_number, "line check panicked");
                        progress.line_done(0);
                        LineResult {
                            index,
                            findings: Vec::new(),
                            skipped: (0..sentence_count)
                                .map(|sentence_index| SkippedSentence {
                                    line_number,
                                    sentence_index,
                                    reason: SkipReason::Panic,
                                })
                                .collect(),
                        }
                    }
                }
            });
        }

        let mut results: Vec<LineResult> = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => warn!("line check task failed to join: {e}"),
            }
        }
        results.sort_by_key(|r| r.index);

        let mut findings = Vec::new();
        let mut skipped = Vec::new();
        for mut result in results {
            findings.append(&mut result.findings);
            skipped.append(&mut result.skipped);
        }

        let state = if skipped.is_empty() {
            ChunkState::Completed
        } else {
            ChunkState::CompletedWithSkips
        };
        debug!(
            ?state,
            findings = findings.len(),
            skipped = skipped.len(),
            "chunk finished"
        );
        ChunkOutcome {
            findings,
            skipped,
            state,
        }
    }
}

struct LineResult {
    index: usize,
    findings: Vec<Finding>,
    skipped: Vec<SkippedSentence>,
}

async fn check_line(
    line: LineUnit,
    index: usize,
    checker: Arc<LineChecker>,
    external: Option<Arc<dyn SentenceCheck>>,
    sentence_timeout: Duration,
    external_timeout: Duration,
) -> LineResult {
    let mut findings = Vec::new();
    let mut skipped = Vec::new();

    for (sentence_index, sentence) in line.sentences.iter().enumerate() {
        let unit = check_sentence(
            &line,
            sentence_index,
            sentence,
            &checker,
            external.as_deref(),
            external_timeout,
        );
        match timeout(sentence_timeout, unit).await {
            Ok(result) => {
                let SentenceResult {
                    findings: mut found,
                    skip,
                } = result;
                findings.append(&mut found);
                if let Some(reason) = skip {
                    skipped.push(SkippedSentence {
                        line_number: line.line_number,
                        sentence_index,
                        reason,
                    });
                }
            }
            Err(_) => {
                warn!(
                    line = line.line_number,
                    sentence = sentence_index,
                    "sentence check timed out"
                );
                skipped.push(SkippedSentence {
                    line_number: line.line_number,
                    sentence_index,
                    reason: SkipReason::Timeout,
                });
            }
        }
    }

    LineResult {
        index,
        findings,
        skipped,
    }
}

struct SentenceResult {
    findings: Vec<Finding>,
    skip: Option<SkipReason>,
}

async fn check_sentence(
    line: &LineUnit,
    sentence_index: usize,
    sentence: &str,
    checker: &LineChecker,
    external: Option<&dyn SentenceCheck>,
    external_timeout: Duration,
) -> SentenceResult {
    let mut findings = checker.check_sentence(line, sentence_index, sentence);
    let mut skip = None;

    if let Some(check) = external {
        let call = check.check_sentence(line.line_number, sentence_index, sentence);
        match timeout(external_timeout, call).await {
            Ok(Ok(mut extra)) => findings.append(&mut extra),
            Ok(Err(e)) => {
                warn!(
                    line = line.line_number,
                    sentence = sentence_index,
                    "external check failed: {e}"
                );
                skip = Some(SkipReason::ExternalError);
            }
            Err(_) => {
                warn!(
                    line = line.line_number,
                    sentence = sentence_index,
                    "external check timed out"
                );
                skip = Some(SkipReason::ExternalTimeout);
            }
        }
    }

    SentenceResult { findings, skip }
}
