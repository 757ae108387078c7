//! Progress reporting for long-running analyses.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Pipeline stage a progress event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Segmenting,
    Checking,
    Enhancing,
    Assembling,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Segmenting => "segmenting",
            Stage::Checking => "checking",
            Stage::Enhancing => "enhancing",
            Stage::Assembling => "assembling",
        };
        write!(f, "{name}")
    }
}

/// A snapshot of analysis progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    /// Current pipeline stage.
    pub stage: Stage,

    /// Total number of physical lines in the document.
    pub lines_total: usize,

    /// Lines whose checks have completed.
    pub lines_done: usize,

    /// Issues found so far, before confidence filtering.
    pub issues_found: usize,
}

/// Receives progress events during analysis.
///
/// Events may arrive from worker tasks, so implementations must be
/// thread-safe. Line completion events arrive in completion order, not
/// document order.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: ProgressEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_progress(&self, _event: ProgressEvent) {}
}

/// Shared counters that feed a [`ProgressSink`].
pub struct ProgressReporter {
    sink: Arc<dyn ProgressSink>,
    lines_total: usize,
    lines_done: AtomicUsize,
    issues_found: AtomicUsize,
}

impl ProgressReporter {
    pub fn new(sink: Arc<dyn ProgressSink>, lines_total: usize) -> Self {
        Self {
            sink,
            lines_total,
            lines_done: AtomicUsize::new(0),
            issues_found: AtomicUsize::new(0),
        }
    }

    /// Emits a stage-transition event with the current counters.
    pub fn stage(&self, stage: Stage) {
        self.emit(stage);
    }

    /// Records a completed line and emits a checking event.
    pub fn line_done(&self, new_issues: usize) {
        self.lines_done.fetch_add(1, Ordering::Relaxed);
        if new_issues > 0 {
            self.issues_found.fetch_add(new_issues, Ordering::Relaxed);
        }
        self.emit(Stage::Checking);
    }

    fn emit(&self, stage: Stage) {
        self.sink.on_progress(ProgressEvent {
            stage,
            lines_total: self.lines_total,
            lines_done: self.lines_done.load(Ordering::Relaxed),
            issues_found: self.issues_found.load(Ordering::Relaxed),
        });
    }
}
