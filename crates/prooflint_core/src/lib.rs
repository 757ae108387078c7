//! # prooflint_core
//!
//! Core analysis engine for Prooflint.
//!
//! This crate provides:
//! - The main `DocumentAnalyzer` orchestrator
//! - Configuration loading
//! - The pattern rule checker and suppression guards
//! - Bounded-concurrency scheduling with timeouts
//! - Confidence filtering and result assembly
//!
//! ## Example
//!
//! ```rust,ignore
//! use prooflint_core::{CheckConfig, DocumentAnalyzer};
//!
//! let config = CheckConfig::from_file(".prooflint.json")?;
//! let analyzer = DocumentAnalyzer::new(config)?;
//!
//! let report = analyzer.analyze("draft.txt", &text).await?;
//! for issue in &report.issues {
//!     println!("line {}: {}", issue.line_range, issue.problem);
//! }
//! ```

mod analyzer;
mod assembler;
mod checker;
mod config;
mod enhance;
mod error;
mod filter;
mod finding;
mod progress;
mod scheduler;
mod suppression;

pub use analyzer::DocumentAnalyzer;
pub use assembler::{AnalysisReport, Summary, assemble};
pub use checker::LineChecker;
pub use config::{CheckConfig, CostCeilings, LlmSettings};
pub use enhance::{EnhanceOutcome, EnhancedFix, FindingEnhancer};
pub use error::CheckError;
pub use filter::filter_by_confidence;
pub use finding::{Finding, FindingSource, LineRange};
pub use progress::{NullProgress, ProgressEvent, ProgressReporter, ProgressSink, Stage};
pub use scheduler::{
    ChunkOutcome, ChunkScheduler, ChunkState, SentenceCheck, SkipReason, SkippedSentence,
};
pub use suppression::{GuardKind, GuardSpan, guard_spans};

pub use prooflint_rules::CategoryId;
pub use prooflint_text::{DocumentMetadata, DocumentUnit, LineUnit, Segmenter, TextError};
