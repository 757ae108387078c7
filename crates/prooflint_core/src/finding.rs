//! Finding types for analysis results.

use std::fmt;

use prooflint_rules::CategoryId;
use serde::{Deserialize, Serialize};

/// Inclusive range of physical lines a finding covers.
///
/// Most findings cover one line. A finding on a stitched sentence covers the
/// full run of lines the sentence was joined from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First line, 1-based.
    pub start: u32,

    /// Last line, 1-based, inclusive.
    pub end: u32,
}

impl LineRange {
    /// Creates a range covering a single line.
    pub fn single(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Creates a range spanning several lines.
    pub fn spanning(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns true if the range covers exactly one line.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Which stage produced the finding's wording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingSource {
    /// Produced by the pattern rule tables.
    #[default]
    Pattern,
    /// Rewritten by the language-model enhancement pass.
    Llm,
}

/// A single issue found in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Line the owning sentence terminates on, 1-based.
    pub line_number: u32,

    /// Full line span of the owning sentence.
    pub line_range: LineRange,

    /// Index of the sentence within its line, 0-based.
    pub sentence_index: usize,

    /// The complete sentence the issue was found in.
    pub original_text: String,

    /// Rule category that fired.
    pub category: CategoryId,

    /// What is wrong, including the matched text.
    pub problem: String,

    /// How to fix it.
    pub suggestion: String,

    /// The sentence with the fix applied, when one can be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_sentence: Option<String>,

    /// Rule confidence in the range 0.0 to 1.0.
    pub confidence: f32,

    /// Stage that produced the current wording.
    #[serde(default)]
    pub source: FindingSource,
}
