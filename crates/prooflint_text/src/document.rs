use serde::Serialize;

/// A physical line of the source document together with the sentences
/// that terminate on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineUnit {
    /// 1-based physical line number.
    pub line_number: u32,
    /// The exact line content with the trailing newline stripped.
    pub raw_text: String,
    /// Complete sentences attached to this line. A sentence belongs to the
    /// line where it terminates, so a wrapped sentence appears here in full.
    pub sentences: Vec<String>,
    /// When the first sentence of this line began on an earlier physical
    /// line (a wrap), the 1-based line number where it started. Only
    /// `sentences[0]` can continue from an earlier line.
    pub continuation_from: Option<u32>,
}

impl LineUnit {
    pub fn new(line_number: u32, raw_text: impl Into<String>) -> Self {
        Self {
            line_number,
            raw_text: raw_text.into(),
            sentences: Vec::new(),
            continuation_from: None,
        }
    }

    /// True when the line has no text at all (blank or whitespace-only).
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

/// Cheap per-document statistics collected while segmenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    pub total_lines: usize,
    pub total_sentences: usize,
    pub byte_len: usize,
}

/// A segmented document: every physical line of the input, in order,
/// blank lines included. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentUnit {
    pub filename: String,
    pub lines: Vec<LineUnit>,
    pub metadata: DocumentMetadata,
}

impl DocumentUnit {
    pub fn new(filename: impl Into<String>, lines: Vec<LineUnit>, byte_len: usize) -> Self {
        let metadata = DocumentMetadata {
            total_lines: lines.len(),
            total_sentences: lines.iter().map(|l| l.sentences.len()).sum(),
            byte_len,
        };
        Self {
            filename: filename.into(),
            lines,
            metadata,
        }
    }

    /// Looks up a line by its 1-based physical number.
    pub fn line(&self, line_number: u32) -> Option<&LineUnit> {
        self.lines.get(line_number.checked_sub(1)? as usize)
    }

    /// Total number of sentences across all lines.
    pub fn sentence_count(&self) -> usize {
        self.metadata.total_sentences
    }

    /// True when no line carries any sentence.
    pub fn is_empty(&self) -> bool {
        self.metadata.total_sentences == 0
    }
}
