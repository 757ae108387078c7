use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Issue categories. The set is closed; rules, configuration and reports
/// all refer to these identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    Grammar,
    Spelling,
    Punctuation,
    Agreement,
    Capitalization,
    Wordiness,
    AwkwardPhrasing,
    TenseConsistency,
    Parallelism,
    Dialogue,
}

impl CategoryId {
    pub const ALL: [CategoryId; 10] = [
        CategoryId::Grammar,
        CategoryId::Spelling,
        CategoryId::Punctuation,
        CategoryId::Agreement,
        CategoryId::Capitalization,
        CategoryId::Wordiness,
        CategoryId::AwkwardPhrasing,
        CategoryId::TenseConsistency,
        CategoryId::Parallelism,
        CategoryId::Dialogue,
    ];

    /// Categories checked when the configuration does not name any.
    pub const SAFE_BASELINE: [CategoryId; 4] = [
        CategoryId::Grammar,
        CategoryId::Spelling,
        CategoryId::Punctuation,
        CategoryId::Agreement,
    ];

    pub fn is_safe_baseline(self) -> bool {
        Self::SAFE_BASELINE.contains(&self)
    }

    /// Categories whose findings the LLM enhancer may take on. Pattern
    /// rules alone judge these poorly, so uncertain findings here are
    /// worth a second opinion.
    pub fn is_complex(self) -> bool {
        matches!(
            self,
            CategoryId::AwkwardPhrasing
                | CategoryId::TenseConsistency
                | CategoryId::Parallelism
                | CategoryId::Dialogue
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            CategoryId::Grammar => "grammar",
            CategoryId::Spelling => "spelling",
            CategoryId::Punctuation => "punctuation",
            CategoryId::Agreement => "agreement",
            CategoryId::Capitalization => "capitalization",
            CategoryId::Wordiness => "wordiness",
            CategoryId::AwkwardPhrasing => "awkward_phrasing",
            CategoryId::TenseConsistency => "tense_consistency",
            CategoryId::Parallelism => "parallelism",
            CategoryId::Dialogue => "dialogue",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CategoryId::Grammar => "Grammar",
            CategoryId::Spelling => "Spelling",
            CategoryId::Punctuation => "Punctuation",
            CategoryId::Agreement => "Agreement",
            CategoryId::Capitalization => "Capitalization",
            CategoryId::Wordiness => "Wordiness",
            CategoryId::AwkwardPhrasing => "Awkward phrasing",
            CategoryId::TenseConsistency => "Tense consistency",
            CategoryId::Parallelism => "Parallelism",
            CategoryId::Dialogue => "Dialogue",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == key)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|c| c.name()).collect();
                format!("unknown category '{s}' (valid: {})", valid.join(", "))
            })
    }
}
