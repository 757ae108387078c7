use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::builtin;
use crate::category::CategoryId;
use crate::fix::FixAction;
use crate::matcher::Matcher;

/// One pattern rule: a matcher plus what to tell the user about a hit.
pub struct PatternEntry {
    pub name: &'static str,
    pub matcher: Box<dyn Matcher>,
    pub problem: &'static str,
    pub fix: FixAction,
    /// Overrides the category default when set.
    pub confidence: Option<f32>,
}

impl PatternEntry {
    pub fn new(
        name: &'static str,
        matcher: impl Matcher + 'static,
        problem: &'static str,
        fix: FixAction,
    ) -> Self {
        Self {
            name,
            matcher: Box::new(matcher),
            problem,
            fix,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

impl std::fmt::Debug for PatternEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternEntry")
            .field("name", &self.name)
            .field("problem", &self.problem)
            .field("confidence", &self.confidence)
            .finish_non_exhaustive()
    }
}

/// A category's rules plus its default confidence.
#[derive(Debug)]
pub struct Category {
    pub id: CategoryId,
    pub display_name: &'static str,
    pub default_confidence: f32,
    pub entries: Vec<PatternEntry>,
}

impl Category {
    pub fn new(id: CategoryId, default_confidence: f32, entries: Vec<PatternEntry>) -> Self {
        Self {
            id,
            display_name: id.display_name(),
            default_confidence,
            entries,
        }
    }

    /// The confidence assigned to a hit of the given entry.
    pub fn confidence_of(&self, entry: &PatternEntry) -> f32 {
        entry.confidence.unwrap_or(self.default_confidence)
    }
}

/// The full rule table, categories in evaluation order.
#[derive(Debug)]
pub struct RuleSet {
    categories: Vec<Category>,
}

static BUILTIN: Lazy<Arc<RuleSet>> = Lazy::new(|| Arc::new(builtin::build()));

impl RuleSet {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The builtin rule table, compiled once per process.
    pub fn builtin() -> Arc<RuleSet> {
        Arc::clone(&BUILTIN)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn total_entries(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Resolves the configured category list. An empty request means the
    /// safe baseline, never "all".
    pub fn resolve_enabled(requested: &[CategoryId]) -> Vec<CategoryId> {
        if requested.is_empty() {
            return CategoryId::SAFE_BASELINE.to_vec();
        }
        let mut enabled = Vec::new();
        for id in requested {
            if !enabled.contains(id) {
                enabled.push(*id);
            }
        }
        enabled
    }
}
