//! Model-backed enhancement of uncertain findings.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use prooflint_core::{
    DocumentUnit, EnhanceOutcome, EnhancedFix, Finding, FindingEnhancer, LlmSettings,
};
use serde::Deserialize;
use tracing::debug;

use crate::budget::{estimate_tokens, CostLedger, DocumentBudget, ModelPricing};
use crate::client::{CompletionClient, CompletionRequest};
use crate::error::LlmError;
use crate::http::HttpCompletionClient;
use crate::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::repair::parse_model_json;
use crate::retry::RetryPolicy;

/// Findings at or above this confidence are kept as the patterns wrote them.
const ENHANCE_BELOW: f32 = 0.85;

/// Minimum similarity between the model's echoed sentence and the one it
/// was given. Anything less means the model drifted to a sentence of its
/// own invention.
const ECHO_SIMILARITY_FLOOR: f64 = 0.60;

/// Rewrites uncertain pattern findings through a completion endpoint.
///
/// Only findings in the complex categories with confidence below the
/// enhancement cut are sent out. The pass is best effort: budget stops,
/// endpoint failures and unusable responses surface as warnings on the
/// outcome, never as errors, and the pattern findings stay as they were.
pub struct LlmEnhancer {
    /// Completion endpoint.
    client: Arc<dyn CompletionClient>,

    /// Enhancement settings from the document configuration.
    settings: LlmSettings,

    /// Price table for the configured model.
    pricing: ModelPricing,

    /// Backoff schedule for transient endpoint failures.
    retry: RetryPolicy,

    /// Daily and monthly spending ledger, shared across documents.
    ledger: Arc<CostLedger>,
}

impl LlmEnhancer {
    /// Creates an enhancer with a fresh spending ledger.
    pub fn new(client: Arc<dyn CompletionClient>, settings: LlmSettings) -> Self {
        let ledger = Arc::new(CostLedger::new(settings.ceilings));
        Self::with_ledger(client, settings, ledger)
    }

    /// Creates an enhancer that shares `ledger` with other enhancers, so
    /// the daily and monthly ceilings hold across documents.
    pub fn with_ledger(
        client: Arc<dyn CompletionClient>,
        settings: LlmSettings,
        ledger: Arc<CostLedger>,
    ) -> Self {
        let pricing = ModelPricing::for_model(&settings.model);
        Self {
            client,
            settings,
            pricing,
            retry: RetryPolicy::default(),
            ledger,
        }
    }

    /// Replaces the default backoff schedule.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builds an enhancer talking to the configured HTTP endpoint.
    ///
    /// Fails when the API key environment variable is not set.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LlmError> {
        let client = HttpCompletionClient::from_env(
            settings.base_url.clone(),
            settings.model.clone(),
            &settings.api_key_env,
        )?;
        Ok(Self::new(Arc::new(client), settings.clone()))
    }

    fn is_eligible(finding: &Finding) -> bool {
        finding.confidence < ENHANCE_BELOW && finding.category.is_complex()
    }
}

#[async_trait]
impl FindingEnhancer for LlmEnhancer {
    async fn enhance(&self, document: &DocumentUnit, findings: &[Finding]) -> EnhanceOutcome {
        let mut outcome = EnhanceOutcome::default();

        let eligible: Vec<(usize, &Finding)> = findings
            .iter()
            .enumerate()
            .filter(|(_, finding)| Self::is_eligible(finding))
            .collect();
        if eligible.is_empty() {
            return outcome;
        }
        debug!(
            eligible = eligible.len(),
            total = findings.len(),
            "running enhancement pass"
        );

        let mut document_budget = DocumentBudget::new(self.settings.ceilings.per_document_usd);

        for batch in eligible.chunks(self.settings.max_batch.max(1)) {
            let request = CompletionRequest {
                system: SYSTEM_PROMPT.to_string(),
                user: build_user_prompt(document, batch),
                max_response_tokens: self.settings.max_response_tokens,
            };
            let prompt_tokens = estimate_tokens(&request.system) + estimate_tokens(&request.user);
            let estimated_cost = self
                .pricing
                .cost(prompt_tokens, self.settings.max_response_tokens);

            if !document_budget.allows(estimated_cost) {
                outcome.warnings.push(format!(
                    "enhancement stopped: document budget ${:.2} reached",
                    document_budget.ceiling()
                ));
                break;
            }
            if let Err(e) = self.ledger.reserve(estimated_cost) {
                outcome.warnings.push(format!("enhancement stopped: {e}"));
                break;
            }

            match self.retry.run(self.client.as_ref(), &request).await {
                Ok(response) => {
                    // The endpoint reports what the call really used; fall
                    // back to the estimate when it reports nothing.
                    let actual = if response.prompt_tokens > 0 || response.completion_tokens > 0 {
                        self.pricing
                            .cost(response.prompt_tokens, response.completion_tokens)
                    } else {
                        estimated_cost
                    };
                    self.ledger.commit(estimated_cost, actual);
                    document_budget.record(actual);

                    match parse_model_json(&response.content) {
                        Some(value) => apply_batch(batch, &value, &mut outcome),
                        None => outcome.warnings.push(
                            "enhancement response was not parseable JSON; batch skipped"
                                .to_string(),
                        ),
                    }
                }
                Err(e) => {
                    // A failed call only loses its own batch; budget stops
                    // above are what end the pass early.
                    self.ledger.release(estimated_cost);
                    outcome.warnings.push(format!("enhancement call failed: {e}"));
                }
            }
        }

        outcome
    }
}

#[derive(Debug, Deserialize)]
struct EnhancementItem {
    id: usize,
    #[serde(default)]
    original_text: String,
    #[serde(default)]
    problem: String,
    #[serde(default)]
    suggestion: String,
    #[serde(default)]
    corrected_sentence: Option<String>,
}

/// Folds one parsed batch response into the outcome.
///
/// Each usable item must name a finding from the batch and echo its
/// sentence closely enough to prove the model worked on the right text.
/// The first usable answer per finding wins.
fn apply_batch(batch: &[(usize, &Finding)], value: &serde_json::Value, outcome: &mut EnhanceOutcome) {
    let Some(items) = value.get("enhancements").and_then(|v| v.as_array()) else {
        outcome.warnings.push(
            "enhancement response had no \"enhancements\" array; batch skipped".to_string(),
        );
        return;
    };

    let mut answered: HashSet<usize> = HashSet::new();
    for raw in items {
        let Ok(item) = serde_json::from_value::<EnhancementItem>(raw.clone()) else {
            debug!("skipping malformed enhancement item");
            continue;
        };
        if answered.contains(&item.id) {
            continue;
        }
        let Some(&(finding_index, finding)) = batch.get(item.id) else {
            debug!(id = item.id, "skipping enhancement for unknown id");
            continue;
        };
        if item.problem.trim().is_empty() || item.suggestion.trim().is_empty() {
            continue;
        }

        let similarity =
            strsim::normalized_levenshtein(&item.original_text, &finding.original_text);
        if similarity < ECHO_SIMILARITY_FLOOR {
            debug!(
                id = item.id,
                similarity, "rejecting enhancement that does not echo its sentence"
            );
            continue;
        }

        answered.insert(item.id);
        outcome.replacements.push((
            finding_index,
            EnhancedFix {
                problem: item.problem,
                suggestion: item.suggestion,
                corrected_sentence: item
                    .corrected_sentence
                    .filter(|s| !s.trim().is_empty()),
            },
        ));
    }
}
