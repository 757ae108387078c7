//! Analyzer configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use prooflint_rules::CategoryId;
use serde::{Deserialize, Serialize};

use crate::CheckError;

/// Configuration for document analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Categories to check. Empty means the safe baseline.
    #[serde(default)]
    pub categories: Vec<CategoryId>,

    /// Minimum confidence a finding needs to be reported.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Maximum lines checked concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Hard limit on one sentence's checks, in seconds.
    #[serde(default = "default_sentence_timeout_secs")]
    pub sentence_timeout_secs: u64,

    /// Limit on one external check call, in seconds.
    #[serde(default = "default_external_check_timeout_secs")]
    pub external_check_timeout_secs: u64,

    /// Language-model enhancement settings.
    #[serde(default)]
    pub llm: LlmSettings,
}

fn default_confidence_threshold() -> f32 {
    0.8
}

fn default_concurrency() -> usize {
    5
}

fn default_sentence_timeout_secs() -> u64 {
    10
}

fn default_external_check_timeout_secs() -> u64 {
    8
}

/// Settings for the enhancement pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Whether enhancement runs at all.
    #[serde(default)]
    pub enabled: bool,

    /// Model identifier sent to the API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Most findings sent in one request.
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,

    /// Response token cap per request.
    #[serde(default = "default_max_response_tokens")]
    pub max_response_tokens: u32,

    /// Spending ceilings.
    #[serde(default)]
    pub ceilings: CostCeilings,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "PROOFLINT_API_KEY".to_string()
}

fn default_max_batch() -> usize {
    15
}

fn default_max_response_tokens() -> u32 {
    800
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            max_batch: default_max_batch(),
            max_response_tokens: default_max_response_tokens(),
            ceilings: CostCeilings::default(),
        }
    }
}

/// Spending ceilings in US dollars.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostCeilings {
    /// Most one document may spend.
    #[serde(default = "default_per_document_usd")]
    pub per_document_usd: f64,

    /// Most one calendar day may spend.
    #[serde(default = "default_daily_usd")]
    pub daily_usd: f64,

    /// Most one calendar month may spend.
    #[serde(default = "default_monthly_usd")]
    pub monthly_usd: f64,
}

fn default_per_document_usd() -> f64 {
    0.50
}

fn default_daily_usd() -> f64 {
    10.0
}

fn default_monthly_usd() -> f64 {
    100.0
}

impl Default for CostCeilings {
    fn default() -> Self {
        Self {
            per_document_usd: default_per_document_usd(),
            daily_usd: default_daily_usd(),
            monthly_usd: default_monthly_usd(),
        }
    }
}

impl CheckConfig {
    /// Configuration file names, in discovery order.
    pub const CONFIG_FILES: [&'static str; 2] = [".prooflint.jsonc", ".prooflint.json"];

    /// Creates a configuration with every default.
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            confidence_threshold: default_confidence_threshold(),
            concurrency: default_concurrency(),
            sentence_timeout_secs: default_sentence_timeout_secs(),
            external_check_timeout_secs: default_external_check_timeout_secs(),
            llm: LlmSettings::default(),
        }
    }

    /// Finds a configuration file in `dir`, probing [`Self::CONFIG_FILES`]
    /// in order.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.prooflint.jsonc`, `.prooflint.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CheckError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CheckError::config(format!("Failed to read config: {e}")))?;
        Self::from_json(&content)
    }

    /// Parses configuration from a JSON or JSONC string.
    pub fn from_json(json: &str) -> Result<Self, CheckError> {
        let value =
            jsonc_parser::parse_to_serde_value(json, &jsonc_parser::ParseOptions::default())
                .map_err(|e| CheckError::config(format!("Invalid JSON: {e}")))?
                .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        let config: CheckConfig = serde_json::from_value(value)
            .map_err(|e| CheckError::config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), CheckError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(CheckError::config(format!(
                "confidence_threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            )));
        }
        if self.concurrency == 0 {
            return Err(CheckError::config("concurrency must be at least 1"));
        }
        if self.sentence_timeout_secs == 0 {
            return Err(CheckError::config(
                "sentence_timeout_secs must be at least 1",
            ));
        }
        if self.external_check_timeout_secs == 0 {
            return Err(CheckError::config(
                "external_check_timeout_secs must be at least 1",
            ));
        }
        if self.llm.max_batch == 0 {
            return Err(CheckError::config("llm.max_batch must be at least 1"));
        }
        let ceilings = &self.llm.ceilings;
        if ceilings.per_document_usd < 0.0 || ceilings.daily_usd < 0.0 || ceilings.monthly_usd < 0.0
        {
            return Err(CheckError::config("cost ceilings must not be negative"));
        }
        Ok(())
    }

    /// The per-sentence timeout as a duration.
    pub fn sentence_timeout(&self) -> Duration {
        Duration::from_secs(self.sentence_timeout_secs)
    }

    /// The external check timeout as a duration.
    pub fn external_check_timeout(&self) -> Duration {
        Duration::from_secs(self.external_check_timeout_secs)
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self::new()
    }
}
