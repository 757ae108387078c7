//! # prooflint_llm
//!
//! Language-model enhancement for ProofLint findings.
//!
//! This crate provides:
//! - An OpenAI-compatible chat completion client
//! - Retry with exponential backoff for transient failures
//! - Cost estimation and spending ledgers with daily and monthly ceilings
//! - Repair of almost-JSON model responses
//! - The [`LlmEnhancer`], which implements `prooflint_core`'s
//!   `FindingEnhancer` trait
//!
//! The enhancement pass is best effort. Budget stops, endpoint failures
//! and unusable responses become warnings on the analysis report; the
//! pattern findings are never lost.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prooflint_core::{CheckConfig, DocumentAnalyzer};
//! use prooflint_llm::LlmEnhancer;
//!
//! let config = CheckConfig::from_file(".prooflint.json")?;
//! let enhancer = LlmEnhancer::from_settings(&config.llm)?;
//! let analyzer = DocumentAnalyzer::new(config)?.with_enhancer(Arc::new(enhancer));
//! let report = analyzer.analyze("draft.txt", &text).await?;
//! ```

mod budget;
mod client;
mod enhancer;
mod error;
mod http;
mod prompt;
mod repair;
mod retry;

pub use budget::{estimate_tokens, CostLedger, DocumentBudget, ModelPricing};
pub use client::{CompletionClient, CompletionRequest, CompletionResponse};
pub use enhancer::LlmEnhancer;
pub use error::LlmError;
pub use http::HttpCompletionClient;
pub use prompt::{build_user_prompt, SYSTEM_PROMPT};
pub use repair::parse_model_json;
pub use retry::RetryPolicy;
